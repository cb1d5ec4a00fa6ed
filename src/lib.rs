//! # resume-import
//!
//! Turn an arbitrary, unstructured résumé document into structured,
//! de-duplicated domain records.
//!
//! ## Why this crate?
//!
//! Résumé import is a chain of fallible, heuristic stages: text
//! extraction that must fall back to OCR page by page, a language-model
//! reformatting step that can fail or be cancelled, regex-driven section
//! segmentation, per-section line scanners, and a merge pass that has to
//! stay idempotent when the same document is imported twice. Each stage
//! has its own partial-failure policy; this crate pins them down and
//! keeps every stage independently testable.
//!
//! ## Pipeline Overview
//!
//! ```text
//! document
//!  │
//!  ├─ 1. Extract      text layer per page, OCR fallback (concurrent)
//!  ├─ 2. Canonicalize one generation call + deterministic cleanup
//!  ├─ 3. Sections     seven-header split with synonym normalisation
//!  ├─ 4. Entities     contact / experience / education / skills /
//!  │                  projects / extracurricular / languages scanners
//!  └─ 5. Merge        normalized-key dedup, dense order renumbering
//! ```
//!
//! Control flows strictly forward; the aggregate is first mutated after
//! stage 4, and stage 5 runs synchronously, so cancelling the import
//! during extraction or generation leaves the store untouched.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use resume_import::{import_document, ImportConfig, ImportServices, ResumeAggregate};
//! # fn services() -> ImportServices { unimplemented!() }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let services: ImportServices = services(); // host-provided reader/OCR/generator
//!     let mut aggregate = ResumeAggregate::default();
//!     let config = ImportConfig::default();
//!
//!     let outcome = import_document("resume.pdf", &services, &mut aggregate, &config).await?;
//!     println!(
//!         "{} drafts extracted, {} duplicates merged",
//!         outcome.stats.drafts_extracted, outcome.stats.duplicates_merged
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Concurrency
//!
//! One import runs as one async task. Per-page OCR sub-tasks fan out up
//! to [`ImportConfig::ocr_concurrency`] and all complete before the
//! extractor returns. The aggregate itself is single-owner: the caller
//! serialises every structural mutation of one résumé — imports and user
//! edits alike — through one execution context.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod import;
pub mod patterns;
pub mod pipeline;
pub mod progress;
pub mod prompts;
pub mod records;
pub mod services;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ImportConfig, ImportConfigBuilder};
pub use error::{DocumentError, GenerationError, ImportError, OcrError};
pub use import::{import_document, ImportOutcome, ImportServices, ImportStats};
pub use pipeline::merge::MergeStats;
pub use progress::{ImportProgressCallback, NoopProgressCallback, ProgressCallback};
pub use records::{
    ContactInfo, EducationDraft, EducationRecord, ExperienceRecord, ExtracurricularDraft,
    ExtracurricularRecord, ExtractedDrafts, JobExperienceDraft, LanguageDraft, LanguageRecord,
    ProjectDraft, ProjectRecord, ResumeAggregate, SkillDraft, SkillRecord,
};
pub use services::{
    DocumentPages, DocumentReader, GenerationRequest, OcrEngine, OcrOptions, TextGenerator,
};
