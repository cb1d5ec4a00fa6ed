//! Pipeline stages for résumé import.
//!
//! Each submodule implements exactly one transformation step. Control
//! flows strictly forward; no stage re-invokes an earlier one, and every
//! stage is independently testable.
//!
//! ## Data Flow
//!
//! ```text
//! document ──▶ extract ──▶ canonicalize ──▶ sections ──▶ entities ──▶ merge
//! (handle)     (text+OCR)   (LLM+cleanup)    (headers)    (drafts)    (dedup)
//! ```
//!
//! 1. [`extract`] — per-page text-layer retrieval, OCR fallback for
//!    image-only pages; per-page failures are swallowed
//! 2. [`canonicalize`] — one generation call against the fixed
//!    seven-header instruction, then deterministic cleanup rules
//! 3. [`sections`] — header-pattern split with synonym normalisation
//! 4. [`entities`] — one pure line scanner per section kind
//! 5. [`merge`] — normalized-key dedup and dense order renumbering; the
//!    only stage that mutates the aggregate

pub mod canonicalize;
pub mod entities;
pub mod extract;
pub mod merge;
pub mod sections;
