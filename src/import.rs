//! The import entry point: run all five stages against one aggregate.
//!
//! ## Mutation boundary
//!
//! Stages 1–4 are pure with respect to the aggregate — extraction,
//! generation, splitting, and entity scanning touch nothing but their
//! own inputs. The first aggregate mutation happens only after every
//! draft exists, and from there to the end of the merge pass execution
//! is synchronous (no suspension points). Dropping the returned future
//! at any await — including a generation cancellation — therefore leaves
//! the store untouched.
//!
//! The aggregate is not protected against concurrent mutation; the
//! caller must route all structural changes of one résumé through a
//! single execution context (one actor/owner task) and keep at most one
//! import in flight per aggregate.

use crate::config::ImportConfig;
use crate::error::ImportError;
use crate::pipeline::{canonicalize, entities, extract, merge, sections};
use crate::records::{ContactInfo, ResumeAggregate};
use crate::services::{DocumentReader, OcrEngine, TextGenerator};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// The three external collaborators an import run needs.
#[derive(Clone)]
pub struct ImportServices {
    pub reader: Arc<dyn DocumentReader>,
    pub ocr: Arc<dyn OcrEngine>,
    pub generator: Arc<dyn TextGenerator>,
}

/// What one import run did, returned alongside the mutated aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportOutcome {
    /// Contact details extracted this run (also applied to the aggregate
    /// fill-if-empty).
    pub contact: ContactInfo,
    pub stats: ImportStats,
}

/// Counters and timings for one import run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportStats {
    pub total_pages: usize,
    /// Pages whose text layer was empty and went through OCR.
    pub ocr_pages: usize,
    /// Canonical section keys found, in document order.
    pub section_keys: Vec<String>,
    /// Collection drafts extracted (contact excluded).
    pub drafts_extracted: usize,
    /// Duplicate records absorbed by the merge pass.
    pub duplicates_merged: usize,
    pub extract_duration_ms: u64,
    pub generation_duration_ms: u64,
    pub total_duration_ms: u64,
}

/// Import one document into the given résumé aggregate.
///
/// # Arguments
/// * `source`    — document handle (local path or URL the host's reader
///   understands)
/// * `services`  — the document reader, OCR engine, and text generator
/// * `aggregate` — the résumé being imported into; mutated in place
/// * `config`    — import configuration
///
/// # Errors
/// * [`ImportError::DocumentUnreadable`] — the source could not be opened
/// * [`ImportError::EmptyExtraction`] — no page yielded text, even after OCR
/// * [`ImportError::Generation`] — the generation call failed, timed out,
///   or was cancelled; propagated verbatim, never retried here
/// * [`ImportError::EmptyCanonicalization`] — the cleaned reply was blank
///
/// On any error the aggregate is left exactly as it was. Past a
/// successful canonicalization the import always succeeds, possibly with
/// empty collections.
pub async fn import_document(
    source: &str,
    services: &ImportServices,
    aggregate: &mut ResumeAggregate,
    config: &ImportConfig,
) -> Result<ImportOutcome, ImportError> {
    let total_start = Instant::now();
    info!("starting import: {}", source);

    // ── Stage 1: extract raw text ────────────────────────────────────────
    let extract_start = Instant::now();
    let extracted = extract::extract_text(&services.reader, &services.ocr, source, config).await?;
    let extract_duration_ms = extract_start.elapsed().as_millis() as u64;

    if extracted.text.trim().is_empty() {
        return Err(ImportError::EmptyExtraction {
            pages: extracted.total_pages,
        });
    }

    // ── Stage 2: canonicalize ────────────────────────────────────────────
    let generation_start = Instant::now();
    let canonical = canonicalize::canonicalize(&services.generator, &extracted.text, config).await?;
    let generation_duration_ms = generation_start.elapsed().as_millis() as u64;

    if canonical.is_empty() {
        return Err(ImportError::EmptyCanonicalization);
    }
    if let Some(ref cb) = config.progress_callback {
        cb.on_canonicalized(canonical.len());
    }

    // ── Stage 3: split sections ──────────────────────────────────────────
    let split = sections::split_sections(&canonical);
    if let Some(ref cb) = config.progress_callback {
        cb.on_sections_split(split.len());
    }

    // ── Stage 4: extract entities ────────────────────────────────────────
    let drafts = entities::extract_all(&split);
    let drafts_extracted = drafts.record_count();
    debug!(
        "extracted {} drafts from {} sections",
        drafts_extracted,
        split.len()
    );

    // ── Stage 5: append and merge (synchronous; first mutation) ─────────
    aggregate.fill_contact(&drafts.contact);
    for draft in drafts.experiences {
        aggregate.push_experience(draft.into());
    }
    for draft in drafts.education {
        aggregate.push_education(draft.into());
    }
    for draft in drafts.skills {
        aggregate.push_skill(draft.into());
    }
    for draft in drafts.projects {
        aggregate.push_project(draft.into());
    }
    for draft in drafts.extracurriculars {
        aggregate.push_extracurricular(draft.into());
    }
    for draft in drafts.languages {
        aggregate.push_language(draft.into());
    }

    let merge_stats = merge::dedupe_aggregate(aggregate);

    if let Some(ref cb) = config.progress_callback {
        cb.on_import_complete(drafts_extracted, merge_stats.total());
    }

    let stats = ImportStats {
        total_pages: extracted.total_pages,
        ocr_pages: extracted.ocr_pages,
        section_keys: split.keys().cloned().collect(),
        drafts_extracted,
        duplicates_merged: merge_stats.total(),
        extract_duration_ms,
        generation_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "import complete: {} drafts, {} duplicates merged, {}ms total",
        stats.drafts_extracted, stats.duplicates_merged, stats.total_duration_ms
    );

    Ok(ImportOutcome {
        contact: drafts.contact,
        stats,
    })
}
