//! Text extraction: native text layer first, OCR fallback per page.
//!
//! For each page the embedded text layer is tried first; only a page
//! whose layer is empty after trimming is rendered and sent to OCR. A
//! document with a full text layer therefore never touches the OCR
//! engine at all.
//!
//! ## Failure policy
//!
//! Failing to open the document is fatal. Everything after that is not:
//! a render or recognition error on one page is logged and folded to
//! empty page text, so one bad page cannot abort the whole extraction.
//! A document where *every* page comes back empty yields an empty string
//! here — the orchestrator decides that this is
//! [`crate::error::ImportError::EmptyExtraction`].

use crate::config::ImportConfig;
use crate::error::ImportError;
use crate::services::{DocumentPages, DocumentReader, OcrEngine};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Raw text plus the page accounting the orchestrator reports in stats.
#[derive(Debug, Clone)]
pub struct ExtractedText {
    /// All pages' text joined with newlines.
    pub text: String,
    /// Pages in the document.
    pub total_pages: usize,
    /// Pages that went through OCR (their text layer was empty).
    pub ocr_pages: usize,
}

/// Extract raw text from a source document.
///
/// Pages are processed concurrently up to `config.ocr_concurrency`; all
/// sub-tasks complete (or are individually suppressed on error) before
/// this returns. Page order is preserved in the output regardless of
/// completion order.
pub async fn extract_text(
    reader: &Arc<dyn DocumentReader>,
    ocr: &Arc<dyn OcrEngine>,
    source: &str,
    config: &ImportConfig,
) -> Result<ExtractedText, ImportError> {
    let pages = reader
        .open(source)
        .await
        .map_err(|e| ImportError::DocumentUnreadable { source: e })?;

    let total_pages = pages.page_count();
    info!("document opened: {} pages", total_pages);

    if let Some(ref cb) = config.progress_callback {
        cb.on_import_start(total_pages);
    }

    let pages = &pages;
    let mut page_texts: Vec<(usize, String, bool)> =
        stream::iter((0..total_pages).map(|index| {
            let ocr = Arc::clone(ocr);
            let config = config.clone();
            async move {
                let (text, used_ocr) = extract_page(pages.as_ref(), ocr.as_ref(), index, &config).await;
                if let Some(ref cb) = config.progress_callback {
                    cb.on_page_extracted(index + 1, total_pages, used_ocr);
                }
                (index, text, used_ocr)
            }
        }))
        .buffer_unordered(config.ocr_concurrency)
        .collect()
        .await;

    page_texts.sort_by_key(|(index, _, _)| *index);

    let ocr_pages = page_texts.iter().filter(|(_, _, used)| *used).count();
    let text = page_texts
        .iter()
        .map(|(_, text, _)| text.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    debug!(
        "extracted {} chars from {} pages ({} via OCR)",
        text.len(),
        total_pages,
        ocr_pages
    );

    Ok(ExtractedText {
        text,
        total_pages,
        ocr_pages,
    })
}

/// Obtain one page's text: text layer if present, OCR otherwise.
///
/// Returns `(text, used_ocr)`. Render and recognition errors are
/// swallowed here — the page simply contributes nothing.
async fn extract_page(
    pages: &dyn DocumentPages,
    ocr: &dyn OcrEngine,
    index: usize,
    config: &ImportConfig,
) -> (String, bool) {
    if let Some(layer) = pages.text_layer(index).await {
        if !layer.trim().is_empty() {
            return (layer, false);
        }
    }

    // Image-only page: render and recognise.
    let image = match pages.render(index).await {
        Ok(image) => image,
        Err(e) => {
            warn!("page {}: render failed, treating as empty: {}", index + 1, e);
            return (String::new(), true);
        }
    };

    match ocr.recognize(&image, &config.ocr_options).await {
        Ok(lines) => (lines.join("\n"), true),
        Err(e) => {
            warn!("page {}: OCR failed, treating as empty: {}", index + 1, e);
            (String::new(), true)
        }
    }
}
