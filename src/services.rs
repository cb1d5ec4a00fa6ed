//! External collaborator traits consumed by the pipeline.
//!
//! The pipeline never talks to a concrete PDF backend, OCR framework, or
//! model endpoint. It consumes three trait objects the host injects:
//!
//! * [`DocumentReader`] — opens a source document and hands back its
//!   pages: embedded text layer per page, and a rasterised image for
//!   pages whose text layer is empty.
//! * [`OcrEngine`] — recognises text lines on a rendered page image.
//! * [`TextGenerator`] — one instruction + one user text in, one reply
//!   out. May be an on-device model or a remote API; either way the
//!   pipeline issues exactly one request per import and never retries.
//!
//! All traits are `Send + Sync` and object-safe so they can be shared as
//! `Arc<dyn …>` across the OCR fan-out tasks.

use crate::error::{DocumentError, GenerationError, OcrError};
use async_trait::async_trait;
use image::DynamicImage;

/// Opens source documents for the Text Extractor.
#[async_trait]
pub trait DocumentReader: Send + Sync {
    /// Open a document by host path/URL.
    ///
    /// An error here is fatal to the import
    /// ([`crate::error::ImportError::DocumentUnreadable`]).
    async fn open(&self, source: &str) -> Result<Box<dyn DocumentPages>, DocumentError>;
}

/// An open, paginated document.
#[async_trait]
pub trait DocumentPages: Send + Sync {
    /// Total number of pages.
    fn page_count(&self) -> usize;

    /// Embedded text for a page (0-indexed), or `None` when the page is
    /// image-only and carries no text layer.
    async fn text_layer(&self, index: usize) -> Option<String>;

    /// Rasterise a page for OCR input.
    async fn render(&self, index: usize) -> Result<DynamicImage, DocumentError>;
}

/// Recognition options passed to the OCR engine.
///
/// The extractor always requests accurate-mode recognition with language
/// auto-correction; the struct exists so host implementations map the
/// flags onto their framework's equivalents.
#[derive(Debug, Clone, Copy)]
pub struct OcrOptions {
    /// Prefer recognition accuracy over speed.
    pub accurate: bool,
    /// Apply language-model correction to recognised text.
    pub language_correction: bool,
}

impl Default for OcrOptions {
    fn default() -> Self {
        Self {
            accurate: true,
            language_correction: true,
        }
    }
}

/// Optical character recognition over a rendered page image.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Recognise text on one page image, returning lines top-to-bottom.
    ///
    /// Errors are recovered by the extractor as empty page text; one bad
    /// page never aborts the whole extraction.
    async fn recognize(
        &self,
        image: &DynamicImage,
        options: &OcrOptions,
    ) -> Result<Vec<String>, OcrError>;
}

/// One canonicalization request: a fixed instruction plus the raw text.
#[derive(Debug, Clone)]
pub struct GenerationRequest<'a> {
    /// System-level instruction (the canonical seven-header template).
    pub instructions: &'a str,
    /// The user message — raw extracted résumé text.
    pub input: &'a str,
}

/// Text generation service (language model).
///
/// One request, one reply. No streaming semantics are required by this
/// pipeline, though an implementation may accumulate a stream internally
/// before returning.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Produce a single reply for the request.
    async fn generate(&self, request: GenerationRequest<'_>) -> Result<String, GenerationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ocr_options_default_to_accurate_with_correction() {
        let opts = OcrOptions::default();
        assert!(opts.accurate);
        assert!(opts.language_correction);
    }
}
