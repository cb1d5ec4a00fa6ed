//! Error types for the resume-import library.
//!
//! Two tiers of error reflect two tiers of failure:
//!
//! * [`ImportError`] — **Fatal**: the import cannot produce any result
//!   (unreadable document, empty extraction, generation failure). Returned
//!   as `Err(ImportError)` from [`crate::import::import_document`].
//!
//! * Collaborator errors ([`DocumentError`], [`OcrError`],
//!   [`GenerationError`]) — raised by the host's implementations of the
//!   pipeline's external services. A [`DocumentError`] on open is fatal; a
//!   per-page OCR or render failure is recovered locally as empty page
//!   text and never reaches the caller.
//!
//! Everything past a successful canonicalization is total: entity
//! extraction silently drops unparseable lines (or folds them into detail
//! text) and the merge engine cannot fail.

use thiserror::Error;

/// All fatal errors returned by the import pipeline.
///
/// Per-page OCR and render failures are swallowed inside the Text
/// Extractor (logged at `warn!`) rather than propagated here.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The source document could not be opened at all.
    ///
    /// Raised before any extraction work; the aggregate is untouched.
    #[error("document could not be opened: {source}")]
    DocumentUnreadable {
        #[source]
        source: DocumentError,
    },

    /// Every page yielded no text, even after OCR.
    ///
    /// Nothing was imported; the aggregate is untouched.
    #[error("document produced no text on any of its {pages} pages")]
    EmptyExtraction { pages: usize },

    /// The text-generation service failed, timed out, or was cancelled.
    ///
    /// Propagated verbatim — the pipeline never retries; retry policy, if
    /// any, belongs to the caller.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Generation succeeded but the cleaned reply was only whitespace.
    #[error("generation produced no usable text")]
    EmptyCanonicalization,

    /// Builder validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors reported by a [`crate::services::DocumentReader`] implementation.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The file does not exist or is not readable by the host.
    #[error("document not found or unreadable: {detail}")]
    NotFound { detail: String },

    /// The bytes were read but do not parse as a supported document.
    #[error("not a supported document: {detail}")]
    Unsupported { detail: String },

    /// A page could not be rendered to an image.
    #[error("failed to render page {page}: {detail}")]
    RenderFailed { page: usize, detail: String },
}

/// Errors reported by an [`crate::services::OcrEngine`] implementation.
///
/// The Text Extractor treats every variant the same way: the page is
/// recorded as empty and extraction continues.
#[derive(Debug, Error)]
pub enum OcrError {
    /// Recognition ran but produced an error for this image.
    #[error("recognition failed: {0}")]
    RecognitionFailed(String),

    /// The OCR service itself is unavailable.
    #[error("OCR service unavailable: {0}")]
    Unavailable(String),
}

/// Errors reported by a [`crate::services::TextGenerator`] implementation.
///
/// The canonicalizer propagates these unchanged; cancellation is a normal
/// variant so hosts can distinguish a user abort from a service fault.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationError {
    /// The service reported a failure for this request.
    #[error("generation failed: {0}")]
    Failed(String),

    /// The request did not complete in time.
    #[error("generation timed out after {elapsed_ms}ms")]
    Timeout { elapsed_ms: u64 },

    /// The caller cancelled the request.
    #[error("generation cancelled")]
    Cancelled,

    /// No generation backend is configured or reachable.
    #[error("generation service unavailable: {0}")]
    Unavailable(String),
}
