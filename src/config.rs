//! Configuration for a résumé import run.
//!
//! All pipeline behaviour is controlled through [`ImportConfig`], built
//! via its [`ImportConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share configs across tasks and to log why two runs
//! behaved differently.

use crate::error::ImportError;
use crate::progress::ImportProgressCallback;
use crate::services::OcrOptions;
use std::fmt;
use std::sync::Arc;

/// Configuration for one import invocation.
///
/// Built via [`ImportConfig::builder()`] or [`ImportConfig::default()`].
///
/// # Example
/// ```rust
/// use resume_import::ImportConfig;
///
/// let config = ImportConfig::builder()
///     .ocr_concurrency(2)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ImportConfig {
    /// Number of pages OCR'd concurrently. Default: 4.
    ///
    /// OCR sub-tasks are independent of each other; the extractor waits
    /// for all of them before returning. Raise this when the OCR engine
    /// is remote and network-bound, lower it for CPU-bound on-device
    /// recognition.
    pub ocr_concurrency: usize,

    /// Recognition options handed to the OCR engine. Default: accurate
    /// mode with language auto-correction, the combination that keeps
    /// heuristic extraction viable on scanned documents.
    pub ocr_options: OcrOptions,

    /// Custom canonicalization instructions. If `None`, uses
    /// [`crate::prompts::DEFAULT_INSTRUCTIONS`].
    pub instructions: Option<String>,

    /// Progress callback for per-page and per-stage events. Default: none.
    pub progress_callback: Option<Arc<dyn ImportProgressCallback>>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            ocr_concurrency: 4,
            ocr_options: OcrOptions::default(),
            instructions: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ImportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportConfig")
            .field("ocr_concurrency", &self.ocr_concurrency)
            .field("ocr_options", &self.ocr_options)
            .field("instructions", &self.instructions.as_deref().map(|_| "<custom>"))
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn ImportProgressCallback>"),
            )
            .finish()
    }
}

impl ImportConfig {
    /// Create a new builder for `ImportConfig`.
    pub fn builder() -> ImportConfigBuilder {
        ImportConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ImportConfig`].
#[derive(Debug)]
pub struct ImportConfigBuilder {
    config: ImportConfig,
}

impl ImportConfigBuilder {
    pub fn ocr_concurrency(mut self, n: usize) -> Self {
        self.config.ocr_concurrency = n.max(1);
        self
    }

    pub fn ocr_options(mut self, options: OcrOptions) -> Self {
        self.config.ocr_options = options;
        self
    }

    pub fn instructions(mut self, instructions: impl Into<String>) -> Self {
        self.config.instructions = Some(instructions.into());
        self
    }

    pub fn progress_callback(mut self, cb: Arc<dyn ImportProgressCallback>) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ImportConfig, ImportError> {
        if self.config.ocr_concurrency == 0 {
            return Err(ImportError::InvalidConfig(
                "OCR concurrency must be ≥ 1".into(),
            ));
        }
        if let Some(ref instructions) = self.config.instructions {
            if instructions.trim().is_empty() {
                return Err(ImportError::InvalidConfig(
                    "custom instructions must not be empty".into(),
                ));
            }
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ImportConfig::builder().build().unwrap();
        assert_eq!(config.ocr_concurrency, 4);
        assert!(config.ocr_options.accurate);
        assert!(config.instructions.is_none());
    }

    #[test]
    fn zero_concurrency_is_clamped_by_setter() {
        let config = ImportConfig::builder().ocr_concurrency(0).build().unwrap();
        assert_eq!(config.ocr_concurrency, 1);
    }

    #[test]
    fn blank_instructions_rejected() {
        let result = ImportConfig::builder().instructions("   ").build();
        assert!(matches!(result, Err(ImportError::InvalidConfig(_))));
    }
}
