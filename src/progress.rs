//! Progress-callback trait for import pipeline events.
//!
//! Inject an [`Arc<dyn ImportProgressCallback>`] via
//! [`crate::config::ImportConfigBuilder::progress_callback`] to receive
//! events as the pipeline advances. Callbacks are the least-invasive
//! integration point: the host can forward events to a channel, a UI, or
//! a log without the library knowing how the application communicates.
//!
//! All methods have default no-op implementations so callers override
//! only what they care about. `on_page_extracted` may be called
//! concurrently from OCR fan-out tasks; implementations must protect
//! shared mutable state accordingly.

use std::sync::Arc;

/// Called by the import pipeline as it progresses through its stages.
pub trait ImportProgressCallback: Send + Sync {
    /// Called once after the document is opened.
    fn on_import_start(&self, total_pages: usize) {
        let _ = total_pages;
    }

    /// Called as each page's text is obtained.
    ///
    /// `used_ocr` is true when the page had no native text layer and went
    /// through recognition (successfully or not).
    fn on_page_extracted(&self, page_num: usize, total_pages: usize, used_ocr: bool) {
        let _ = (page_num, total_pages, used_ocr);
    }

    /// Called when the generation service has replied and the reply has
    /// been cleaned. `canonical_len` is the byte length of the cleaned
    /// text.
    fn on_canonicalized(&self, canonical_len: usize) {
        let _ = canonical_len;
    }

    /// Called after section splitting with the number of non-empty
    /// sections found.
    fn on_sections_split(&self, section_count: usize) {
        let _ = section_count;
    }

    /// Called once after merge/dedup, with the number of duplicate
    /// records absorbed across all collections.
    fn on_import_complete(&self, drafts_extracted: usize, duplicates_merged: usize) {
        let _ = (drafts_extracted, duplicates_merged);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ImportProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ImportConfig`].
pub type ProgressCallback = Arc<dyn ImportProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct TrackingCallback {
        pages: Arc<AtomicUsize>,
        ocr_pages: Arc<AtomicUsize>,
        merged: Arc<AtomicUsize>,
    }

    impl ImportProgressCallback for TrackingCallback {
        fn on_page_extracted(&self, _page_num: usize, _total: usize, used_ocr: bool) {
            self.pages.fetch_add(1, Ordering::SeqCst);
            if used_ocr {
                self.ocr_pages.fetch_add(1, Ordering::SeqCst);
            }
        }

        fn on_import_complete(&self, _drafts: usize, duplicates_merged: usize) {
            self.merged.store(duplicates_merged, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_import_start(2);
        cb.on_page_extracted(1, 2, false);
        cb.on_page_extracted(2, 2, true);
        cb.on_canonicalized(1024);
        cb.on_sections_split(3);
        cb.on_import_complete(7, 2);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback {
            pages: Arc::new(AtomicUsize::new(0)),
            ocr_pages: Arc::new(AtomicUsize::new(0)),
            merged: Arc::new(AtomicUsize::new(0)),
        };

        tracker.on_page_extracted(1, 2, false);
        tracker.on_page_extracted(2, 2, true);
        tracker.on_import_complete(5, 1);

        assert_eq!(tracker.pages.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.ocr_pages.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.merged.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: Arc<dyn ImportProgressCallback> = Arc::new(NoopProgressCallback);
        cb.on_import_start(3);
        cb.on_page_extracted(1, 3, false);
    }
}
