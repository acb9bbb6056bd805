//! Progress-callback trait for page-by-page extraction events.
//!
//! Inject an [`Arc<dyn ExtractionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! events while the extractor walks the document. The CLI uses it to drive a
//! terminal progress bar; library callers can forward events anywhere.
//!
//! # Example
//!
//! ```rust
//! use pdf2reqif::{ConversionConfig, ExtractionProgressCallback};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     scanned: Arc<AtomicUsize>,
//! }
//!
//! impl ExtractionProgressCallback for CountingCallback {
//!     fn on_page_scanned(&self, page_num: usize, total_pages: usize, captured_lines: usize) {
//!         self.scanned.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("Page {}/{}: {} lines captured", page_num, total_pages, captured_lines);
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback {
//!     scanned: Arc::new(AtomicUsize::new(0)),
//! });
//!
//! let config = ConversionConfig::builder()
//!     .progress_callback(counter as Arc<dyn ExtractionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by the conversion pipeline as it scans each page.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. The pipeline is single-threaded, but the trait is
/// `Send + Sync` so a callback can be shared with a UI thread.
pub trait ExtractionProgressCallback: Send + Sync {
    /// Called once before the first page is scanned.
    ///
    /// # Arguments
    /// * `total_pages` — number of pages in the document
    fn on_extraction_start(&self, total_pages: usize) {
        let _ = total_pages;
    }

    /// Called after a page's lines have been filtered and captured.
    ///
    /// # Arguments
    /// * `page_num`       — 1-indexed page number
    /// * `total_pages`    — total pages in the document
    /// * `captured_lines` — lines captured from this page
    fn on_page_scanned(&self, page_num: usize, total_pages: usize, captured_lines: usize) {
        let _ = (page_num, total_pages, captured_lines);
    }

    /// Called when the end keyword closes a captured section.
    ///
    /// # Arguments
    /// * `page_num` — 1-indexed page holding the end keyword
    fn on_section_closed(&self, page_num: usize) {
        let _ = page_num;
    }

    /// Called once after parsing finished.
    ///
    /// # Arguments
    /// * `total_pages`       — total pages in the document
    /// * `requirement_count` — records produced by the parser
    fn on_conversion_complete(&self, total_pages: usize, requirement_count: usize) {
        let _ = (total_pages, requirement_count);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ExtractionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ExtractionProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct TrackingCallback {
        started_total: AtomicUsize,
        scanned: AtomicUsize,
        captured: AtomicUsize,
        closed_on: AtomicUsize,
        requirements: AtomicUsize,
    }

    impl ExtractionProgressCallback for TrackingCallback {
        fn on_extraction_start(&self, total_pages: usize) {
            self.started_total.store(total_pages, Ordering::SeqCst);
        }

        fn on_page_scanned(&self, _page_num: usize, _total_pages: usize, captured_lines: usize) {
            self.scanned.fetch_add(1, Ordering::SeqCst);
            self.captured.fetch_add(captured_lines, Ordering::SeqCst);
        }

        fn on_section_closed(&self, page_num: usize) {
            self.closed_on.store(page_num, Ordering::SeqCst);
        }

        fn on_conversion_complete(&self, _total_pages: usize, requirement_count: usize) {
            self.requirements.store(requirement_count, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_extraction_start(5);
        cb.on_page_scanned(1, 5, 12);
        cb.on_section_closed(1);
        cb.on_conversion_complete(5, 4);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback::default();

        tracker.on_extraction_start(3);
        assert_eq!(tracker.started_total.load(Ordering::SeqCst), 3);

        tracker.on_page_scanned(1, 3, 0);
        tracker.on_page_scanned(2, 3, 14);
        tracker.on_page_scanned(3, 3, 6);
        tracker.on_section_closed(3);

        assert_eq!(tracker.scanned.load(Ordering::SeqCst), 3);
        assert_eq!(tracker.captured.load(Ordering::SeqCst), 20);
        assert_eq!(tracker.closed_on.load(Ordering::SeqCst), 3);

        tracker.on_conversion_complete(3, 4);
        assert_eq!(tracker.requirements.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: ProgressCallback = Arc::new(NoopProgressCallback);
        cb.on_extraction_start(10);
        cb.on_page_scanned(1, 10, 3);
    }
}
