//! Section capture: keep the lines between the start and end keywords.
//!
//! The extractor is fed one page at a time so the conversion driver can
//! report progress per page, and so the pure capture logic can be tested on
//! plain strings without a PDF engine.
//!
//! ```text
//! page text ──▶ clean_line ──▶ boilerplate? ──▶ start/end markers ──▶ captured
//! ```

use crate::config::{CaptureMode, SectionBounds};
use crate::pipeline::boilerplate::{clean_line, BoilerplateFilter};
use tracing::debug;

/// The captured section and what the extractor saw on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    /// Captured lines in document order.
    pub lines: Vec<String>,
    pub pages_scanned: usize,
    pub lines_discarded: usize,
    pub found_start: bool,
    pub found_end: bool,
}

impl Section {
    /// Captured lines joined with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Per-page outcome of [`SectionExtractor::feed_page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageScan {
    /// Lines captured from this page.
    pub captured: usize,
    /// The end keyword closed capture on this page.
    pub closed: bool,
}

/// Incremental start/end keyword scanner.
#[derive(Debug)]
pub struct SectionExtractor {
    bounds: SectionBounds,
    filter: BoilerplateFilter,
    capturing: bool,
    finished: bool,
    section: Section,
}

impl SectionExtractor {
    pub fn new(bounds: SectionBounds, filter: BoilerplateFilter) -> Self {
        Self {
            bounds,
            filter,
            capturing: false,
            finished: false,
            section: Section::default(),
        }
    }

    /// `true` once [`CaptureMode::FirstSection`] has seen its end keyword.
    /// Further pages are ignored.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Scan one page of text.
    pub fn feed_page(&mut self, page_text: &str) -> PageScan {
        let mut scan = PageScan {
            captured: 0,
            closed: false,
        };
        if self.finished {
            return scan;
        }
        self.section.pages_scanned += 1;

        for raw in page_text.lines() {
            let line = clean_line(raw);
            if self.filter.is_boilerplate(&line) {
                self.section.lines_discarded += 1;
                continue;
            }

            if line.contains(&self.bounds.start_keyword) {
                self.capturing = true;
                self.section.found_start = true;
            }
            if self.capturing && line.contains(&self.bounds.end_keyword) {
                self.capturing = false;
                self.section.found_end = true;
                scan.closed = true;
                if self.bounds.mode == CaptureMode::FirstSection {
                    self.finished = true;
                }
                // The rest of this page is not examined in either mode.
                break;
            }
            if self.capturing && !line.contains(&self.bounds.start_keyword) {
                self.section.lines.push(line);
                scan.captured += 1;
            }
        }

        debug!(
            "Scanned page {}: {} lines captured{}",
            self.section.pages_scanned,
            scan.captured,
            if scan.closed { ", section closed" } else { "" }
        );
        scan
    }

    /// Consume the extractor and return what it captured.
    pub fn finish(self) -> Section {
        self.section
    }
}

/// Run the extractor over every page.
pub fn extract_section<P: AsRef<str>>(
    pages: &[P],
    bounds: &SectionBounds,
    filter: &BoilerplateFilter,
) -> Section {
    let mut extractor = SectionExtractor::new(bounds.clone(), filter.clone());
    for page in pages {
        if extractor.is_finished() {
            break;
        }
        extractor.feed_page(page.as_ref());
    }
    extractor.finish()
}
