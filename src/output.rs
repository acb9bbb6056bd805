//! Result types produced by a conversion run.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Placeholder for a Legacy GUID or CR that the source text does not carry.
pub const NOT_AVAILABLE: &str = "N/A";

/// One requirement record parsed from the captured section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// Numeric identifier as written in the source, kept as text.
    pub id: String,
    /// Legacy GUID token, or [`NOT_AVAILABLE`].
    pub legacy_guid: String,
    /// Change-request number, or [`NOT_AVAILABLE`].
    pub change_request: String,
    /// Free-text description, trimmed. May be empty.
    pub description: String,
}

impl Requirement {
    /// A fresh record with both optional fields set to [`NOT_AVAILABLE`].
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            legacy_guid: NOT_AVAILABLE.to_string(),
            change_request: NOT_AVAILABLE.to_string(),
            description: String::new(),
        }
    }
}

/// Everything one conversion run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// Records in source order.
    pub requirements: Vec<Requirement>,
    /// The captured section text the records were parsed from.
    pub section: String,
    /// Rendered ReqIF XML.
    pub xml: String,
    pub stats: ConversionStats,
}

/// Counters describing a conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Pages in the document.
    pub total_pages: usize,
    /// Pages the extractor actually looked at.
    pub pages_scanned: usize,
    /// Lines kept between the start and end keywords.
    pub captured_lines: usize,
    /// Lines dropped as header/footer boilerplate.
    pub discarded_lines: usize,
    /// Whether the start keyword was found at all.
    pub found_start: bool,
    /// Whether an end keyword closed the section.
    pub found_end: bool,
    /// Records produced by the parser.
    pub requirement_count: usize,
    /// Wall-clock time for the whole run.
    pub total_duration_ms: u64,
}

/// Returned by [`crate::convert::convert_to_file`] once the XML is on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionReport {
    pub output_path: PathBuf,
    pub stats: ConversionStats,
}

/// Document information read without running the conversion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub page_count: usize,
    pub pdf_version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_requirement_uses_sentinel() {
        let r = Requirement::new("5");
        assert_eq!(r.id, "5");
        assert_eq!(r.legacy_guid, "N/A");
        assert_eq!(r.change_request, "N/A");
        assert!(r.description.is_empty());
    }

    #[test]
    fn requirement_json_field_names() {
        let json = serde_json::to_string(&Requirement::new("7")).unwrap();
        assert!(json.contains("\"legacy_guid\":\"N/A\""), "got: {json}");
        assert!(json.contains("\"change_request\""));
    }
}
