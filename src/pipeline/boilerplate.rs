//! Line cleaning and header/footer removal.
//!
//! Every page of the source documents repeats the same running header and
//! footer: page counters, the document title, group and release metadata, and
//! the confidentiality notice. These lines are dropped before section capture
//! so they can never leak into a requirement description.
//!
//! Patterns are matched against the *trimmed* line and are anchored at its
//! start, so `GM Confidential` removes the notice but keeps a sentence that
//! merely mentions it.

use crate::error::Pdf2ReqifError;
use once_cell::sync::Lazy;
use regex::RegexSet;

/// Built-in running header/footer patterns.
pub const DEFAULT_PATTERNS: &[&str] = &[
    r"Page:\s*\d+\s*of\s*\d+",
    r"\d+\s+of\s+\d+$",
    r"CYS1600:\s*Secure Storage Requirements",
    r"Group:\s*Product Cybersecurity",
    r"Release date:\s*\d{4}-\d{2}-\d{2}",
    r"Cadence:\s*\d+\.\d+\.\d+",
    r"ECCN:\s*.*",
    r"©\s*\d{4}\s*GM",
    r"GM Confidential",
];

static DEFAULT_SET: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new(DEFAULT_PATTERNS.iter().map(|p| anchor(p))).unwrap()
});

/// Wrap a pattern so it only matches at the start of the line.
fn anchor(pattern: &str) -> String {
    format!("^(?:{pattern})")
}

/// Decides whether a cleaned line is boilerplate.
#[derive(Debug, Clone, Default)]
pub struct BoilerplateFilter {
    extra: Option<RegexSet>,
}

impl BoilerplateFilter {
    /// Built-in patterns plus caller-supplied ones.
    pub fn new<S: AsRef<str>>(extra: &[S]) -> Result<Self, Pdf2ReqifError> {
        if extra.is_empty() {
            return Ok(Self::default());
        }
        let set = RegexSet::new(extra.iter().map(|p| anchor(p.as_ref())))
            .map_err(|e| Pdf2ReqifError::InvalidConfig(format!("invalid ignore pattern: {e}")))?;
        Ok(Self { extra: Some(set) })
    }

    /// `true` if `line` (already cleaned) should be dropped.
    pub fn is_boilerplate(&self, line: &str) -> bool {
        DEFAULT_SET.is_match(line) || self.extra.as_ref().is_some_and(|s| s.is_match(line))
    }
}

/// Trim surrounding whitespace and drop invisible Unicode.
///
/// pdfium separates lines with `\r\n`, so a stray `\r` is dropped along with
/// every other control character except tab (XML 1.0 cannot carry them).
/// Zero-width characters and soft hyphens show up in text copied from word
/// processors and would otherwise defeat the `ID:` header patterns.
pub fn clean_line(raw: &str) -> String {
    raw.chars()
        .filter(|&c| !is_invisible(c))
        .collect::<String>()
        .trim()
        .to_string()
}

fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{200B}' | '\u{FEFF}' | '\u{00AD}' | '\u{200C}' | '\u{200D}' | '\u{2060}'
            | '\u{FFFE}' | '\u{FFFF}'
    ) || (c.is_control() && c != '\t')
}
