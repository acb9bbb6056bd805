//! Configuration types for PDF-to-ReqIF conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. Defaults match the layout of the
//! cybersecurity requirement documents the tool was written for: a section
//! headed `3 Requirements` and closed by `4 Notes`.

use crate::error::Pdf2ReqifError;
use crate::progress::ProgressCallback;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default heading that opens the requirements section.
pub const DEFAULT_START_KEYWORD: &str = "3 Requirements";

/// Default heading that closes the requirements section.
pub const DEFAULT_END_KEYWORD: &str = "4 Notes";

/// Default XML indentation width in spaces.
pub const DEFAULT_INDENT: usize = 2;

/// Configuration for a PDF-to-ReqIF conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use pdf2reqif::{CaptureMode, ConversionConfig};
///
/// let config = ConversionConfig::builder()
///     .start_keyword("2 Requirements")
///     .end_keyword("3 Appendix")
///     .capture_mode(CaptureMode::AllSections)
///     .ignore_pattern(r"Draft\s+\d+")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Substring marking the line that opens the captured section.
    /// The marker line itself is never captured.
    pub start_keyword: String,

    /// Substring marking the line that closes the captured section.
    /// Only honoured while capture is active.
    pub end_keyword: String,

    /// Additional boilerplate regexes, anchored at the start of the trimmed
    /// line, applied on top of the built-in header/footer patterns.
    pub extra_boilerplate: Vec<String>,

    /// What happens once the end keyword is seen. Default: [`CaptureMode::FirstSection`].
    pub capture_mode: CaptureMode,

    /// Spaces per nesting level in the XML output. Range: 0–8. Default: 2.
    pub indent: usize,

    /// PDF user password for encrypted documents.
    pub password: Option<String>,

    /// Optional page-by-page progress callback.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            start_keyword: DEFAULT_START_KEYWORD.to_string(),
            end_keyword: DEFAULT_END_KEYWORD.to_string(),
            extra_boilerplate: Vec::new(),
            capture_mode: CaptureMode::default(),
            indent: DEFAULT_INDENT,
            password: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("start_keyword", &self.start_keyword)
            .field("end_keyword", &self.end_keyword)
            .field("extra_boilerplate", &self.extra_boilerplate)
            .field("capture_mode", &self.capture_mode)
            .field("indent", &self.indent)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ExtractionProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }

    /// Check the constraints [`ConversionConfigBuilder::build`] enforces.
    ///
    /// Fields are public, so conversion entry points call this again for
    /// configs assembled with struct-update syntax.
    pub fn validate(&self) -> Result<(), Pdf2ReqifError> {
        if self.start_keyword.trim().is_empty() {
            return Err(Pdf2ReqifError::InvalidConfig(
                "start keyword must not be empty".into(),
            ));
        }
        if self.end_keyword.trim().is_empty() {
            return Err(Pdf2ReqifError::InvalidConfig(
                "end keyword must not be empty".into(),
            ));
        }
        for pattern in &self.extra_boilerplate {
            if let Err(e) = Regex::new(pattern) {
                return Err(Pdf2ReqifError::InvalidConfig(format!(
                    "ignore pattern '{pattern}' is not a valid regex: {e}"
                )));
            }
        }
        Ok(())
    }

    /// The section markers and capture mode as one value for the extractor.
    pub fn bounds(&self) -> SectionBounds {
        SectionBounds {
            start_keyword: self.start_keyword.clone(),
            end_keyword: self.end_keyword.clone(),
            mode: self.capture_mode,
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn start_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.config.start_keyword = keyword.into();
        self
    }

    pub fn end_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.config.end_keyword = keyword.into();
        self
    }

    /// Append one extra boilerplate regex.
    pub fn ignore_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.extra_boilerplate.push(pattern.into());
        self
    }

    /// Replace the extra boilerplate regexes.
    pub fn ignore_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.extra_boilerplate = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn capture_mode(mut self, mode: CaptureMode) -> Self {
        self.config.capture_mode = mode;
        self
    }

    pub fn indent(mut self, width: usize) -> Self {
        self.config.indent = width.min(8);
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Pdf2ReqifError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

// ── Section bounds ───────────────────────────────────────────────────────

/// Behaviour after the end keyword closes a captured section.
///
/// | Mode | After the end keyword |
/// |------|-----------------------|
/// | `FirstSection` | extraction stops; remaining pages are not scanned |
/// | `AllSections` | the rest of that page is skipped, later pages are scanned and a new start keyword re-opens capture |
///
/// `AllSections` is useful when a table of contents repeats the section
/// headings: the first capture then only picks up the TOC entry, and the
/// real section is captured when its heading appears again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CaptureMode {
    /// Stop at the first end keyword. (default)
    #[default]
    FirstSection,
    /// Keep scanning and capture every start…end section.
    AllSections,
}

/// Start/end markers and capture mode consumed by
/// [`crate::pipeline::extract::SectionExtractor`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionBounds {
    pub start_keyword: String,
    pub end_keyword: String,
    pub mode: CaptureMode,
}

impl Default for SectionBounds {
    fn default() -> Self {
        Self {
            start_keyword: DEFAULT_START_KEYWORD.to_string(),
            end_keyword: DEFAULT_END_KEYWORD.to_string(),
            mode: CaptureMode::default(),
        }
    }
}
