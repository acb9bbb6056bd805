//! Error types for the pdf2reqif library.
//!
//! Every failure that aborts a run is a [`Pdf2ReqifError`]. Two conditions
//! are *not* errors:
//!
//! * a document without the start keyword produces zero requirements and an
//!   empty (but well-formed) ReqIF document;
//! * lines that match no record pattern are dropped by the parser.
//!
//! Both are logged at `warn`/`debug` level instead, so callers can still see
//! what happened without losing the output.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdf2reqif library.
#[derive(Debug, Error)]
pub enum Pdf2ReqifError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    InputNotFound { path: PathBuf },

    /// The file exists but could not be opened or read.
    #[error("Cannot read '{path}': {source}")]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// pdfium could not parse the document.
    #[error("PDF '{path}' is corrupt: {detail}\nTry repairing with: qpdf input.pdf output.pdf")]
    CorruptPdf { path: PathBuf, detail: String },

    /// PDF requires a password but none was provided.
    #[error("PDF '{path}' is encrypted and requires a password.\nProvide it with --password <PASSWORD>.")]
    PasswordRequired { path: PathBuf },

    /// A password was provided but it is wrong.
    #[error("Wrong password for PDF '{path}'")]
    WrongPassword { path: PathBuf },

    /// Text extraction failed for a specific page.
    #[error("Text extraction failed for page {page}: {detail}")]
    PageTextFailed { page: usize, detail: String },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create or write the output ReqIF file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The XML writer rejected an event.
    #[error("XML serialisation failed: {0}")]
    Xml(String),

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Pdfium binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
Install libpdfium from https://github.com/bblanchon/pdfium-binaries and either\n\
  • place it on the system library search path, or\n\
  • set PDFIUM_LIB_PATH=/path/to/libpdfium.\n"
    )]
    PdfiumBindingFailed(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<quick_xml::Error> for Pdf2ReqifError {
    fn from(e: quick_xml::Error) -> Self {
        Pdf2ReqifError::Xml(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_not_found_display() {
        let e = Pdf2ReqifError::InputNotFound {
            path: PathBuf::from("/tmp/missing.pdf"),
        };
        let msg = e.to_string();
        assert!(msg.contains("/tmp/missing.pdf"), "got: {msg}");
    }

    #[test]
    fn output_write_failed_keeps_source() {
        use std::error::Error as _;

        let e = Pdf2ReqifError::OutputWriteFailed {
            path: PathBuf::from("/root/out.reqif"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(e.to_string().contains("/root/out.reqif"));
        assert!(e.source().is_some());
    }

    #[test]
    fn invalid_config_display() {
        let e = Pdf2ReqifError::InvalidConfig("start keyword must not be empty".into());
        assert!(e.to_string().contains("start keyword"));
    }

    #[test]
    fn page_text_failed_display() {
        let e = Pdf2ReqifError::PageTextFailed {
            page: 7,
            detail: "boom".into(),
        };
        assert!(e.to_string().contains("page 7"));
    }
}
