//! # pdf2reqif
//!
//! Extract the requirements section of a PDF specification and write it as a
//! ReqIF-style XML file.
//!
//! The source documents list requirements as
//!
//! ```text
//! ID: 101 / Legacy GUID: ABC-1 / CR: 55
//! The system shall encrypt data at rest.
//! ```
//!
//! between a `3 Requirements` heading and a `4 Notes` heading, with running
//! headers and footers on every page. This crate strips the boilerplate,
//! captures the section, segments it into records and renders them as XML.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input      validate path and %PDF magic
//!  ├─ 2. Text       one string per page via pdfium
//!  ├─ 3. Extract    drop boilerplate, capture start…end keyword section
//!  ├─ 4. Parse      ordered line rules → Requirement records
//!  └─ 5. Serialize  indented REQ-IF XML, written atomically
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2reqif::{convert_to_file, ConversionConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::default();
//!     let report = convert_to_file("CYS1600.pdf", "CYS1600.reqif", &config)?;
//!     eprintln!("{} requirements → {}",
//!         report.stats.requirement_count,
//!         report.output_path.display());
//!     Ok(())
//! }
//! ```
//!
//! Text that was already extracted can be converted without pdfium:
//!
//! ```rust
//! use pdf2reqif::{convert_pages, ConversionConfig};
//!
//! let pages = ["3 Requirements\nID: 5\nThe system shall boot.\n4 Notes"];
//! let output = convert_pages(&pages, &ConversionConfig::default()).unwrap();
//! assert_eq!(output.requirements[0].id, "5");
//! assert_eq!(output.requirements[0].legacy_guid, "N/A");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2reqif` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{CaptureMode, ConversionConfig, ConversionConfigBuilder, SectionBounds};
pub use convert::{convert, convert_pages, convert_to_file, inspect};
pub use error::Pdf2ReqifError;
pub use output::{
    ConversionOutput, ConversionReport, ConversionStats, DocumentMetadata, Requirement,
    NOT_AVAILABLE,
};
pub use pipeline::extract::{extract_section, Section};
pub use pipeline::parse::parse_requirements;
pub use pipeline::serialize::{to_reqif_xml, write_reqif};
pub use progress::{ExtractionProgressCallback, NoopProgressCallback, ProgressCallback};
