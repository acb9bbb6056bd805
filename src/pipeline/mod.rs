//! Pipeline stages for PDF-to-ReqIF conversion.
//!
//! Each submodule implements exactly one transformation step. Only [`pdf`]
//! touches the PDF engine; every later stage works on plain strings, which
//! keeps them testable without a PDF or a pdfium library.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ pdf ──▶ boilerplate + extract ──▶ parse ──▶ serialize
//! (path)   (pages)    (section text)        (records)   (XML file)
//! ```
//!
//! 1. [`input`]       — check the path exists, is readable and is a PDF
//! 2. [`pdf`]         — one text string per page via pdfium
//! 3. [`boilerplate`] — line cleaning and running header/footer removal
//! 4. [`extract`]     — capture lines between the start and end keywords
//! 5. [`parse`]       — segment captured lines into requirement records
//! 6. [`serialize`]   — render records as indented ReqIF XML and write it

pub mod boilerplate;
pub mod extract;
pub mod input;
pub mod parse;
pub mod pdf;
pub mod serialize;
