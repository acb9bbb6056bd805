//! Page text via pdfium.
//!
//! pdfium does the hard part of PDF text extraction (fonts, encodings,
//! content-stream ordering); this module only binds the library, opens the
//! document, and returns one string per page. Everything downstream works on
//! plain strings and never touches pdfium.
//!
//! ## Library lookup
//!
//! 1. `PDFIUM_LIB_PATH` — explicit path to `libpdfium.{so,dylib}` / `pdfium.dll`
//! 2. the current directory
//! 3. the system library search path

use crate::error::Pdf2ReqifError;
use crate::output::DocumentMetadata;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming an explicit pdfium library file.
pub const PDFIUM_LIB_PATH_ENV: &str = "PDFIUM_LIB_PATH";

/// Bind to a pdfium shared library.
pub fn bind_pdfium() -> Result<Pdfium, Pdf2ReqifError> {
    if let Ok(env_path) = std::env::var(PDFIUM_LIB_PATH_ENV) {
        let path = PathBuf::from(env_path);
        return Pdfium::bind_to_library(&path)
            .map(Pdfium::new)
            .map_err(|e| {
                Pdf2ReqifError::PdfiumBindingFailed(format!("{}: {e}", path.display()))
            });
    }

    let local = Pdfium::pdfium_platform_library_name_at_path("./");
    let bindings = Pdfium::bind_to_library(&local)
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|e| Pdf2ReqifError::PdfiumBindingFailed(e.to_string()))?;
    debug!("Bound pdfium library");
    Ok(Pdfium::new(bindings))
}

/// Map a pdfium load error onto the library's error type.
fn load_error(pdf_path: &Path, password: Option<&str>, e: PdfiumError) -> Pdf2ReqifError {
    let err_str = format!("{:?}", e);
    if err_str.contains("Password") || err_str.contains("password") {
        if password.is_some() {
            Pdf2ReqifError::WrongPassword {
                path: pdf_path.to_path_buf(),
            }
        } else {
            Pdf2ReqifError::PasswordRequired {
                path: pdf_path.to_path_buf(),
            }
        }
    } else {
        Pdf2ReqifError::CorruptPdf {
            path: pdf_path.to_path_buf(),
            detail: err_str,
        }
    }
}

/// Read the plain text of every page, in page order.
pub fn load_page_texts(
    pdf_path: &Path,
    password: Option<&str>,
) -> Result<Vec<String>, Pdf2ReqifError> {
    let pdfium = bind_pdfium()?;
    let document = pdfium
        .load_pdf_from_file(pdf_path, password)
        .map_err(|e| load_error(pdf_path, password, e))?;

    let pages = document.pages();
    info!("PDF loaded: {} pages", pages.len());

    let mut texts = Vec::with_capacity(pages.len() as usize);
    for (idx, page) in pages.iter().enumerate() {
        let text = page
            .text()
            .map_err(|e| Pdf2ReqifError::PageTextFailed {
                page: idx + 1,
                detail: format!("{:?}", e),
            })?
            .all();
        debug!("Page {}: {} chars of text", idx + 1, text.len());
        texts.push(text);
    }

    Ok(texts)
}

/// Extract document metadata without reading page text.
pub fn extract_metadata(
    pdf_path: &Path,
    password: Option<&str>,
) -> Result<DocumentMetadata, Pdf2ReqifError> {
    let pdfium = bind_pdfium()?;
    let document = pdfium
        .load_pdf_from_file(pdf_path, password)
        .map_err(|e| load_error(pdf_path, password, e))?;

    let metadata = document.metadata();
    let get_meta = |tag: PdfDocumentMetadataTagType| -> Option<String> {
        metadata.get(tag).and_then(|t| {
            let v = t.value().to_string();
            if v.is_empty() {
                None
            } else {
                Some(v)
            }
        })
    };

    Ok(DocumentMetadata {
        title: get_meta(PdfDocumentMetadataTagType::Title),
        author: get_meta(PdfDocumentMetadataTagType::Author),
        subject: get_meta(PdfDocumentMetadataTagType::Subject),
        creator: get_meta(PdfDocumentMetadataTagType::Creator),
        producer: get_meta(PdfDocumentMetadataTagType::Producer),
        page_count: document.pages().len() as usize,
        pdf_version: format!("{:?}", document.version()),
    })
}
