//! Input validation: make sure the path names a readable PDF before pdfium
//! ever sees it.
//!
//! pdfium reports a missing file, a permission problem and a non-PDF file
//! with the same generic load error. Checking up front lets us tell the user
//! which of the three it is.

use crate::error::Pdf2ReqifError;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Validate that `input` exists, is readable and starts with `%PDF`.
pub fn resolve_input(input: impl AsRef<Path>) -> Result<PathBuf, Pdf2ReqifError> {
    let path = input.as_ref().to_path_buf();

    if !path.exists() {
        return Err(Pdf2ReqifError::InputNotFound { path });
    }

    let mut file = match std::fs::File::open(&path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Pdf2ReqifError::InputNotFound { path });
        }
        Err(source) => return Err(Pdf2ReqifError::InputUnreadable { path, source }),
    };

    let mut magic = [0u8; 4];
    if let Err(source) = file.read_exact(&mut magic) {
        if source.kind() == std::io::ErrorKind::UnexpectedEof {
            return Err(Pdf2ReqifError::NotAPdf { path, magic });
        }
        return Err(Pdf2ReqifError::InputUnreadable { path, source });
    }
    if &magic != b"%PDF" {
        return Err(Pdf2ReqifError::NotAPdf { path, magic });
    }

    debug!("Resolved local PDF: {}", path.display());
    Ok(path)
}
