//! ReqIF-style XML output.
//!
//! The document is a fixed four-level tree:
//!
//! ```text
//! REQ-IF
//!  └─ REQ-IF-CONTENT
//!      └─ SPEC-OBJECTS
//!          └─ SPEC-OBJECT (one per requirement)
//!              ├─ ID
//!              ├─ Legacy-GUID
//!              ├─ CR
//!              └─ Description
//! ```
//!
//! Text nodes are escaped by `quick-xml`, so raw `<` or `&` coming out of
//! the PDF cannot break the document.

use crate::error::Pdf2ReqifError;
use crate::output::Requirement;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::{Cursor, Write};
use std::path::Path;
use tracing::{debug, info};

pub const ROOT_TAG: &str = "REQ-IF";
pub const CONTENT_TAG: &str = "REQ-IF-CONTENT";
pub const OBJECTS_TAG: &str = "SPEC-OBJECTS";
pub const OBJECT_TAG: &str = "SPEC-OBJECT";

/// Render requirements as an indented ReqIF-style XML document.
///
/// `indent` is the number of spaces per nesting level; `0` produces a
/// single-line body. Output always ends with a newline and is byte-identical
/// for identical input.
pub fn to_reqif_xml(requirements: &[Requirement], indent: usize) -> Result<String, Pdf2ReqifError> {
    let mut writer = if indent == 0 {
        Writer::new(Cursor::new(Vec::new()))
    } else {
        Writer::new_with_indent(Cursor::new(Vec::new()), b' ', indent)
    };

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new(ROOT_TAG)))?;
    writer.write_event(Event::Start(BytesStart::new(CONTENT_TAG)))?;
    writer.write_event(Event::Start(BytesStart::new(OBJECTS_TAG)))?;

    for req in requirements {
        writer.write_event(Event::Start(BytesStart::new(OBJECT_TAG)))?;
        write_leaf(&mut writer, "ID", &req.id)?;
        write_leaf(&mut writer, "Legacy-GUID", &req.legacy_guid)?;
        write_leaf(&mut writer, "CR", &req.change_request)?;
        write_leaf(&mut writer, "Description", &req.description)?;
        writer.write_event(Event::End(BytesEnd::new(OBJECT_TAG)))?;
    }

    writer.write_event(Event::End(BytesEnd::new(OBJECTS_TAG)))?;
    writer.write_event(Event::End(BytesEnd::new(CONTENT_TAG)))?;
    writer.write_event(Event::End(BytesEnd::new(ROOT_TAG)))?;

    let mut bytes = writer.into_inner().into_inner();
    bytes.push(b'\n');
    debug!("Serialised {} requirements ({} bytes)", requirements.len(), bytes.len());

    String::from_utf8(bytes).map_err(|e| Pdf2ReqifError::Internal(format!("non-UTF-8 XML: {e}")))
}

fn write_leaf<W: Write>(writer: &mut Writer<W>, tag: &str, text: &str) -> Result<(), Pdf2ReqifError> {
    let text: String = text.trim().chars().filter(|&c| is_xml_char(c)).collect();
    writer
        .create_element(tag)
        .write_text_content(BytesText::new(&text))?;
    Ok(())
}

/// `Char` production of XML 1.0; anything else makes the document malformed
/// even when escaped.
fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\t' | '\n' | '\r'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

/// Write `xml` to `path`, creating or replacing the file.
///
/// The content goes to a temp file in the destination directory first and is
/// renamed into place once fully written; on any failure the temp file is
/// removed and the destination is left untouched.
pub fn write_reqif(path: &Path, xml: &str) -> Result<(), Pdf2ReqifError> {
    let write_err = |source: std::io::Error| Pdf2ReqifError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(write_err)?;

    // Temp files default to 0600; ask for 0666 so the umask decides, as it
    // would for a plain create.
    let mut builder = tempfile::Builder::new();
    builder.prefix(".pdf2reqif-").suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder.tempfile_in(dir).map_err(write_err)?;

    // Replacing a file keeps its permissions.
    if let Ok(existing) = std::fs::metadata(path) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .map_err(write_err)?;
    }

    tmp.write_all(xml.as_bytes()).map_err(write_err)?;
    tmp.flush().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    info!("Wrote {} bytes to {}", xml.len(), path.display());
    Ok(())
}
