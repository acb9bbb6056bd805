//! Conversion entry points.
//!
//! [`convert`] runs the whole pipeline in memory, [`convert_to_file`] adds
//! the output write, and [`convert_pages`] starts from page texts that were
//! already extracted (no PDF engine needed).

use crate::config::ConversionConfig;
use crate::error::Pdf2ReqifError;
use crate::output::{ConversionOutput, ConversionReport, ConversionStats, DocumentMetadata};
use crate::pipeline::boilerplate::BoilerplateFilter;
use crate::pipeline::extract::SectionExtractor;
use crate::pipeline::{input, parse, pdf, serialize};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Convert a PDF file to ReqIF XML.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `input`  — path to a local PDF file
/// * `config` — conversion configuration
///
/// # Errors
/// Returns `Err(Pdf2ReqifError)` when the file is missing, unreadable, not a
/// PDF, encrypted without the right password, or pdfium cannot be loaded.
/// A document without the start keyword is *not* an error: the output then
/// holds zero requirements.
pub fn convert(
    input: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Pdf2ReqifError> {
    let start = Instant::now();
    config.validate()?;
    let pdf_path = input::resolve_input(input)?;
    info!("Starting conversion: {}", pdf_path.display());

    let pages = pdf::load_page_texts(&pdf_path, config.password.as_deref())?;
    let mut output = convert_pages(pages.as_slice(), config)?;
    output.stats.total_duration_ms = start.elapsed().as_millis() as u64;
    Ok(output)
}

/// Run extraction, parsing and serialisation over already-extracted page
/// texts, one string per page in document order.
pub fn convert_pages<P: AsRef<str>>(
    pages: &[P],
    config: &ConversionConfig,
) -> Result<ConversionOutput, Pdf2ReqifError> {
    let start = Instant::now();
    config.validate()?;
    let total_pages = pages.len();
    let filter = BoilerplateFilter::new(config.extra_boilerplate.as_slice())?;
    let mut extractor = SectionExtractor::new(config.bounds(), filter);

    if let Some(ref cb) = config.progress_callback {
        cb.on_extraction_start(total_pages);
    }

    // ── Step 1: Capture the section ──────────────────────────────────────
    for (idx, page) in pages.iter().enumerate() {
        if extractor.is_finished() {
            debug!("End keyword reached; skipping pages {}..={}", idx + 1, total_pages);
            break;
        }
        let scan = extractor.feed_page(page.as_ref());
        if let Some(ref cb) = config.progress_callback {
            cb.on_page_scanned(idx + 1, total_pages, scan.captured);
            if scan.closed {
                cb.on_section_closed(idx + 1);
            }
        }
    }
    let section = extractor.finish();

    if !section.found_start {
        warn!(
            "Start keyword {:?} not found; output will contain no requirements",
            config.start_keyword
        );
    } else if !section.found_end {
        warn!(
            "End keyword {:?} not found; captured through the end of the document",
            config.end_keyword
        );
    }

    // ── Step 2: Parse records ────────────────────────────────────────────
    let text = section.text();
    let requirements = parse::parse_requirements(&text);
    info!(
        "Parsed {} requirements from {} captured lines",
        requirements.len(),
        section.lines.len()
    );

    // ── Step 3: Render XML ───────────────────────────────────────────────
    let xml = serialize::to_reqif_xml(&requirements, config.indent)?;

    let stats = ConversionStats {
        total_pages,
        pages_scanned: section.pages_scanned,
        captured_lines: section.lines.len(),
        discarded_lines: section.lines_discarded,
        found_start: section.found_start,
        found_end: section.found_end,
        requirement_count: requirements.len(),
        total_duration_ms: start.elapsed().as_millis() as u64,
    };

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_complete(total_pages, requirements.len());
    }

    Ok(ConversionOutput {
        requirements,
        section: text,
        xml,
        stats,
    })
}

/// Convert a PDF and write the XML to `output_path`, creating or replacing
/// the file.
///
/// On success the report carries the path that was written.
pub fn convert_to_file(
    input: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionReport, Pdf2ReqifError> {
    let output = convert(input, config)?;
    let path = output_path.as_ref();
    serialize::write_reqif(path, &output.xml)?;

    Ok(ConversionReport {
        output_path: path.to_path_buf(),
        stats: output.stats,
    })
}

/// Extract PDF metadata without converting content.
pub fn inspect(
    input: impl AsRef<Path>,
    password: Option<&str>,
) -> Result<DocumentMetadata, Pdf2ReqifError> {
    let pdf_path = input::resolve_input(input)?;
    pdf::extract_metadata(&pdf_path, password)
}
