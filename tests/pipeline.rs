//! Integration tests for the public API.
//!
//! Everything except the last group runs on in-memory page texts, so no
//! pdfium library is needed. The `e2e_*` tests convert a real PDF and only
//! run when `PDF2REQIF_E2E` names one:
//!
//! ```bash
//! PDF2REQIF_E2E=path/to/CYS1600.pdf cargo test --test pipeline -- --nocapture
//! ```

use pdf2reqif::{
    convert, convert_pages, convert_to_file, inspect, parse_requirements, to_reqif_xml,
    write_reqif, CaptureMode, ConversionConfig, ExtractionProgressCallback, Pdf2ReqifError,
    Requirement, NOT_AVAILABLE,
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const FIXTURE: &str = "3 Requirements
ID: 101 / Legacy GUID: ABC-1 / CR: 55
The system shall encrypt data at rest.
ID: 102
Legacy GUID: XYZ-2
CR: 77
The system shall log all access attempts.
4 Notes";

fn req(id: &str, guid: &str, cr: &str, description: &str) -> Requirement {
    Requirement {
        id: id.into(),
        legacy_guid: guid.into(),
        change_request: cr.into(),
        description: description.into(),
    }
}

fn object_count(xml: &str) -> usize {
    xml.matches("<SPEC-OBJECT>").count()
}

// ── Record parsing ───────────────────────────────────────────────────────

#[test]
fn fixture_yields_exactly_two_records() {
    let out = convert_pages(&[FIXTURE], &ConversionConfig::default()).unwrap();
    assert_eq!(
        out.requirements,
        vec![
            req("101", "ABC-1", "55", "The system shall encrypt data at rest."),
            req("102", "XYZ-2", "77", "The system shall log all access attempts."),
        ]
    );
    assert_eq!(object_count(&out.xml), 2);
    assert!(out.stats.found_start && out.stats.found_end);
}

#[test]
fn fixture_split_across_pages_gives_same_records() {
    let pages = [
        "3 Requirements\nID: 101 / Legacy GUID: ABC-1 / CR: 55\nThe system shall",
        "encrypt data at rest.\nID: 102\nLegacy GUID: XYZ-2",
        "CR: 77\nThe system shall log all access attempts.\n4 Notes",
    ];
    let out = convert_pages(&pages, &ConversionConfig::default()).unwrap();
    assert_eq!(out.requirements.len(), 2);
    assert_eq!(
        out.requirements[0].description,
        "The system shall encrypt data at rest."
    );
    assert_eq!(out.requirements[1].change_request, "77");
}

#[test]
fn missing_start_keyword_gives_empty_document() {
    let pages = ["1 Introduction\nID: 9\nNot in a requirements section"];
    let out = convert_pages(&pages, &ConversionConfig::default()).unwrap();
    assert!(out.requirements.is_empty());
    assert!(!out.stats.found_start);
    assert_eq!(object_count(&out.xml), 0);
    assert!(out.xml.starts_with("<?xml"));
    assert!(out.xml.contains("<SPEC-OBJECTS"));
}

#[test]
fn bare_id_header_gets_sentinels() {
    let out = convert_pages(
        &["3 Requirements\nID: 5\nBoots.\n4 Notes"],
        &ConversionConfig::default(),
    )
    .unwrap();
    let r = &out.requirements[0];
    assert_eq!(r.id, "5");
    assert_eq!(r.legacy_guid, NOT_AVAILABLE);
    assert_eq!(r.change_request, NOT_AVAILABLE);
    assert!(out.xml.contains("<Legacy-GUID>N/A</Legacy-GUID>"));
}

#[test]
fn boilerplate_never_reaches_records() {
    let pages = [
        "GM Confidential\n3 Requirements\nID: 1\nFirst part\nPage: 3 of 10",
        "GM Confidential\nsecond part\nPage: 4 of 10\n4 Notes",
    ];
    let out = convert_pages(&pages, &ConversionConfig::default()).unwrap();
    assert!(!out.section.contains("Page: 3 of 10"));
    assert!(!out.section.contains("GM Confidential"));
    assert_eq!(out.requirements[0].description, "First part second part");
    assert!(!out.xml.contains("Confidential"));
}

#[test]
fn control_characters_in_page_text_are_dropped() {
    let pages = ["3 Requirements\nID: 1\nThe system shall\u{c} boot\u{2}ing.\n4 Notes"];
    let out = convert_pages(&pages, &ConversionConfig::default()).unwrap();
    assert_eq!(out.requirements[0].description, "The system shall booting.");
    assert!(!out.xml.chars().any(|c| c.is_control() && c != '\n'));
}

#[test]
fn description_lines_join_in_order() {
    let text = "ID: 7\n  one  \ntwo\n\tthree\n";
    let records = parse_requirements(text);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].description, "one two three");
}

#[test]
fn every_record_has_an_id() {
    let text = "stray line\nID: 1\na\nLegacy GUID: G\nID: 2 / CR: 3\nb\nCR: 4";
    for r in parse_requirements(text) {
        assert!(!r.id.is_empty());
    }
}

// ── Capture modes ────────────────────────────────────────────────────────

#[test]
fn table_of_contents_needs_all_sections() {
    let pages = [
        "Contents\n3 Requirements\n4 Notes",
        "3 Requirements\nID: 11\nReal requirement.\n4 Notes",
    ];

    let first = convert_pages(&pages, &ConversionConfig::default()).unwrap();
    assert!(first.requirements.is_empty());

    let config = ConversionConfig::builder()
        .capture_mode(CaptureMode::AllSections)
        .build()
        .unwrap();
    let all = convert_pages(&pages, &config).unwrap();
    assert_eq!(all.requirements, vec![req("11", "N/A", "N/A", "Real requirement.")]);
}

#[test]
fn custom_keywords_are_honoured() {
    let config = ConversionConfig::builder()
        .start_keyword("5 Requirements")
        .end_keyword("6 Appendix")
        .build()
        .unwrap();
    let pages = ["3 Requirements\nID: 1\nx\n5 Requirements\nID: 2\ny\n6 Appendix"];
    let out = convert_pages(&pages, &config).unwrap();
    assert_eq!(out.requirements.len(), 1);
    assert_eq!(out.requirements[0].id, "2");
}

// ── Serialisation and output ─────────────────────────────────────────────

#[test]
fn serialising_twice_is_byte_identical() {
    let out = convert_pages(&[FIXTURE], &ConversionConfig::default()).unwrap();
    let again = to_reqif_xml(&out.requirements, 2).unwrap();
    assert_eq!(out.xml, again);
}

#[test]
fn write_reqif_creates_and_replaces() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("out.reqif");

    write_reqif(&path, "first").unwrap();
    let out = convert_pages(&[FIXTURE], &ConversionConfig::default()).unwrap();
    write_reqif(&path, &out.xml).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), out.xml);
}

#[test]
fn progress_callback_sees_every_page() {
    #[derive(Default)]
    struct Counter {
        pages: AtomicUsize,
        closed: AtomicUsize,
        records: AtomicUsize,
    }
    impl ExtractionProgressCallback for Counter {
        fn on_page_scanned(&self, _page: usize, _total: usize, _lines: usize) {
            self.pages.fetch_add(1, Ordering::SeqCst);
        }
        fn on_section_closed(&self, _page: usize) {
            self.closed.fetch_add(1, Ordering::SeqCst);
        }
        fn on_conversion_complete(&self, _total: usize, requirement_count: usize) {
            self.records.store(requirement_count, Ordering::SeqCst);
        }
    }

    let counter = Arc::new(Counter::default());
    let config = ConversionConfig::builder()
        .progress_callback(counter.clone())
        .build()
        .unwrap();
    let pages = ["Cover", FIXTURE, "Appendix"];
    convert_pages(&pages, &config).unwrap();

    // The appendix page is never scanned once the section has closed.
    assert_eq!(counter.pages.load(Ordering::SeqCst), 2);
    assert_eq!(counter.closed.load(Ordering::SeqCst), 1);
    assert_eq!(counter.records.load(Ordering::SeqCst), 2);
}

#[test]
fn invalid_ignore_pattern_is_rejected() {
    let err = ConversionConfig::builder()
        .ignore_pattern("(unclosed")
        .build()
        .unwrap_err();
    assert!(matches!(err, Pdf2ReqifError::InvalidConfig(_)));
}

// ── Input errors ─────────────────────────────────────────────────────────

#[test]
fn missing_input_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.pdf");
    let out = dir.path().join("out.reqif");

    let err = convert_to_file(&missing, &out, &ConversionConfig::default()).unwrap_err();
    assert!(matches!(err, Pdf2ReqifError::InputNotFound { .. }));
    assert!(!out.exists());
}

#[test]
fn non_pdf_input_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("readme.pdf");
    std::fs::write(&path, "plain text").unwrap();

    let err = convert(&path, &ConversionConfig::default()).unwrap_err();
    assert!(matches!(err, Pdf2ReqifError::NotAPdf { .. }));
}

// ── Real PDFs (opt-in) ───────────────────────────────────────────────────

fn e2e_pdf() -> Option<PathBuf> {
    let path = PathBuf::from(std::env::var("PDF2REQIF_E2E").ok()?);
    if path.exists() {
        Some(path)
    } else {
        eprintln!("PDF2REQIF_E2E points at a missing file: {}", path.display());
        None
    }
}

#[test]
fn e2e_convert_to_file() {
    let Some(pdf) = e2e_pdf() else {
        eprintln!("skipping: PDF2REQIF_E2E not set");
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter("pdf2reqif=debug")
        .with_test_writer()
        .try_init();

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.reqif");
    let report = convert_to_file(&pdf, &out, &ConversionConfig::default()).unwrap();

    let xml = std::fs::read_to_string(&report.output_path).unwrap();
    assert_eq!(object_count(&xml), report.stats.requirement_count);
    assert!(report.stats.total_pages > 0);
    eprintln!("{:#?}", report.stats);
}

#[test]
fn e2e_inspect() {
    let Some(pdf) = e2e_pdf() else {
        eprintln!("skipping: PDF2REQIF_E2E not set");
        return;
    };
    let meta = inspect(&pdf, None).unwrap();
    assert!(meta.page_count > 0);
}
