//! CLI binary for pdf2reqif.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf2reqif::{
    convert, convert_to_file, inspect, write_reqif, CaptureMode, ConversionConfig,
    ExtractionProgressCallback, ProgressCallback,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"];

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a page bar plus one log line per page that
/// contributed lines to the section.
struct CliProgressCallback {
    bar: ProgressBar,
    /// Lines captured so far, across all pages.
    captured: AtomicUsize,
}

impl CliProgressCallback {
    /// Spinner until `on_extraction_start` tells us the page count.
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(TICKS);

        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Reading PDF text…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            captured: AtomicUsize::new(0),
        })
    }

    fn activate_bar(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} pages  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(TICKS);

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Scanning");
        self.bar.set_message("");
    }
}

impl ExtractionProgressCallback for CliProgressCallback {
    fn on_extraction_start(&self, total_pages: usize) {
        self.activate_bar(total_pages);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Scanning {total_pages} pages for the requirements section…"))
        ));
    }

    fn on_page_scanned(&self, page_num: usize, total_pages: usize, captured_lines: usize) {
        let so_far = self.captured.fetch_add(captured_lines, Ordering::SeqCst) + captured_lines;
        if captured_lines > 0 {
            self.bar.println(format!(
                "  {} Page {:>3}/{:<3}  {}",
                green("✓"),
                page_num,
                total_pages,
                dim(&format!("{captured_lines:>4} lines")),
            ));
        }
        self.bar.set_message(format!("{so_far} lines captured"));
        self.bar.inc(1);
    }

    fn on_section_closed(&self, page_num: usize) {
        self.bar.println(format!(
            "  {} end keyword on page {page_num}",
            cyan("■")
        ));
    }

    fn on_conversion_complete(&self, _total_pages: usize, requirement_count: usize) {
        self.bar.finish_and_clear();
        eprintln!(
            "{} {} requirements parsed",
            green("✔"),
            bold(&requirement_count.to_string())
        );
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Print ReqIF XML to stdout
  pdf2reqif CYS1600.pdf

  # Write to a file
  pdf2reqif CYS1600.pdf -o CYS1600.reqif

  # Different section headings
  pdf2reqif --start-keyword "5 Requirements" --end-keyword "6 Appendix" document.pdf

  # Drop an extra running header
  pdf2reqif --ignore-pattern "^ACME Internal" document.pdf -o document.reqif

  # The headings also appear in a table of contents
  pdf2reqif --all-sections document.pdf -o document.reqif

  # Show what was captured before parsing
  pdf2reqif --section-only document.pdf

  # Records and statistics as JSON
  pdf2reqif --json document.pdf > document.json

  # Inspect PDF metadata
  pdf2reqif --inspect-only document.pdf

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH         Path to libpdfium; otherwise ./ and the system path are tried
  RUST_LOG                Override the log filter (e.g. pdf2reqif=debug)
  PDF2REQIF_*             Every flag, e.g. PDF2REQIF_START_KEYWORD
"#;

/// Extract the requirements section of a PDF into ReqIF XML.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2reqif",
    version,
    about = "Extract the requirements section of a PDF into ReqIF XML",
    long_about = "Read a PDF specification, drop running headers and footers, capture the \
lines between the start and end keywords, segment them into ID / Legacy GUID / CR records \
and write them as an indented ReqIF XML document.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local PDF file path.
    input: PathBuf,

    /// Write XML to this file instead of stdout.
    #[arg(short, long, env = "PDF2REQIF_OUTPUT")]
    output: Option<PathBuf>,

    /// Line that opens the requirements section.
    #[arg(long, env = "PDF2REQIF_START_KEYWORD", default_value = pdf2reqif::config::DEFAULT_START_KEYWORD)]
    start_keyword: String,

    /// Line that closes the requirements section.
    #[arg(long, env = "PDF2REQIF_END_KEYWORD", default_value = pdf2reqif::config::DEFAULT_END_KEYWORD)]
    end_keyword: String,

    /// Extra boilerplate regex, matched at the start of each line (repeatable).
    #[arg(long = "ignore-pattern", env = "PDF2REQIF_IGNORE_PATTERN")]
    ignore_patterns: Vec<String>,

    /// Keep scanning after the end keyword and capture every section.
    #[arg(long, env = "PDF2REQIF_ALL_SECTIONS")]
    all_sections: bool,

    /// XML indent width in spaces (0 = single line, max 8).
    #[arg(long, env = "PDF2REQIF_INDENT", default_value_t = pdf2reqif::config::DEFAULT_INDENT as u8,
          value_parser = clap::value_parser!(u8).range(0..=8))]
    indent: u8,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "PDF2REQIF_PASSWORD")]
    password: Option<String>,

    /// Output structured JSON (ConversionOutput) instead of XML.
    #[arg(long, env = "PDF2REQIF_JSON")]
    json: bool,

    /// Print the captured section text instead of XML.
    #[arg(long, env = "PDF2REQIF_SECTION_ONLY", conflicts_with = "json")]
    section_only: bool,

    /// Print PDF metadata only, no conversion.
    #[arg(long)]
    inspect_only: bool,

    /// Disable progress bar.
    #[arg(long, env = "PDF2REQIF_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2REQIF_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDF2REQIF_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar replaces INFO-level library logs.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json && !cli.inspect_only;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let meta = inspect(&cli.input, cli.password.as_deref()).context("Failed to inspect PDF")?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&meta).context("Failed to serialize metadata")?
            );
        } else {
            println!("File:         {}", cli.input.display());
            if let Some(ref t) = meta.title {
                println!("Title:        {}", t);
            }
            if let Some(ref a) = meta.author {
                println!("Author:       {}", a);
            }
            if let Some(ref s) = meta.subject {
                println!("Subject:      {}", s);
            }
            println!("Pages:        {}", meta.page_count);
            println!("PDF Version:  {}", meta.pdf_version);
            if let Some(ref p) = meta.producer {
                println!("Producer:     {}", p);
            }
            if let Some(ref c) = meta.creator {
                println!("Creator:      {}", c);
            }
        }
        return Ok(());
    }

    let progress_cb: Option<ProgressCallback> = if show_progress {
        let cb = CliProgressCallback::new_dynamic();
        Some(cb as Arc<dyn ExtractionProgressCallback>)
    } else {
        None
    };

    let config = build_config(&cli, progress_cb)?;

    // ── Run conversion ───────────────────────────────────────────────────
    if let Some(ref output_path) = cli.output {
        if !cli.json && !cli.section_only {
            let report =
                convert_to_file(&cli.input, output_path, &config).context("Conversion failed")?;
            if !cli.quiet {
                eprintln!(
                    "{}  {} requirements  {}ms  →  {}",
                    green("✔"),
                    report.stats.requirement_count,
                    report.stats.total_duration_ms,
                    bold(&report.output_path.display().to_string()),
                );
            }
            return Ok(());
        }
    }

    let output = convert(&cli.input, &config).context("Conversion failed")?;

    let body = if cli.json {
        serde_json::to_string_pretty(&output).context("Failed to serialise output")?
    } else if cli.section_only {
        output.section.clone()
    } else {
        output.xml.clone()
    };

    match cli.output {
        Some(ref path) => {
            write_reqif(path, &body)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(body.as_bytes())
                .context("Failed to write to stdout")?;
            if !body.ends_with('\n') {
                handle.write_all(b"\n").ok();
            }
        }
    }

    if !cli.quiet && !show_progress {
        eprintln!(
            "Parsed {} requirements from {}/{} pages in {}ms",
            output.stats.requirement_count,
            output.stats.pages_scanned,
            output.stats.total_pages,
            output.stats.total_duration_ms
        );
        if !output.stats.found_start {
            eprintln!(
                "  {}",
                dim(&format!("start keyword {:?} not found", config.start_keyword))
            );
        }
    }

    Ok(())
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ConversionConfig> {
    let mode = if cli.all_sections {
        CaptureMode::AllSections
    } else {
        CaptureMode::FirstSection
    };

    let mut builder = ConversionConfig::builder()
        .start_keyword(cli.start_keyword.as_str())
        .end_keyword(cli.end_keyword.as_str())
        .ignore_patterns(cli.ignore_patterns.iter().cloned())
        .capture_mode(mode)
        .indent(cli.indent as usize);

    if let Some(ref pwd) = cli.password {
        builder = builder.password(pwd.as_str());
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}
