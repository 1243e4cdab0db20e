//! Process command - extract line items from a single document.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use bidsheet_core::models::config::BidsheetConfig;
use bidsheet_core::parser::{PageScanner, ScanReport};
use bidsheet_core::pdf::read_pages;
use bidsheet_core::report::{render, ReportFormat};

use super::config::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF, or pre-extracted text with form-feed page breaks)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: next to the input, extension from the format)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the report to stdout instead of writing a file
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Output format (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    #[command(flatten)]
    scanner: ScannerOverrides,

    /// Show scan statistics
    #[arg(long)]
    show_stats: bool,
}

/// Command-line overrides for the page scanner settings.
#[derive(Args, Default)]
pub struct ScannerOverrides {
    /// Text marking the item table header
    #[arg(long)]
    start_marker: Option<String>,

    /// Text ending the item table (repeatable)
    #[arg(long = "end-marker")]
    end_markers: Vec<String>,

    /// Only accept units glued to their numbers (5EA, 12.50/EA)
    #[arg(long)]
    glued_units_only: bool,
}

impl ScannerOverrides {
    /// Apply the overrides on top of a loaded configuration.
    pub fn apply(&self, config: &mut BidsheetConfig) {
        if let Some(start) = &self.start_marker {
            config.scanner.start_marker = start.clone();
        }
        if !self.end_markers.is_empty() {
            config.scanner.end_markers = self.end_markers.clone();
        }
        if self.glued_units_only {
            config.scanner.detached_units = false;
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// CSV report (opens in any spreadsheet)
    Csv,
    /// JSON output
    Json,
    /// Plain text table
    Text,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Csv => ReportFormat::Csv,
            OutputFormat::Json => ReportFormat::Json,
            OutputFormat::Text => ReportFormat::Text,
        }
    }
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    args.scanner.apply(&mut config);

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let format = args
        .format
        .map(ReportFormat::from)
        .unwrap_or(config.output.format);

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );

    pb.set_message("Reading document...");
    pb.set_position(10);
    let report = scan_file(&args.input, &config)?;

    pb.set_message("Rendering report...");
    pb.set_position(80);
    let output = render(&report.items, format)?;

    pb.finish_and_clear();

    for warning in &report.warnings {
        warn!("{}: {}", args.input.display(), warning);
    }

    if args.stdout {
        print!("{}", output);
    } else {
        let output_path = args
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&args.input, format));
        fs::write(&output_path, &output)?;
        println!(
            "{} {} line items written to {}",
            style("✓").green(),
            report.items.len(),
            output_path.display()
        );
    }

    if report.items.is_empty() {
        eprintln!(
            "{} No line items found in {}",
            style("!").yellow(),
            args.input.display()
        );
    }

    if args.show_stats {
        print_stats(&report);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Read a document's pages and scan them with the configured scanner.
pub fn scan_file(path: &Path, config: &BidsheetConfig) -> anyhow::Result<ScanReport> {
    let pages = read_pages(path, &config.pdf)?;
    debug!("{} has {} pages", path.display(), pages.len());

    let scanner = PageScanner::from_config(&config.scanner);
    Ok(scanner.scan_document(&pages))
}

/// Report path next to the input, never overwriting the input itself.
pub fn default_output_path(input: &Path, format: ReportFormat) -> PathBuf {
    let candidate = input.with_extension(format.extension());
    if candidate != input {
        return candidate;
    }

    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("items");
    input.with_file_name(format!("{}.items.{}", stem, format.extension()))
}

fn print_stats(report: &ScanReport) {
    eprintln!();
    eprintln!(
        "{} Pages: {} ({} with an item table)",
        style("ℹ").blue(),
        report.page_count,
        report.table_pages.len()
    );
    eprintln!(
        "{} Line items: {} ({} continuation lines folded, {} lines dropped)",
        style("ℹ").blue(),
        report.items.len(),
        report.continuation_lines,
        report.dropped_lines
    );
    eprintln!(
        "{} {} ms to parse document",
        style("ℹ").blue(),
        report.processing_time_ms
    );
}
