//! NDN Report Generator CLI
//!
//! Reads a raw NDN outage export, writes the cleaned and categorized report
//! next to it (or wherever `--output` points).

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};

use ndn_report::{ReportConfig, ReportOutput, transform};

/// NDN Report Generator - clean and categorize outage spreadsheets
#[derive(Parser, Debug)]
#[command(name = "ndn-report")]
#[command(about = "Generate the cleaned NDN outage report from a raw Excel export", long_about = None)]
#[command(version)]
struct Args {
    /// Raw NDN spreadsheet (xlsx, xls, xlsb or ods; first sheet is used)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Where to write the report (default: suggested name next to INPUT)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print a JSON summary instead of the human-readable one
    #[arg(long)]
    json: bool,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    if let Err(e) = run(&args) {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = ReportConfig::resolve(args.config.as_deref())?;

    let input = fs::read(&args.input)
        .with_context(|| format!("Failed to read input file: {}", args.input.display()))?;

    let output = transform(&input, &config)?;
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input, &output.file_name));

    fs::write(&output_path, &output.bytes)
        .with_context(|| format!("Failed to write report: {}", output_path.display()))?;
    log::info!("Report written to: {}", output_path.display());

    if args.json {
        print_json_summary(&output, &output_path)?;
    } else if !args.quiet {
        print_summary(&output, &output_path);
    }

    Ok(())
}

fn default_output_path(input: &Path, file_name: &str) -> PathBuf {
    input
        .parent()
        .map(|dir| dir.join(file_name))
        .unwrap_or_else(|| PathBuf::from(file_name))
}

fn print_summary(output: &ReportOutput, path: &Path) {
    let summary = &output.summary;

    println!("{} Report generated successfully!", "✓".green().bold());
    println!("  File: {}", path.display().to_string().cyan());
    println!(
        "  Rows: {} read, {} cancelled faults removed",
        summary.rows_read,
        summary.rows_excluded.to_string().yellow()
    );
    for sheet in &summary.sheets {
        println!("  {:<12} {:>6}", sheet.name.bold(), sheet.rows);
    }
}

fn print_json_summary(output: &ReportOutput, path: &Path) -> Result<()> {
    let json = serde_json::json!({
        "output_path": path.display().to_string(),
        "file_name": output.file_name,
        "mime_type": output.mime_type,
        "summary": output.summary,
    });
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    let mut builder = Builder::new();
    builder.filter_level(level);
    // RUST_LOG wins over the command-line flags
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    builder
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
