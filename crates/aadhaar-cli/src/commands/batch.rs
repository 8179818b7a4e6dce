//! Batch processing command for multiple card files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use aadhaar_core::models::CandidateRecord;
use aadhaar_core::{
    AadhaarParser, DocumentKind, DocumentReader, RecordParser, SqliteStore, SubmissionPipeline,
    SubmissionState, TextSource,
};

use super::process::{format_record, OutputFormat};
use super::{build_parser, build_reader, file_name, load_config, open_store};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Store each card as well as extracting it
    #[arg(long)]
    submit: bool,

    /// Record database used with --submit (default: from config)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Password for protected PDFs, tried on every PDF
    #[arg(short, long)]
    password: Option<String>,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    record: Option<CandidateRecord>,
    status: String,
    error: Option<String>,
    processing_time_ms: u64,
}

type Pipeline<'a> = SubmissionPipeline<SqliteStore, &'a DocumentReader>;

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    // Expand glob pattern, keeping only accepted upload types
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| DocumentKind::from_filename(&file_name(p)).is_ok())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let reader = build_reader(&config);
    let parser = build_parser(&config);
    let pipeline = if args.submit {
        let store = open_store(args.db.as_deref(), &config)?;
        Some(SubmissionPipeline::new(store, &reader).with_parser(parser.clone()))
    } else {
        None
    };

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let result = process_single_file(&path, &reader, &parser, pipeline.as_ref(), &args);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok((record, status)) => results.push(ProcessResult {
                path,
                record: Some(record),
                status,
                error: None,
                processing_time_ms,
            }),
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path,
                        record: None,
                        status: "error".to_string(),
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    overall_pb.abandon();
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_with_message("Complete");

    let successful: Vec<_> = results.iter().filter(|r| r.record.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    if let Some(output_dir) = &args.output_dir {
        for result in &successful {
            if let Some(record) = &result.record {
                write_output(output_dir, &result.path, record, args.format)?;
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Extract one file, submitting it when a pipeline is given.
fn process_single_file(
    path: &Path,
    reader: &DocumentReader,
    parser: &AadhaarParser,
    pipeline: Option<&Pipeline<'_>>,
    args: &BatchArgs,
) -> anyhow::Result<(CandidateRecord, String)> {
    let data = fs::read(path)?;
    let text = reader.acquire_text(&data, &file_name(path), args.password.as_deref())?;

    match pipeline {
        Some(pipeline) => {
            let report = pipeline.submit_text(&text)?;
            Ok((report.record.record, report.state.to_string()))
        }
        None => {
            let result = parser.parse(&text);
            for warning in &result.warnings {
                debug!("{}: {}", path.display(), warning);
            }
            Ok((result.record, SubmissionState::Extracted.to_string()))
        }
    }
}

fn write_output(
    output_dir: &Path,
    path: &Path,
    record: &CandidateRecord,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let output_name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("card");

    let extension = match format {
        OutputFormat::Json => "json",
        OutputFormat::Csv => "csv",
        OutputFormat::Text => "txt",
    };

    let output_path = output_dir.join(format!("{}.{}", output_name, extension));
    fs::write(&output_path, format_record(record, format)?)?;
    debug!("Wrote output to {}", output_path.display());
    Ok(())
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "identifier",
        "name",
        "date_of_birth",
        "gender",
        "district",
        "state",
        "pincode",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let time = result.processing_time_ms.to_string();

        if let Some(record) = &result.record {
            wtr.write_record([
                filename,
                &result.status,
                &record.identifier,
                &record.name,
                record.date_of_birth.as_deref().unwrap_or(""),
                record.gender.map(|g| g.as_str()).unwrap_or(""),
                record.district.as_deref().unwrap_or(""),
                record.state.as_deref().unwrap_or(""),
                record.pincode.as_deref().unwrap_or(""),
                &time,
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                &result.status,
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                &time,
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
