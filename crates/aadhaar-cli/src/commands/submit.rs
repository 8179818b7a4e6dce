//! Submit command - extract, validate and store a single card.

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::{info, warn};

use aadhaar_core::{ErrorKind, Rejection, SubmissionPipeline, SubmissionState};

use super::{build_parser, build_reader, file_name, load_config, open_store, read_input};

/// Arguments for the submit command.
#[derive(Args)]
pub struct SubmitArgs {
    /// Input file (PDF, image or OCR text)
    #[arg(required = true)]
    input: PathBuf,

    /// Password for protected PDFs
    #[arg(short, long)]
    password: Option<String>,

    /// Record database (default: from config)
    #[arg(long)]
    db: Option<PathBuf>,
}

pub async fn run(args: SubmitArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let data = read_input(&args.input)?;

    let store = open_store(args.db.as_deref(), &config)?;
    let pipeline = SubmissionPipeline::new(store, build_reader(&config))
        .with_parser(build_parser(&config));

    info!("Submitting {}", args.input.display());

    let report = match pipeline.submit(&data, &file_name(&args.input), args.password.as_deref()) {
        Ok(report) => report,
        Err(e) => {
            warn!("Submission failed ({:?}): {}", e.kind(), e);
            return Err(match (e.rejection(), e.kind()) {
                (Some(rejection @ Rejection::DuplicateRace), _) => anyhow::anyhow!(
                    "{}: {}, submit again to update the record",
                    SubmissionState::Rejected(rejection),
                    e
                ),
                (Some(_), _) | (None, ErrorKind::ClientInput) => {
                    anyhow::anyhow!("Rejected: {}", e)
                }
                (None, _) => e.into(),
            });
        }
    };

    for warning in &report.warnings {
        eprintln!("{} {}", style("ℹ").blue(), warning);
    }

    println!("{}", serde_json::to_string_pretty(&report)?);

    eprintln!(
        "{} Record {} {}",
        style("✓").green(),
        report.identifier,
        report.state
    );

    Ok(())
}
