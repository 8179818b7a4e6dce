//! Process command - extract fields from a single card without storing them.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use aadhaar_core::models::CandidateRecord;
use aadhaar_core::{validate, RecordParser, TextSource};

use super::{build_parser, build_reader, file_name, load_config, read_input};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF, image or OCR text)
    #[arg(required = true)]
    input: PathBuf,

    /// Password for protected PDFs
    #[arg(short, long)]
    password: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Validate extracted data
    #[arg(long)]
    validate: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let data = read_input(&args.input)?;
    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );

    pb.set_message("Reading document...");
    pb.set_position(10);
    let reader = build_reader(&config);
    let text = reader.acquire_text(&data, &file_name(&args.input), args.password.as_deref())?;

    pb.set_message("Extracting card fields...");
    pb.set_position(70);
    let result = build_parser(&config).parse(&text);

    pb.set_position(100);
    pb.finish_and_clear();

    for warning in &result.warnings {
        debug!("{}", warning);
    }

    if args.validate {
        let issues = validation_issues(&result.record);
        if issues.is_empty() {
            eprintln!("{} Record is valid", style("✓").green());
        } else {
            eprintln!("{}", style("Validation issues:").yellow());
            for issue in &issues {
                eprintln!("  - {}", issue);
            }
        }
    }

    let output = format_record(&result.record, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!(
        "Extraction took {}ms, total {:?}",
        result.processing_time_ms,
        start.elapsed()
    );

    Ok(())
}

/// Everything that would stop the record from being stored.
pub fn validation_issues(record: &CandidateRecord) -> Vec<String> {
    match record.clone().require_complete() {
        Err(e) => vec![e.to_string()],
        Ok(complete) => match validate(complete) {
            Ok(_) => Vec::new(),
            Err(e) => vec![e.to_string()],
        },
    }
}

pub fn format_record(record: &CandidateRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

const CSV_HEADER: [&str; 15] = [
    "identifier",
    "virtual_id",
    "name",
    "name_tamil",
    "guardian_name",
    "date_of_birth",
    "gender",
    "address",
    "locality",
    "post_office",
    "sub_district",
    "district",
    "state",
    "pincode",
    "phone",
];

fn format_csv(record: &CandidateRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(CSV_HEADER)?;

    let opt = |value: &Option<String>| value.clone().unwrap_or_default();
    wtr.write_record([
        record.identifier.clone(),
        opt(&record.virtual_id),
        record.name.clone(),
        opt(&record.name_tamil),
        opt(&record.guardian_name),
        opt(&record.date_of_birth),
        record.gender.map(|g| g.to_string()).unwrap_or_default(),
        opt(&record.address),
        opt(&record.locality),
        opt(&record.post_office),
        opt(&record.sub_district),
        opt(&record.district),
        opt(&record.state),
        opt(&record.pincode),
        opt(&record.phone),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &CandidateRecord) -> String {
    let mut output = String::new();

    let field = |label: &str, value: &str| format!("{:<14}{}\n", format!("{}:", label), value);
    let missing = "-";

    output.push_str(&field(
        "Aadhaar",
        if record.identifier.is_empty() { missing } else { record.identifier.as_str() },
    ));
    if let Some(vid) = &record.virtual_id {
        output.push_str(&field("VID", vid));
    }
    output.push_str(&field(
        "Name",
        if record.name.is_empty() { missing } else { record.name.as_str() },
    ));
    if let Some(name) = &record.name_tamil {
        output.push_str(&field("Name (Tamil)", name));
    }
    if let Some(guardian) = &record.guardian_name {
        output.push_str(&field("Guardian", guardian));
    }
    output.push_str(&field(
        "DOB",
        record.date_of_birth.as_deref().unwrap_or(missing),
    ));
    output.push_str(&field(
        "Gender",
        record.gender.map(|g| g.as_str()).unwrap_or(missing),
    ));

    if let Some(address) = &record.address {
        output.push('\n');
        output.push_str(&field("Address", address));
    }
    for (label, value) in [
        ("Locality", &record.locality),
        ("Post office", &record.post_office),
        ("Sub district", &record.sub_district),
        ("District", &record.district),
        ("State", &record.state),
        ("Pincode", &record.pincode),
        ("Phone", &record.phone),
    ] {
        if let Some(value) = value {
            output.push_str(&field(label, value));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CandidateRecord {
        CandidateRecord {
            identifier: "1234 5678 9012".to_string(),
            name: "RAMASAMY KUMAR".to_string(),
            district: Some("Chennai".to_string()),
            pincode: Some("600001".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_csv_has_header_and_row() {
        let csv = format_csv(&sample()).unwrap();
        let mut lines = csv.lines();
        assert!(lines.next().unwrap().starts_with("identifier,virtual_id,name"));
        let row = lines.next().unwrap();
        assert!(row.starts_with("1234 5678 9012,,RAMASAMY KUMAR"));
        assert!(row.contains("600001"));
    }

    #[test]
    fn test_text_marks_missing_mandatory_fields() {
        let text = format_text(&CandidateRecord::default());
        assert!(text.contains("Aadhaar:      -"));
        assert!(text.contains("Name:         -"));
        assert!(!text.contains("District"));
    }

    #[test]
    fn test_validation_issues() {
        assert!(validation_issues(&sample()).is_empty());

        let mut bad = sample();
        bad.pincode = Some("6000".to_string());
        assert_eq!(validation_issues(&bad).len(), 1);

        assert_eq!(validation_issues(&CandidateRecord::default()).len(), 1);
    }
}
