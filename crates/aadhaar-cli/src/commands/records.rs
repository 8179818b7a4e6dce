//! Records command - inspect and manage stored records.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use aadhaar_core::{normalize_identifier, RecordStore};

use super::{load_config, open_store};

/// Arguments for the records command.
#[derive(Args)]
pub struct RecordsArgs {
    /// Record database (default: from config)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: RecordsCommand,
}

#[derive(Subcommand)]
enum RecordsCommand {
    /// Show the record for an Aadhaar number
    Get {
        /// Aadhaar number, with or without spaces
        identifier: String,
    },

    /// List records, newest first
    List {
        /// Maximum number of records (default: from config)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Number of records to skip
        #[arg(long, default_value = "0")]
        offset: usize,
    },

    /// Delete the record for an Aadhaar number
    Delete {
        /// Aadhaar number, with or without spaces
        identifier: String,
    },
}

pub async fn run(args: RecordsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let store = open_store(args.db.as_deref(), &config)?;

    match args.command {
        RecordsCommand::Get { identifier } => {
            let key = lookup_key(&identifier)?;
            match store.find_by_key(&key)? {
                Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
                None => anyhow::bail!("No record for {}", key),
            }
        }
        RecordsCommand::List { limit, offset } => {
            let limit = limit.unwrap_or(config.store.default_list_limit);
            let records = store.list(limit, offset)?;
            println!("{}", serde_json::to_string_pretty(&records)?);
            eprintln!(
                "{} {} record(s) (offset {})",
                style("ℹ").blue(),
                records.len(),
                offset
            );
        }
        RecordsCommand::Delete { identifier } => {
            let key = lookup_key(&identifier)?;
            if store.delete_by_key(&key)? {
                println!("{} Deleted {}", style("✓").green(), key);
            } else {
                anyhow::bail!("No record for {}", key);
            }
        }
    }

    Ok(())
}

fn lookup_key(identifier: &str) -> anyhow::Result<String> {
    normalize_identifier(identifier)
        .ok_or_else(|| anyhow::anyhow!("Invalid Aadhaar number: {}", identifier))
}
