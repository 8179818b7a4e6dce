//! CLI subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod process;
pub mod records;
pub mod submit;

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use aadhaar_core::models::config::AadhaarConfig;
use aadhaar_core::{AadhaarParser, DocumentReader, SqliteStore};

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("aadhaar")
        .join("config.json")
}

/// Load configuration from `--config`, the default location if it exists,
/// or built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<AadhaarConfig> {
    let path = match config_path {
        Some(path) => PathBuf::from(path),
        None => {
            let default = default_config_path();
            if !default.exists() {
                debug!("No config file, using defaults");
                return Ok(AadhaarConfig::default());
            }
            default
        }
    };

    debug!("Loading config from {}", path.display());
    AadhaarConfig::from_file(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))
}

/// Open the record database, preferring `--db` over the configured path.
pub fn open_store(db: Option<&Path>, config: &AadhaarConfig) -> anyhow::Result<SqliteStore> {
    let path = db.unwrap_or(&config.store.database_path);
    debug!("Opening record database {}", path.display());
    SqliteStore::open(path)
        .with_context(|| format!("Failed to open database {}", path.display()))
}

/// Parser with the configured blacklist additions.
pub fn build_parser(config: &AadhaarConfig) -> AadhaarParser {
    AadhaarParser::new().with_extra_blacklist(config.extraction.extra_blacklist.iter())
}

/// Document reader with OCR when models are installed.
pub fn build_reader(config: &AadhaarConfig) -> DocumentReader {
    DocumentReader::from_config(config)
}

/// Read an input file, checking it exists first.
pub fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }
    std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// File name handed to the reader to pick PDF, image or text handling.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
