//! Data models for identity document extraction.

pub mod config;
pub mod record;

pub use config::AadhaarConfig;
pub use record::{CandidateRecord, Gender, PersistedRecord, RecordUpdate, ValidatedRecord};
