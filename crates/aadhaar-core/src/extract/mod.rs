//! Identity card field extraction module.

mod parser;
pub mod rules;

pub use parser::{AadhaarParser, ExtractionResult, RecordParser};

use crate::models::record::CandidateRecord;

/// Extract a candidate record with the default rule set.
pub fn extract(text: &str) -> CandidateRecord {
    AadhaarParser::default().extract(text)
}
