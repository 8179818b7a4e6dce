//! Ordered rule parser turning card text into a candidate record.

use std::time::Instant;

use tracing::{debug, info};

use crate::models::record::CandidateRecord;

use super::rules::{
    extract_address, extract_bilingual_name, extract_components, extract_date_of_birth,
    extract_fallback_name, extract_gender, extract_guardian_name, extract_identifier,
    extract_phone, extract_pincode, extract_virtual_id, is_blacklisted, normalize_name,
    DEFAULT_BLACKLIST,
};

/// Result of record extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted fields.
    pub record: CandidateRecord,
    /// Text the rules ran over.
    pub raw_text: String,
    /// One entry per field that was not found.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for record parsing.
pub trait RecordParser {
    /// Parse a record from text. Never fails; missing fields stay empty.
    fn parse(&self, text: &str) -> ExtractionResult;
}

/// Rule-based parser for Aadhaar card text.
#[derive(Debug, Clone)]
pub struct AadhaarParser {
    /// Phrases that disqualify a line from being a name.
    blacklist: Vec<String>,
}

impl AadhaarParser {
    /// Create a parser with the built-in boilerplate blacklist.
    pub fn new() -> Self {
        Self {
            blacklist: DEFAULT_BLACKLIST.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Add phrases to the name blacklist. Built-in entries are always kept.
    pub fn with_extra_blacklist<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blacklist.extend(
            phrases
                .into_iter()
                .map(Into::into)
                .filter(|phrase: &String| !phrase.trim().is_empty()),
        );
        self
    }

    pub fn blacklist(&self) -> &[String] {
        &self.blacklist
    }

    /// Apply every rule in order and assemble the record.
    pub fn extract(&self, text: &str) -> CandidateRecord {
        let text = text.trim_end();

        let identifier = extract_identifier(text).unwrap_or_default();
        let virtual_id = extract_virtual_id(text);

        // A boilerplate Latin line is not a usable name; the Tamil run is kept
        let bilingual = extract_bilingual_name(text);
        let name = match bilingual
            .as_ref()
            .filter(|found| !is_blacklisted(&found.latin_raw, &self.blacklist))
            .and_then(|found| normalize_name(&found.latin_raw))
        {
            Some(name) => {
                debug!("Name taken from bilingual block: {}", name);
                Some(name)
            }
            None => {
                let fallback = extract_fallback_name(text, &self.blacklist);
                debug!("Name taken from line scan: {:?}", fallback);
                fallback
            }
        };

        let components = extract_components(text);

        CandidateRecord {
            virtual_id,
            identifier,
            name: name.unwrap_or_default(),
            name_tamil: bilingual.map(|found| found.tamil),
            guardian_name: extract_guardian_name(text),
            date_of_birth: extract_date_of_birth(text),
            gender: extract_gender(text),
            address: extract_address(text),
            locality: components.locality,
            post_office: components.post_office,
            sub_district: components.sub_district,
            district: components.district,
            state: components.state,
            pincode: extract_pincode(text),
            phone: extract_phone(text),
        }
    }
}

impl Default for AadhaarParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordParser for AadhaarParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();

        info!("Parsing record from {} characters of text", text.len());

        let record = self.extract(text);
        let warnings: Vec<String> = record
            .missing_fields()
            .into_iter()
            .map(|field| format!("Could not extract {}", field))
            .collect();

        debug!(
            "Extracted record {:?} with {} missing fields",
            record.identifier,
            warnings.len()
        );

        ExtractionResult {
            record,
            raw_text: text.to_string(),
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}
