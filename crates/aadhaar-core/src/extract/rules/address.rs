//! Address block and labeled address component extraction.

use regex::Regex;

use super::normalize::{apply, ADDRESS_PIPELINE};
use super::patterns::{
    ADDRESS_END, ADDRESS_LABEL, DISTRICT, LOCALITY, POST_OFFICE, STATE, SUB_DISTRICT,
};

/// Labeled address components, each taken from a single line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressComponents {
    pub locality: Option<String>,
    pub post_office: Option<String>,
    pub sub_district: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
}

/// Extract the free-text address after the first `Address` label.
///
/// The span ends before the first line starting with `District`, `State`,
/// six digits, `VID` or `Digitally`, or at the end of the text.
pub fn extract_address(text: &str) -> Option<String> {
    let label = ADDRESS_LABEL.find(text)?;
    let rest = &text[label.end()..];
    let end = ADDRESS_END.find(rest).map(|m| m.start()).unwrap_or(rest.len());

    let address = apply(ADDRESS_PIPELINE, &rest[..end]);
    if address.is_empty() {
        None
    } else {
        Some(address)
    }
}

/// Extract every labeled component.
pub fn extract_components(text: &str) -> AddressComponents {
    AddressComponents {
        locality: labeled_line(&LOCALITY, text),
        post_office: labeled_line(&POST_OFFICE, text),
        sub_district: labeled_line(&SUB_DISTRICT, text),
        district: extract_district(text),
        state: labeled_line(&STATE, text),
    }
}

/// District label, ignoring `Sub District` lines. Commas are removed.
pub fn extract_district(text: &str) -> Option<String> {
    DISTRICT
        .captures_iter(text)
        .filter(|caps| {
            let start = caps.get(0).map(|m| m.start()).unwrap_or(0);
            !text[..start].trim_end().to_lowercase().ends_with("sub")
        })
        .map(|caps| caps[1].replace(',', "").trim().to_string())
        .find(|value| !value.is_empty())
}

/// Remainder of the first line carrying the label matched by `pattern`.
fn labeled_line(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|value| !value.is_empty())
}
