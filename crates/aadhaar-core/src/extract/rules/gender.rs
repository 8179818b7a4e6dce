//! Gender extraction.

use crate::models::record::Gender;

use super::patterns::GENDER;

/// First whole-word gender token, letters expanded to full words.
pub fn extract_gender(text: &str) -> Option<Gender> {
    GENDER
        .captures(text)
        .and_then(|caps| Gender::from_token(&caps[1]))
}
