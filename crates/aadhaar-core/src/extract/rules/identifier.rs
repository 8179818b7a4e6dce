//! Identifier and virtual ID extraction.

use super::patterns::{IDENTIFIER, VIRTUAL_ID};

/// Extract the first `XXXX XXXX XXXX` run anywhere in the text.
///
/// Nothing around the run is inspected: on a card that prints its VID before
/// the Aadhaar number, the first three VID groups win.
pub fn extract_identifier(text: &str) -> Option<String> {
    IDENTIFIER.find(text).map(|m| m.as_str().to_string())
}

/// Extract the 16-digit virtual ID following a `VID` label.
pub fn extract_virtual_id(text: &str) -> Option<String> {
    VIRTUAL_ID
        .captures(text)
        .map(|caps| format!("{} {} {} {}", &caps[1], &caps[2], &caps[3], &caps[4]))
}

/// Render 12 digits as `XXXX XXXX XXXX`. Returns `None` for anything else.
pub fn format_identifier(digits: &str) -> Option<String> {
    if digits.len() != 12 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(format!("{} {} {}", &digits[0..4], &digits[4..8], &digits[8..12]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_identifier() {
        let text = "Government of India\nRAMASAMY KUMAR\n1234 5678 9012\nVID: 9999 8888 7777 6666";
        assert_eq!(extract_identifier(text), Some("1234 5678 9012".to_string()));
    }

    #[test]
    fn test_identifier_first_wins() {
        let text = "1111 2222 3333\n4444 5555 6666";
        assert_eq!(extract_identifier(text), Some("1111 2222 3333".to_string()));
    }

    #[test]
    fn test_identifier_ignores_neighbouring_groups() {
        assert_eq!(
            extract_identifier("Aadhaar 1234 5678 9012 5555 ref"),
            Some("1234 5678 9012".to_string())
        );
        assert_eq!(
            extract_identifier("Ref 4444 1234 5678 9012"),
            Some("4444 1234 5678".to_string())
        );
    }

    #[test]
    fn test_identifier_taken_from_leading_virtual_id() {
        let text = "VID: 9999 8888 7777 6666\nYour number: 1234 5678 9012";
        assert_eq!(extract_identifier(text), Some("9999 8888 7777".to_string()));
        assert_eq!(
            extract_virtual_id(text),
            Some("9999 8888 7777 6666".to_string())
        );
    }

    #[test]
    fn test_identifier_requires_single_spaces() {
        assert_eq!(extract_identifier("123456789012"), None);
        assert_eq!(extract_identifier("1234-5678-9012"), None);
        assert_eq!(extract_identifier("12345 5678 9012"), None);
    }

    #[test]
    fn test_extract_virtual_id() {
        assert_eq!(
            extract_virtual_id("vid:  9999 8888 7777 6666"),
            Some("9999 8888 7777 6666".to_string())
        );
        assert_eq!(
            extract_virtual_id("VID\n9999\t8888 7777 6666"),
            Some("9999 8888 7777 6666".to_string())
        );
        assert_eq!(extract_virtual_id("VID: 9999 8888 7777"), None);
    }

    #[test]
    fn test_format_identifier() {
        assert_eq!(format_identifier("123456789012"), Some("1234 5678 9012".to_string()));
        assert_eq!(format_identifier("12345678901"), None);
        assert_eq!(format_identifier("12345678901a"), None);
    }
}
