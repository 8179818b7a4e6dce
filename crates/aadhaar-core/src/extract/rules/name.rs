//! Name and guardian name extraction.

use super::normalize::{collapse_whitespace, normalize_name};
use super::patterns::{BILINGUAL_NAME, GUARDIAN, NAME_LINE};

/// Boilerplate printed on the card that looks like a multi-word name.
pub const DEFAULT_BLACKLIST: &[&str] = &[
    "digitally signed",
    "unique identification authority",
    "identification authority of india",
    "government of",
    "signature not verified",
    "date of issue",
    "download date",
];

/// Name block printed in Tamil followed by its Latin transliteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BilingualName {
    /// Tamil script run.
    pub tamil: String,
    /// Latin line as printed, before normalization.
    pub latin_raw: String,
}

/// Find the first Tamil run immediately followed by a Latin line.
///
/// Only the first pair is considered. On most cards that is the
/// "Government of India" header, whose Latin line the parser then rejects.
pub fn extract_bilingual_name(text: &str) -> Option<BilingualName> {
    BILINGUAL_NAME.captures(text).map(|caps| BilingualName {
        tamil: collapse_whitespace(&caps[1]),
        latin_raw: caps[2].trim().to_string(),
    })
}

/// Whether `line` contains any blacklisted phrase, ignoring case.
pub fn is_blacklisted<S: AsRef<str>>(line: &str, blacklist: &[S]) -> bool {
    let lower = line.to_lowercase();
    blacklist
        .iter()
        .any(|phrase| lower.contains(&phrase.as_ref().to_lowercase()))
}

/// Scan lines in order for the first plausible multi-word Latin name.
pub fn extract_fallback_name<S: AsRef<str>>(text: &str, blacklist: &[S]) -> Option<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| NAME_LINE.is_match(line))
        .filter(|line| line.split_whitespace().count() > 1)
        .filter(|line| !is_blacklisted(line, blacklist))
        .find_map(normalize_name)
}

/// Extract the name following the first relation marker.
pub fn extract_guardian_name(text: &str) -> Option<String> {
    GUARDIAN
        .captures(text)
        .map(|caps| collapse_whitespace(&caps[1]))
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bilingual_name_first_pair_wins() {
        let text = "இந்திய அரசு\nGovernment of India\nரமேஷ் குமார்\nRAMESH KUMAR\n";
        let found = extract_bilingual_name(text).unwrap();
        assert_eq!(found.tamil, "இந்திய அரசு");
        assert_eq!(found.latin_raw, "Government of India");
        assert!(is_blacklisted(&found.latin_raw, DEFAULT_BLACKLIST));
    }

    #[test]
    fn test_bilingual_name_stops_at_non_name_characters() {
        let text = "ரமேஷ் குமார்\nRAMESH KUMAR S/O RAJAN";
        let found = extract_bilingual_name(text).unwrap();
        assert_eq!(found.tamil, "ரமேஷ் குமார்");
        assert_eq!(found.latin_raw, "RAMESH KUMAR S");
        assert_eq!(normalize_name(&found.latin_raw), Some("RAMESH KUMAR".to_string()));
    }

    #[test]
    fn test_no_bilingual_name_without_tamil() {
        assert_eq!(extract_bilingual_name("\n\nRAMESH KUMAR"), None);
    }

    #[test]
    fn test_fallback_skips_boilerplate() {
        let text = "Digitally signed by DS Unique\nGovernment of India\nRAMASAMY KUMAR\n";
        assert_eq!(
            extract_fallback_name(text, DEFAULT_BLACKLIST),
            Some("RAMASAMY KUMAR".to_string())
        );
    }

    #[test]
    fn test_fallback_never_selects_signature_line() {
        let text = "Digitally signed by DS Unique";
        assert_eq!(extract_fallback_name(text, DEFAULT_BLACKLIST), None);
    }

    #[test]
    fn test_fallback_requires_multiple_words() {
        let text = "Male\nKUMAR\nDOB: 12/05/1990\nANITHA MARY";
        assert_eq!(
            extract_fallback_name(text, DEFAULT_BLACKLIST),
            Some("ANITHA MARY".to_string())
        );
    }

    #[test]
    fn test_fallback_extra_blacklist() {
        let text = "Enrolment Office\nANITHA MARY";
        let mut blacklist: Vec<String> = DEFAULT_BLACKLIST.iter().map(|s| s.to_string()).collect();
        blacklist.push("Enrolment".to_string());
        assert_eq!(extract_fallback_name(text, &blacklist), Some("ANITHA MARY".to_string()));
    }

    #[test]
    fn test_guardian_name() {
        assert_eq!(extract_guardian_name("S/O RAJAN\nADDRESS"), Some("RAJAN".to_string()));
        assert_eq!(
            extract_guardian_name("Address: w/o: Suresh  Babu, 12 Street"),
            Some("Suresh Babu".to_string())
        );
        assert_eq!(extract_guardian_name("no relation here"), None);
    }
}
