//! Shape validation and normalization of extracted records.

use crate::error::ValidationError;
use crate::extract::rules::format_identifier;
use crate::models::record::{CandidateRecord, ValidatedRecord};

const PINCODE_DIGITS: usize = 6;
const PHONE_DIGITS: usize = 10;

/// Validate a candidate record and normalize its key fields.
///
/// Whitespace is stripped from the identifier, which must then be exactly
/// 12 digits and is re-rendered as `XXXX XXXX XXXX`. Empty optional strings
/// become absent. Running the result back through `validate` yields the
/// same record.
pub fn validate(mut record: CandidateRecord) -> Result<ValidatedRecord, ValidationError> {
    let digits: String = record
        .identifier
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    record.identifier = format_identifier(&digits)
        .ok_or_else(|| ValidationError::InvalidIdentifier(record.identifier.clone()))?;

    record.name = record.name.trim().to_string();
    for field in [
        &mut record.virtual_id,
        &mut record.name_tamil,
        &mut record.guardian_name,
        &mut record.date_of_birth,
        &mut record.address,
        &mut record.locality,
        &mut record.post_office,
        &mut record.sub_district,
        &mut record.district,
        &mut record.state,
        &mut record.pincode,
        &mut record.phone,
    ] {
        clear_blank(field);
    }

    if let Some(pincode) = &record.pincode {
        if !is_digits(pincode, PINCODE_DIGITS) {
            return Err(ValidationError::InvalidPincode(pincode.clone()));
        }
    }
    if let Some(phone) = &record.phone {
        if !is_digits(phone, PHONE_DIGITS) {
            return Err(ValidationError::InvalidPhone(phone.clone()));
        }
    }

    Ok(ValidatedRecord(record))
}

/// Canonical `XXXX XXXX XXXX` form of an identifier typed for a lookup,
/// with or without spaces or dashes. `None` unless exactly 12 digits remain.
///
/// Looser than [`validate`], which rejects dashes.
pub fn normalize_identifier(raw: &str) -> Option<String> {
    let digits: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    format_identifier(&digits)
}

fn clear_blank(field: &mut Option<String>) {
    if field.as_deref().is_some_and(|value| value.trim().is_empty()) {
        *field = None;
    }
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn candidate(identifier: &str) -> CandidateRecord {
        CandidateRecord {
            identifier: identifier.to_string(),
            name: "RAMASAMY KUMAR".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_identifier_normalized() {
        for raw in ["1234 5678 9012", "123456789012", " 1234  5678\t9012 ", "1234\n5678 9012"] {
            let validated = validate(candidate(raw)).unwrap();
            assert_eq!(validated.identifier(), "1234 5678 9012", "raw: {raw:?}");
        }
    }

    #[test]
    fn test_invalid_identifier() {
        for raw in ["", "1234 5678 901", "1234 5678 90123", "1234 5678 901a", "1234-5678-9012"] {
            let err = validate(candidate(raw)).unwrap_err();
            assert_eq!(err, ValidationError::InvalidIdentifier(raw.to_string()));
            assert_eq!(err.field(), "identifier");
            assert!(err.to_string().contains("identifier"));
        }
    }

    #[test]
    fn test_dashed_identifier_rejected() {
        let err = validate(candidate("1234-5678-9012")).unwrap_err();
        assert_eq!(err, ValidationError::InvalidIdentifier("1234-5678-9012".to_string()));
    }

    #[test]
    fn test_pincode_and_phone() {
        let mut record = candidate("1234 5678 9012");
        record.pincode = Some("60001".to_string());
        let err = validate(record).unwrap_err();
        assert_eq!(err.field(), "pincode");
        assert!(err.to_string().contains("pincode"));

        let mut record = candidate("1234 5678 9012");
        record.phone = Some("98765 43210".to_string());
        let err = validate(record).unwrap_err();
        assert_eq!(err, ValidationError::InvalidPhone("98765 43210".to_string()));

        let mut record = candidate("1234 5678 9012");
        record.pincode = Some("600001".to_string());
        record.phone = Some("9876543210".to_string());
        assert!(validate(record).is_ok());
    }

    #[test]
    fn test_blank_optionals_become_absent() {
        let mut record = candidate("1234 5678 9012");
        record.pincode = Some(String::new());
        record.phone = Some("  ".to_string());
        record.address = Some("".to_string());
        record.state = Some("Kerala".to_string());

        let validated = validate(record).unwrap();
        assert_eq!(validated.record().pincode, None);
        assert_eq!(validated.record().phone, None);
        assert_eq!(validated.record().address, None);
        assert_eq!(validated.record().state, Some("Kerala".to_string()));
    }

    #[test]
    fn test_idempotent() {
        let mut record = candidate("123456789012");
        record.pincode = Some("600001".to_string());
        record.guardian_name = Some("".to_string());

        let once = validate(record).unwrap();
        let twice = validate(once.clone().into_inner()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_identifier() {
        assert_eq!(normalize_identifier("1234-5678-9012"), Some("1234 5678 9012".to_string()));
        assert_eq!(normalize_identifier("123456789012"), Some("1234 5678 9012".to_string()));
        assert_eq!(normalize_identifier("1234"), None);
    }
}
