//! Date of birth extraction.

use super::patterns::DATE_OF_BIRTH;

/// Separator used in normalized dates.
pub const DATE_SEPARATOR: char = '/';

/// Extract the labeled date of birth as `D/M/YYYY`, keeping the printed digits.
pub fn extract_date_of_birth(text: &str) -> Option<String> {
    DATE_OF_BIRTH.captures(text).map(|caps| {
        format!(
            "{}{sep}{}{sep}{}",
            &caps[1],
            &caps[2],
            &caps[3],
            sep = DATE_SEPARATOR
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dob_labels() {
        assert_eq!(extract_date_of_birth("DOB: 12-05-1990"), Some("12/05/1990".to_string()));
        assert_eq!(extract_date_of_birth("D.O.B 1/5/1990"), Some("1/5/1990".to_string()));
        assert_eq!(
            extract_date_of_birth("Date of Birth : 01-12/1985"),
            Some("01/12/1985".to_string())
        );
        assert_eq!(extract_date_of_birth("dob:03/04/2001"), Some("03/04/2001".to_string()));
    }

    #[test]
    fn test_dob_requires_label() {
        assert_eq!(extract_date_of_birth("Issued 12-05-2020"), None);
        assert_eq!(extract_date_of_birth("DOB: 1990"), None);
    }

    #[test]
    fn test_dob_first_wins() {
        let text = "DOB: 12-05-1990\nDOB: 01-01-2000";
        assert_eq!(extract_date_of_birth(text), Some("12/05/1990".to_string()));
    }
}
