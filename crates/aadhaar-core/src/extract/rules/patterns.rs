//! Common regex patterns for identity document extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Identifier (12 digits as XXXX XXXX XXXX)
    pub static ref IDENTIFIER: Regex = Regex::new(
        r"\b([0-9]{4} [0-9]{4} [0-9]{4})\b"
    ).unwrap();

    // Virtual ID (16 digits in four groups)
    pub static ref VIRTUAL_ID: Regex = Regex::new(
        r"(?i)\bVID[\s\p{P}]*([0-9]{4})\s([0-9]{4})\s([0-9]{4})\s([0-9]{4})\b"
    ).unwrap();

    // Tamil run followed by a Latin name line
    pub static ref BILINGUAL_NAME: Regex = Regex::new(
        r"([\x{0B80}-\x{0BFF}]+(?:[ \t]+[\x{0B80}-\x{0BFF}]+)*)[ \t]*\r?\n[ \t]*([A-Za-z][A-Za-z '\-]*)"
    ).unwrap();

    pub static ref NAME_LINE: Regex = Regex::new(
        r"^[A-Za-z\s'\-]+$"
    ).unwrap();

    // Relation markers (son/daughter/wife/care of)
    pub static ref RELATION_SPLIT: Regex = Regex::new(
        r"(?i)\s*(?:S/O|C/O|W/O|D/O)\s*"
    ).unwrap();

    pub static ref TRAILING_INITIAL: Regex = Regex::new(
        r"\s+[CWSD]\s*$"
    ).unwrap();

    pub static ref GUARDIAN: Regex = Regex::new(
        r"(?i)\b(?:S/O|C/O|D/O|W/O)[.:]?[ \t]*([A-Za-z][A-Za-z \t'\-]*)"
    ).unwrap();

    // Date of birth
    pub static ref DATE_OF_BIRTH: Regex = Regex::new(
        r"(?i)(?:DOB|D\.O\.B\.?|Date\s+of\s+Birth)[:\s]*?([0-9]{1,2})[-/]([0-9]{1,2})[-/]([0-9]{4})"
    ).unwrap();

    pub static ref GENDER: Regex = Regex::new(
        r"(?i)\b(Male|Female|Transgender|M|F|T)\b"
    ).unwrap();

    // Address block and its terminators
    pub static ref ADDRESS_LABEL: Regex = Regex::new(
        r"(?i)address[:\s]*"
    ).unwrap();

    pub static ref ADDRESS_END: Regex = Regex::new(
        r"(?i)\n(?:District|State|[0-9]{6}|VID|Digitally)"
    ).unwrap();

    pub static ref ADDRESS_GUARDIAN: Regex = Regex::new(
        r"(?i)(?:S/O|C/O|D/O|W/O)[.:]?[ \t]*[A-Za-z \t'\-]+"
    ).unwrap();

    pub static ref ADDRESS_IDENTIFIER: Regex = Regex::new(
        r"\b[0-9]{4}\s[0-9]{4}\s[0-9]{4}\b"
    ).unwrap();

    pub static ref ADDRESS_PO_PREFIX: Regex = Regex::new(
        r"PO:.*?,"
    ).unwrap();

    pub static ref ADDRESS_REGION_TRAILER: Regex = Regex::new(
        r"(?i)\b(?:dist(?:rict)?|state)\b.*"
    ).unwrap();

    // Labeled address components (rest of the labeled line)
    pub static ref LOCALITY: Regex = Regex::new(
        r"(?i)\bVTC\b[: \t]*(.*)"
    ).unwrap();

    pub static ref POST_OFFICE: Regex = Regex::new(
        r"(?i)\bPO\b[: \t]*(.*)"
    ).unwrap();

    pub static ref SUB_DISTRICT: Regex = Regex::new(
        r"(?i)\bSub[ \t]*District\b[: \t]*(.*)"
    ).unwrap();

    pub static ref DISTRICT: Regex = Regex::new(
        r"(?i)\bDistrict\b[: \t]*(.*)"
    ).unwrap();

    pub static ref STATE: Regex = Regex::new(
        r"(?i)\bState\b[: \t]*(.*)"
    ).unwrap();

    // Bare digit runs
    pub static ref PINCODE: Regex = Regex::new(
        r"\b([0-9]{6})\b"
    ).unwrap();

    pub static ref PHONE: Regex = Regex::new(
        r"\b([0-9]{10})\b"
    ).unwrap();

    pub static ref WHITESPACE: Regex = Regex::new(
        r"\s+"
    ).unwrap();

    pub static ref NEWLINES: Regex = Regex::new(
        r"\n+"
    ).unwrap();
}
