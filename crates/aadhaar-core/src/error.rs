//! Error types for the aadhaar-core library.

use thiserror::Error;

/// Main error type for the aadhaar library.
#[derive(Error, Debug)]
pub enum AadhaarError {
    /// Text acquisition error (PDF, image, OCR).
    #[error("acquisition error: {0}")]
    Acquisition(#[from] AcquisitionError),

    /// Mandatory fields could not be extracted.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Extracted record failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Record store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// How a failure should be reported to whoever submitted the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The submitted document or its contents are at fault. Not retryable.
    ClientInput,
    /// A concurrent submission created the same identifier first.
    Conflict,
    /// Anything else (storage unavailable, OCR engine failure, I/O).
    Internal,
}

impl AadhaarError {
    /// Classify the error for the caller.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Acquisition(e) => e.kind(),
            Self::Extraction(_) | Self::Validation(_) => ErrorKind::ClientInput,
            Self::Store(StoreError::DuplicateKey(_)) => ErrorKind::Conflict,
            Self::Store(_) | Self::Io(_) | Self::Config(_) => ErrorKind::Internal,
        }
    }
}

/// Errors raised while turning an uploaded file into text.
#[derive(Error, Debug)]
pub enum AcquisitionError {
    /// The input is empty, corrupt or not decodable.
    #[error("unreadable document: {0}")]
    Unreadable(String),

    /// The PDF is password protected and no password was supplied.
    #[error("PDF is password protected but no password was provided")]
    PasswordRequired,

    /// The supplied password does not open the PDF.
    #[error("invalid password for PDF")]
    PasswordIncorrect,

    /// The file extension is not one of the accepted document types.
    #[error("unsupported file type: {0}")]
    UnsupportedFormat(String),

    /// An image needs OCR but no OCR engine is configured.
    #[error("OCR engine not available; configure ocr.model_dir")]
    OcrUnavailable,

    /// The OCR engine failed.
    #[error("OCR failed: {0}")]
    Ocr(String),
}

impl AcquisitionError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Unreadable(_)
            | Self::PasswordRequired
            | Self::PasswordIncorrect
            | Self::UnsupportedFormat(_) => ErrorKind::ClientInput,
            Self::OcrUnavailable | Self::Ocr(_) => ErrorKind::Internal,
        }
    }
}

/// Errors related to field extraction.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractionError {
    /// A mandatory field is missing from the extracted record.
    #[error("could not extract required data: missing {0}")]
    MissingField(&'static str),
}

/// Shape errors found while validating an extracted record.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// The identifier does not reduce to exactly 12 digits.
    #[error("identifier must be 12 digits, got {0:?}")]
    InvalidIdentifier(String),

    /// The pincode is not exactly 6 digits.
    #[error("pincode must be 6 digits, got {0:?}")]
    InvalidPincode(String),

    /// The phone number is not exactly 10 digits.
    #[error("phone must be 10 digits, got {0:?}")]
    InvalidPhone(String),
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidIdentifier(_) => "identifier",
            Self::InvalidPincode(_) => "pincode",
            Self::InvalidPhone(_) => "phone",
        }
    }
}

/// Errors reported by a record store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A record with this identifier already exists.
    #[error("duplicate identifier: {0}")]
    DuplicateKey(String),

    /// No record with this identifier exists.
    #[error("no record found for identifier: {0}")]
    NotFound(String),

    /// The storage backend failed.
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Backend(err.to_string())
    }
}

/// Result type for the aadhaar library.
pub type Result<T> = std::result::Result<T, AadhaarError>;
