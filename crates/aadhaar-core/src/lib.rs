//! Core library for Aadhaar card processing.
//!
//! This crate provides:
//! - Text acquisition from PDFs (including password-protected ones), card
//!   images via OCR, and plain text
//! - Rule-based extraction of card fields from noisy bilingual OCR text
//! - Validation and normalization of the extracted record
//! - Create-or-update reconciliation against a record store keyed by the
//!   12-digit identifier

pub mod acquire;
pub mod error;
pub mod extract;
pub mod models;
pub mod ocr;
pub mod pdf;
pub mod reconcile;
pub mod store;
pub mod submission;
pub mod validate;

pub use acquire::{DocumentKind, DocumentReader, TextSource};
pub use error::{
    AadhaarError, AcquisitionError, ErrorKind, ExtractionError, Result, StoreError,
    ValidationError,
};
pub use extract::{extract, AadhaarParser, ExtractionResult, RecordParser};
pub use models::{AadhaarConfig, CandidateRecord, Gender, PersistedRecord, RecordUpdate, ValidatedRecord};
pub use ocr::{OcrBackend, OcrResult, TextBox};
#[cfg(feature = "native")]
pub use ocr::PureOcrEngine;
pub use pdf::{PdfDocument, PdfType};
pub use reconcile::{Reconciler, Reconciliation};
pub use store::{MemoryStore, RecordStore, SqliteStore};
pub use submission::{Rejection, SubmissionPipeline, SubmissionReport, SubmissionState};
pub use validate::{normalize_identifier, validate};
