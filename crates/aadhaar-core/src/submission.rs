//! End-to-end submission: acquire, extract, validate, reconcile.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::acquire::TextSource;
use crate::error::{AadhaarError, Result, StoreError};
use crate::extract::{AadhaarParser, RecordParser};
use crate::models::record::PersistedRecord;
use crate::reconcile::{Reconciler, Reconciliation};
use crate::store::RecordStore;
use crate::validate::validate;

/// Why a submission ended without a stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// Another submission created the same identifier first.
    DuplicateRace,
    /// The extracted fields failed validation.
    Validation,
}

/// Where a submission is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    Extracted,
    Validated,
    Created,
    Updated,
    Rejected(Rejection),
}

impl SubmissionState {
    /// Whether no further transition can happen.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Extracted | Self::Validated)
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Extracted => f.write_str("extracted"),
            Self::Validated => f.write_str("validated"),
            Self::Created => f.write_str("created"),
            Self::Updated => f.write_str("updated"),
            Self::Rejected(Rejection::DuplicateRace) => f.write_str("rejected (duplicate race)"),
            Self::Rejected(Rejection::Validation) => f.write_str("rejected (validation)"),
        }
    }
}

impl AadhaarError {
    /// The rejected state this error ends a submission in, if it is a rejection.
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Self::Validation(_) => Some(Rejection::Validation),
            Self::Store(StoreError::DuplicateKey(_)) => Some(Rejection::DuplicateRace),
            _ => None,
        }
    }
}

/// Outcome of a successful submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReport {
    /// Terminal state: `Created` or `Updated`.
    pub state: SubmissionState,
    pub identifier: String,
    pub record: PersistedRecord,
    /// Optional fields that could not be extracted.
    pub warnings: Vec<String>,
}

/// Runs uploads through the whole workflow against one store.
///
/// Every rejection is returned as an error; [`AadhaarError::rejection`]
/// tells which rejected state it corresponds to.
pub struct SubmissionPipeline<S, T> {
    source: T,
    parser: AadhaarParser,
    reconciler: Reconciler<S>,
}

impl<S: RecordStore, T: TextSource> SubmissionPipeline<S, T> {
    pub fn new(store: S, source: T) -> Self {
        Self {
            source,
            parser: AadhaarParser::default(),
            reconciler: Reconciler::new(store),
        }
    }

    /// Replace the default parser (to extend its blacklist, for instance).
    pub fn with_parser(mut self, parser: AadhaarParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn store(&self) -> &S {
        self.reconciler.store()
    }

    /// Submit an uploaded file.
    pub fn submit(
        &self,
        bytes: &[u8],
        filename: &str,
        password: Option<&str>,
    ) -> Result<SubmissionReport> {
        let text = self.source.acquire_text(bytes, filename, password)?;
        self.submit_text(&text)
    }

    /// Submit text that was already acquired.
    pub fn submit_text(&self, text: &str) -> Result<SubmissionReport> {
        let extraction = self.parser.parse(text);
        let mut state = SubmissionState::Extracted;
        debug!("Submission state: {}", state);

        let candidate = extraction.record.require_complete()?;

        let validated = match validate(candidate) {
            Ok(validated) => validated,
            Err(e) => {
                transition(&mut state, SubmissionState::Rejected(Rejection::Validation));
                warn!("Submission rejected: {}", e);
                return Err(e.into());
            }
        };
        transition(&mut state, SubmissionState::Validated);

        let identifier = validated.identifier().to_string();
        let record = match self.reconciler.reconcile(&validated)? {
            Reconciliation::Created { record } => {
                transition(&mut state, SubmissionState::Created);
                record
            }
            Reconciliation::Updated { record } => {
                transition(&mut state, SubmissionState::Updated);
                record
            }
            Reconciliation::Conflict { identifier } => {
                transition(&mut state, SubmissionState::Rejected(Rejection::DuplicateRace));
                return Err(StoreError::DuplicateKey(identifier).into());
            }
        };

        info!("Submission for {} finished: {}", identifier, state);

        Ok(SubmissionReport {
            state,
            identifier,
            record,
            warnings: extraction.warnings,
        })
    }
}

fn transition(state: &mut SubmissionState, next: SubmissionState) {
    debug!("Submission state: {} -> {}", state, next);
    *state = next;
}
