//! Decodes uploaded form submissions into candidate records.

use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::workflows::shortlist::CandidateRecord;

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("failed to read candidate submissions: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid candidate submissions: {0}")]
    Json(#[from] serde_json::Error),
}

// Exports are either a bare array or wrapped under `candidates`.
#[derive(Deserialize)]
#[serde(untagged)]
enum SubmissionDocument {
    Records(Vec<CandidateRecord>),
    Wrapped { candidates: Vec<CandidateRecord> },
}

pub struct CandidateBatch;

impl CandidateBatch {
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Vec<CandidateRecord>, IntakeError> {
        let file = std::fs::File::open(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "loading candidate submissions");
        Self::from_json_reader(BufReader::new(file))
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Vec<CandidateRecord>, IntakeError> {
        let document: SubmissionDocument = serde_json::from_reader(reader)?;
        let records = match document {
            SubmissionDocument::Records(records) => records,
            SubmissionDocument::Wrapped { candidates } => candidates,
        };
        debug!(count = records.len(), "decoded candidate submissions");
        Ok(records)
    }
}
