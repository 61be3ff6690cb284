//! Result artifacts.
//!
//! Two JSON arrays are kept on disk and rewritten in full after every
//! processed row: the full result records and an index + evaluation
//! summary. Each write is a snapshot of everything processed so far.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use marker_core::{EvaluationSummary, ResultRecord};

/// Errors writing result artifacts.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// In-memory result sequence mirrored to the two output files.
#[derive(Debug)]
pub struct ResultStore {
    records: Vec<ResultRecord>,
    question_answers_path: PathBuf,
    evaluation_path: PathBuf,
}

impl ResultStore {
    /// Create the store and reset both files to an empty array.
    pub fn create(
        question_answers_path: impl Into<PathBuf>,
        evaluation_path: impl Into<PathBuf>,
    ) -> Result<Self, OutputError> {
        let store = Self {
            records: Vec::new(),
            question_answers_path: question_answers_path.into(),
            evaluation_path: evaluation_path.into(),
        };
        store.flush()?;
        Ok(store)
    }

    /// Append a record and rewrite both files.
    ///
    /// If either write fails the record is dropped again, so the files only
    /// ever hold rows that were written successfully.
    pub fn push(&mut self, record: ResultRecord) -> Result<&ResultRecord, OutputError> {
        self.records.push(record);
        if let Err(e) = self.flush() {
            self.records.pop();
            // The first file may already hold the dropped record
            if let Err(restore) = self.flush() {
                tracing::debug!(error = %restore, "Could not restore previous snapshot");
            }
            return Err(e);
        }
        Ok(&self.records[self.records.len() - 1])
    }

    /// Rewrite both files from the in-memory sequence.
    pub fn flush(&self) -> Result<(), OutputError> {
        write_json(&self.question_answers_path, &self.records)?;

        let summaries: Vec<EvaluationSummary> =
            self.records.iter().map(ResultRecord::summary).collect();
        write_json(&self.evaluation_path, &summaries)
    }

    /// Records written so far, in input order.
    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Pretty-print with four-space indentation. Non-ASCII text is kept as is.
fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    Ok(buffer)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), OutputError> {
    let bytes = to_pretty_json(value)?;
    fs::write(path, bytes).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })
}
