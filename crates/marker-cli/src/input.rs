//! Problem table input.
//!
//! Rows are read from a CSV file with a header line. Columns are looked up
//! by header name, so their order does not matter and extra columns are
//! ignored. A row that lacks one of the required fields is reported as a
//! [`RowError`] and the reader moves on to the next row.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use marker_core::ProblemRecord;

pub const PROBLEM_INDEX: &str = "problem_index";
pub const QUESTION: &str = "Question";
pub const ANSWER: &str = "Answer";
pub const GENERATED_ANSWER: &str = "generated_answer";

/// Errors that stop the input from being read at all.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("CSV file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to open CSV file: {0}")]
    Open(#[source] csv::Error),

    #[error("Failed to read CSV header: {0}")]
    Header(#[source] csv::Error),
}

/// Errors confined to a single row.
#[derive(Error, Debug)]
pub enum RowError {
    #[error("Missing field in CSV row: {0}")]
    MissingField(&'static str),

    #[error("Malformed CSV row: {0}")]
    Malformed(#[from] csv::Error),
}

/// Header positions of the required columns.
#[derive(Debug, Clone, Copy)]
struct Columns {
    problem_index: Option<usize>,
    question: Option<usize>,
    answer: Option<usize>,
    generated_answer: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let position = |name: &str| headers.iter().position(|h| h == name);
        Self {
            problem_index: position(PROBLEM_INDEX),
            question: position(QUESTION),
            answer: position(ANSWER),
            generated_answer: position(GENERATED_ANSWER),
        }
    }

    fn missing(&self) -> Vec<&'static str> {
        [
            (PROBLEM_INDEX, self.problem_index),
            (QUESTION, self.question),
            (ANSWER, self.answer),
            (GENERATED_ANSWER, self.generated_answer),
        ]
        .into_iter()
        .filter(|(_, position)| position.is_none())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Streams [`ProblemRecord`]s out of a CSV table.
pub struct ProblemReader<R> {
    records: csv::StringRecordsIntoIter<R>,
    columns: Columns,
}

impl ProblemReader<File> {
    /// Open a CSV file. Fails if the file does not exist or has no
    /// readable header.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(InputError::NotFound(path.to_path_buf()));
        }

        let reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .map_err(InputError::Open)?;
        Self::from_csv(reader)
    }
}

impl<R: io::Read> ProblemReader<R> {
    /// Read CSV from any reader.
    pub fn from_reader(reader: R) -> Result<Self, InputError> {
        let reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        Self::from_csv(reader)
    }

    fn from_csv(mut reader: csv::Reader<R>) -> Result<Self, InputError> {
        let headers = reader.headers().map_err(InputError::Header)?;
        let columns = Columns::from_headers(headers);

        let missing = columns.missing();
        if !missing.is_empty() {
            // Every row will be skipped; say so once up front.
            tracing::warn!(missing = ?missing, "CSV header lacks required columns");
        }

        Ok(Self {
            records: reader.into_records(),
            columns,
        })
    }

    fn to_problem(&self, record: &csv::StringRecord) -> Result<ProblemRecord, RowError> {
        let field = |position: Option<usize>, name: &'static str| {
            position
                .and_then(|i| record.get(i))
                .map(str::to_string)
                .ok_or(RowError::MissingField(name))
        };

        Ok(ProblemRecord {
            problem_index: field(self.columns.problem_index, PROBLEM_INDEX)?,
            question: field(self.columns.question, QUESTION)?,
            correct_answer: field(self.columns.answer, ANSWER)?,
            generated_answer: field(self.columns.generated_answer, GENERATED_ANSWER)?,
        })
    }
}

impl<R: io::Read> Iterator for ProblemReader<R> {
    type Item = Result<ProblemRecord, RowError>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        Some(record.map_err(RowError::from).and_then(|r| self.to_problem(&r)))
    }
}
