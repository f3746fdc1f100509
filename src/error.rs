use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a whole batch. Value-level anomalies are reported as
/// `crate::diagnostics::Diagnostic` instead.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("unrecognized report format, columns: {columns:?}")]
    UnrecognizedFormat { columns: Vec<String> },
    #[error("malformed row {row}: field {field:?} {reason}")]
    MalformedRow {
        /// 1-based data row number, not counting the header row.
        row: usize,
        field: &'static str,
        reason: String,
    },
    #[error("bad template {path:?}: {reason}")]
    Template { path: PathBuf, reason: String },
    #[error("bad settings {path:?}: {reason}")]
    Settings { path: PathBuf, reason: String },
    #[error("{path:?}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ConvertError {
    pub fn malformed_row<S: Into<String>>(row: usize, field: &'static str, reason: S) -> Self {
        ConvertError::MalformedRow {
            row,
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = ConvertError> = std::result::Result<T, E>;
