//! Error types shared by the ingestion and statistics pipeline.

use thiserror::Error;

/// Fatal errors that abort a whole run.
///
/// Per-row problems that are merely recoverable (an empty required field)
/// never show up here; see [`crate::record::RecordError`].
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("unknown currency code `{code}` at line {line}")]
    UnknownCurrency { code: String, line: u64 },

    #[error("no well-formed vacancy records to aggregate")]
    EmptyDataset,

    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),

    #[error("invalid {field} value `{value}` at line {line}")]
    InvalidField {
        field: &'static str,
        value: String,
        line: u64,
    },

    #[error("salary value out of range at line {line}")]
    SalaryOverflow { line: u64 },

    #[error("exchange rate for `{code}` must be a positive number")]
    InvalidRate { code: String },

    #[error("invalid report configuration: {0}")]
    InvalidConfig(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StatsError>;
