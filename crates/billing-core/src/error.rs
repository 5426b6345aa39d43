use std::path::PathBuf;
use thiserror::Error;

/// All errors produced while building a billing report.
#[derive(Error, Debug)]
pub enum BillingError {
    /// A row's first field names a service with no registered adapter.
    #[error("Unknown service \"{tag}\" on line {line}")]
    UnknownService { tag: String, line: u64 },

    /// A row carries fewer fields than its service layout requires.
    #[error("{service} row on line {line} has {found} fields, expected {expected}")]
    MissingFields {
        service: String,
        line: u64,
        expected: usize,
        found: usize,
    },

    /// A start/end column did not match `%m/%d/%y %H:%M:%S`.
    #[error("Invalid timestamp in {field} on line {line}: \"{value}\"")]
    InvalidTimestamp {
        field: &'static str,
        value: String,
        line: u64,
    },

    /// A usage value column is not a floating point number.
    #[error("Invalid number in {field} on line {line}: \"{value}\"")]
    InvalidNumber {
        field: &'static str,
        value: String,
        line: u64,
    },

    /// The CSV reader rejected the input.
    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A generated page could not be written.
    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The page template contains a directive we cannot substitute.
    #[error("Invalid template {path}: {message}")]
    Template { path: PathBuf, message: String },

    /// A usage-type glob in a chart definition does not compile.
    #[error("Invalid usage type pattern \"{pattern}\": {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// Series data could not be encoded as JSON.
    #[error("Failed to encode JSON: {0}")]
    JsonEncode(#[from] serde_json::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BillingError {
    /// `true` for the malformed-row family: missing fields, bad timestamps and
    /// bad numbers.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::MissingFields { .. } | Self::InvalidTimestamp { .. } | Self::InvalidNumber { .. }
        )
    }
}

/// Convenience alias used throughout the billing crates.
pub type Result<T> = std::result::Result<T, BillingError>;
