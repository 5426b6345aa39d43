//! CSV row source for AWS usage reports.
//!
//! A [`CsvSource`] can be opened any number of times; each [`CsvSource::open`]
//! starts a fresh pass from the top of the input, skipping the header row.

use std::fs::File;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use billing_core::models::RawRow;
use billing_core::{BillingError, Result};
use tracing::debug;

// ── Public API ────────────────────────────────────────────────────────────────

/// Where report rows come from.
#[derive(Debug, Clone)]
pub struct CsvSource {
    origin: Origin,
}

#[derive(Debug, Clone)]
enum Origin {
    File(PathBuf),
    Memory(Arc<[u8]>),
}

impl CsvSource {
    /// Rows read from a file on disk.  The file is opened lazily, once per pass.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            origin: Origin::File(path.into()),
        }
    }

    /// Rows read from an in-memory report, header row included.
    pub fn from_text(text: impl Into<String>) -> Self {
        let bytes: Arc<[u8]> = Arc::from(text.into().into_bytes());
        Self {
            origin: Origin::Memory(bytes),
        }
    }

    /// Path of a file-backed source.
    pub fn path(&self) -> Option<&Path> {
        match &self.origin {
            Origin::File(path) => Some(path),
            Origin::Memory(_) => None,
        }
    }

    /// Start a new pass over the rows.
    ///
    /// The file handle lives inside the returned iterator and is closed when
    /// it is dropped, whether the pass finished or stopped on an error.
    pub fn open(&self) -> Result<CsvRows> {
        let input: Box<dyn Read> = match &self.origin {
            Origin::File(path) => {
                debug!("Opening usage report {}", path.display());
                let file = File::open(path).map_err(|source| BillingError::FileRead {
                    path: path.clone(),
                    source,
                })?;
                Box::new(file)
            }
            Origin::Memory(bytes) => Box::new(Cursor::new(Arc::clone(bytes))),
        };

        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(input);

        Ok(CsvRows {
            records: reader.into_records(),
        })
    }
}

/// One pass over a report's data rows.
pub struct CsvRows {
    records: csv::StringRecordsIntoIter<Box<dyn Read>>,
}

impl Iterator for CsvRows {
    type Item = Result<RawRow>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match self.records.next()? {
            Ok(record) => record,
            Err(e) => return Some(Err(BillingError::Csv(e))),
        };
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let fields = record.iter().map(str::to_string).collect();
        Some(Ok(RawRow::new(line, fields)))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
