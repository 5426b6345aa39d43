//! Record streams: usage report rows normalized into [`UsageRecord`]s.
//!
//! A [`RecordStream`] re-reads its [`CsvSource`] on every traversal and keeps
//! an [`AdapterCache`] of the services seen so far for its whole lifetime.
//! [`RecordBuffer`] holds records parsed once in memory.  Both implement
//! [`RecordSource`], which is all the matcher and catalog need.

use std::collections::HashMap;
use std::path::PathBuf;

use billing_core::models::UsageRecord;
use billing_core::services::ServiceKind;
use billing_core::Result;
use tracing::debug;

use crate::reader::{CsvRows, CsvSource};

// ── RecordSource ──────────────────────────────────────────────────────────────

/// Anything that can be walked, from the start, as a sequence of records.
pub trait RecordSource {
    /// Begin a new full traversal.
    fn traverse(&mut self) -> Result<Box<dyn Iterator<Item = Result<UsageRecord>> + '_>>;
}

// ── AdapterCache ──────────────────────────────────────────────────────────────

/// Service tags resolved so far, remembered in first-seen order.
#[derive(Debug, Default, Clone)]
pub struct AdapterCache {
    by_tag: HashMap<String, ServiceKind>,
    order: Vec<ServiceKind>,
}

impl AdapterCache {
    /// Look up the adapter for `tag`, registering it on first sight.
    pub fn resolve(&mut self, tag: &str, line: u64) -> Result<ServiceKind> {
        if let Some(kind) = self.by_tag.get(tag) {
            return Ok(*kind);
        }
        let kind = ServiceKind::from_tag(tag, line)?;
        debug!("Registered adapter for {} (line {})", tag, line);
        self.by_tag.insert(tag.to_string(), kind);
        self.order.push(kind);
        Ok(kind)
    }

    /// Services seen so far, in the order they first appeared.
    pub fn kinds(&self) -> &[ServiceKind] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

// ── RecordStream ──────────────────────────────────────────────────────────────

/// Lazily normalized view over a usage report.
#[derive(Debug, Clone)]
pub struct RecordStream {
    source: CsvSource,
    adapters: AdapterCache,
}

impl RecordStream {
    pub fn new(source: CsvSource) -> Self {
        Self {
            source,
            adapters: AdapterCache::default(),
        }
    }

    /// Stream over the report file at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(CsvSource::from_path(path))
    }

    /// Start a traversal from the first data row.
    ///
    /// The first row that fails to normalize is yielded as an error; the
    /// caller is expected to stop there.
    pub fn records(&mut self) -> Result<Records<'_>> {
        Ok(Records {
            rows: self.source.open()?,
            adapters: &mut self.adapters,
        })
    }

    /// The rows this stream normalizes.
    pub fn source(&self) -> &CsvSource {
        &self.source
    }

    /// Services met by any traversal of this stream so far.
    pub fn adapters(&self) -> &[ServiceKind] {
        self.adapters.kinds()
    }

    /// Normalize every row once and keep the records in memory.
    pub fn buffer(&mut self) -> Result<RecordBuffer> {
        let records = self.records()?.collect::<Result<Vec<_>>>()?;
        debug!("Buffered {} records", records.len());
        Ok(RecordBuffer::new(records))
    }
}

impl RecordSource for RecordStream {
    fn traverse(&mut self) -> Result<Box<dyn Iterator<Item = Result<UsageRecord>> + '_>> {
        Ok(Box::new(self.records()?))
    }
}

/// One traversal of a [`RecordStream`].
pub struct Records<'a> {
    rows: CsvRows,
    adapters: &'a mut AdapterCache,
}

impl Iterator for Records<'_> {
    type Item = Result<UsageRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = match self.rows.next()? {
            Ok(row) => row,
            Err(e) => return Some(Err(e)),
        };
        Some(
            self.adapters
                .resolve(row.service_tag(), row.line)
                .and_then(|kind| kind.normalize(&row)),
        )
    }
}

// ── RecordBuffer ──────────────────────────────────────────────────────────────

/// Records parsed once and replayed in their original order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordBuffer {
    records: Vec<UsageRecord>,
}

impl RecordBuffer {
    pub fn new(records: Vec<UsageRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[UsageRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordSource for RecordBuffer {
    fn traverse(&mut self) -> Result<Box<dyn Iterator<Item = Result<UsageRecord>> + '_>> {
        Ok(Box::new(self.records.iter().cloned().map(Ok)))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
