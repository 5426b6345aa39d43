//! Series matching: turn a chart definition into labelled data series.
//!
//! Each pair of a [`ChartSpec`] gets its own full traversal of the record
//! source.  Exact pairs compare the operation literally and the usage type
//! with a case-insensitive glob; sum pairs ignore the operation, match the
//! usage type case-sensitively and fold equal adjacent timestamps.

use billing_core::models::{ChartSpec, DataPoint, DataSeries, MatchMode, SeriesPair, UsageRecord};
use billing_core::{BillingError, Result};
use glob::{MatchOptions, Pattern};
use tracing::debug;

use crate::aggregator::SeriesAccumulator;
use crate::stream::RecordSource;

// ── PairFilter ────────────────────────────────────────────────────────────────

/// Compiled record predicate for one [`SeriesPair`].
#[derive(Debug, Clone)]
pub struct PairFilter {
    mode: MatchMode,
    operation: String,
    pattern: Pattern,
    options: MatchOptions,
}

impl PairFilter {
    pub fn new(pair: &SeriesPair) -> Result<Self> {
        let pattern =
            Pattern::new(&pair.usage_type).map_err(|source| BillingError::InvalidPattern {
                pattern: pair.usage_type.clone(),
                source,
            })?;
        let options = MatchOptions {
            case_sensitive: pair.mode == MatchMode::Sum,
            require_literal_separator: false,
            require_literal_leading_dot: false,
        };
        Ok(Self {
            mode: pair.mode,
            operation: pair.operation.clone(),
            pattern,
            options,
        })
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Whether `record` feeds this pair's series.
    pub fn matches(&self, record: &UsageRecord) -> bool {
        let operation_ok = match self.mode {
            MatchMode::Exact => record.operation == self.operation,
            MatchMode::Sum => true,
        };
        operation_ok && self.pattern.matches_with(&record.usage_type, self.options)
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Build the series of one pair with a single traversal of `source`.
pub fn build_pair_series(pair: &SeriesPair, source: &mut impl RecordSource) -> Result<DataSeries> {
    let filter = PairFilter::new(pair)?;
    let mut acc = SeriesAccumulator::new(filter.mode());

    for record in source.traverse()? {
        let record = record?;
        if filter.matches(&record) {
            acc.push(DataPoint::from_record(&record));
        }
    }

    debug!("{}: {} points", pair.label(), acc.len());
    Ok(DataSeries::new(pair.label(), acc.into_points()))
}

/// Build every series of `chart`, in pair order.
pub fn build_series(chart: &ChartSpec, source: &mut impl RecordSource) -> Result<Vec<DataSeries>> {
    debug!("Building chart {} ({} series)", chart.name, chart.pairs.len());
    chart
        .pairs
        .iter()
        .map(|pair| build_pair_series(pair, &mut *source))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
