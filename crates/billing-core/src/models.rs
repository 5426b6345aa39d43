use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::time_utils::epoch_millis;

/// One CSV data row, fields in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line of the source this row started on.
    pub line: u64,
    /// Field values, unmodified.
    pub fields: Vec<String>,
}

impl RawRow {
    pub fn new(line: u64, fields: Vec<String>) -> Self {
        Self { line, fields }
    }

    /// The first field, which names the AWS service.
    pub fn service_tag(&self) -> &str {
        self.fields.first().map(String::as_str).unwrap_or("")
    }

    /// Field at `idx`, or `None` when the row is too short.
    pub fn field(&self, idx: usize) -> Option<&str> {
        self.fields.get(idx).map(String::as_str)
    }
}

/// A usage report row converted into the shape shared by every service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    /// Service tag as it appeared in the report (e.g. `"AmazonS3"`).
    pub service: String,
    /// API operation (e.g. `"GetObject"`).
    pub operation: String,
    /// Billing usage type (e.g. `"EU-Requests-Tier1"`).
    pub usage_type: String,
    /// Bucket or distribution name, for services that report one.
    #[serde(default)]
    pub resource: Option<String>,
    /// Start of the billing interval (UTC).
    pub start: DateTime<Utc>,
    /// End of the billing interval (UTC).
    pub end: DateTime<Utc>,
    /// Usage quantity for the interval.
    pub value: f64,
}

/// A single chart point: epoch milliseconds and value.
///
/// Serialised as a two-element array `[timestamp_ms, value]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(i64, f64)", into = "(i64, f64)")]
pub struct DataPoint {
    pub timestamp_ms: i64,
    pub value: f64,
}

impl DataPoint {
    pub fn new(timestamp_ms: i64, value: f64) -> Self {
        Self {
            timestamp_ms,
            value,
        }
    }

    /// Point for a record: its start time and its value.
    pub fn from_record(record: &UsageRecord) -> Self {
        Self::new(epoch_millis(record.start), record.value)
    }
}

impl From<(i64, f64)> for DataPoint {
    fn from((timestamp_ms, value): (i64, f64)) -> Self {
        Self::new(timestamp_ms, value)
    }
}

impl From<DataPoint> for (i64, f64) {
    fn from(point: DataPoint) -> Self {
        (point.timestamp_ms, point.value)
    }
}

/// One labelled line on a chart, in the layout the page template consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSeries {
    pub label: String,
    pub data: Vec<DataPoint>,
    pub hoverable: bool,
}

impl DataSeries {
    pub fn new(label: impl Into<String>, data: Vec<DataPoint>) -> Self {
        Self {
            label: label.into(),
            data,
            hoverable: true,
        }
    }
}

/// How a series pair selects and combines records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Operation must equal the pair's operation; one point per record.
    Exact,
    /// Operation is ignored; adjacent points with equal timestamps are summed.
    Sum,
}

/// One series of a chart: which records feed it and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPair {
    /// Literal operation name for [`MatchMode::Exact`], a display designator
    /// for [`MatchMode::Sum`].
    pub operation: String,
    /// Shell-style glob over the record's usage type.
    pub usage_type: String,
    pub mode: MatchMode,
}

impl SeriesPair {
    pub fn exact(operation: impl Into<String>, usage_type: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            usage_type: usage_type.into(),
            mode: MatchMode::Exact,
        }
    }

    pub fn sum(designator: impl Into<String>, usage_type: impl Into<String>) -> Self {
        Self {
            operation: designator.into(),
            usage_type: usage_type.into(),
            mode: MatchMode::Sum,
        }
    }

    /// Build a pair from the legacy two-string form, where an operation
    /// containing `sum` (case-sensitive) selects [`MatchMode::Sum`].
    pub fn from_designator(operation: &str, usage_type: &str) -> Self {
        if operation.contains("sum") {
            Self::sum(operation, usage_type)
        } else {
            Self::exact(operation, usage_type)
        }
    }

    /// Series label: `"<operation>:<usage_type>"`.
    pub fn label(&self) -> String {
        format!("{}:{}", self.operation, self.usage_type)
    }
}

/// A named chart: one HTML page made of several series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// Page name; the output file is `<name>.html`.
    pub name: String,
    pub pairs: Vec<SeriesPair>,
    /// Disabled charts are defined but never drawn.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl ChartSpec {
    pub fn new(name: impl Into<String>, pairs: Vec<SeriesPair>) -> Self {
        Self {
            name: name.into(),
            pairs,
            enabled: true,
        }
    }

    /// Same chart, marked as not drawn.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_row_service_tag() {
        let row = RawRow::new(2, vec!["AmazonS3".into(), "GetObject".into()]);
        assert_eq!(row.service_tag(), "AmazonS3");
        assert_eq!(row.field(1), Some("GetObject"));
        assert_eq!(row.field(5), None);
    }

    #[test]
    fn test_raw_row_empty_has_blank_tag() {
        let row = RawRow::new(1, vec![]);
        assert_eq!(row.service_tag(), "");
    }

    #[test]
    fn test_data_point_serializes_as_pair() {
        let point = DataPoint::new(60_000, 1.5);
        assert_eq!(serde_json::to_string(&point).unwrap(), "[60000,1.5]");
    }

    #[test]
    fn test_data_series_field_order() {
        let series = DataSeries::new("SelectGet:Requests", vec![DataPoint::new(0, 3.0)]);
        assert_eq!(
            serde_json::to_string(&series).unwrap(),
            r#"{"label":"SelectGet:Requests","data":[[0,3.0]],"hoverable":true}"#
        );
    }

    #[test]
    fn test_from_designator_detects_sum() {
        let pair = SeriesPair::from_designator("s3_request_sum", "*Requests-Tier?");
        assert_eq!(pair.mode, MatchMode::Sum);

        let pair = SeriesPair::from_designator("StandardStorage_sum", "StorageObjectCount");
        assert_eq!(pair.mode, MatchMode::Sum);
    }

    #[test]
    fn test_from_designator_is_case_sensitive() {
        let pair = SeriesPair::from_designator("TotalSUM", "Requests");
        assert_eq!(pair.mode, MatchMode::Exact);

        let pair = SeriesPair::from_designator("GetObject", "Requests-Tier?");
        assert_eq!(pair.mode, MatchMode::Exact);
    }

    #[test]
    fn test_pair_label() {
        assert_eq!(
            SeriesPair::exact("GET", "EU-Requests-Tier1").label(),
            "GET:EU-Requests-Tier1"
        );
        assert_eq!(
            SeriesPair::sum("s3_bytes_sum", "*DataTransfer-*").label(),
            "s3_bytes_sum:*DataTransfer-*"
        );
    }

    #[test]
    fn test_chart_disabled() {
        let chart = ChartSpec::new("cf_bytes", vec![]);
        assert!(chart.enabled);
        assert!(!chart.disabled().enabled);
    }
}
