//! Service adapters: which AWS services a usage report may contain, how each
//! one lays out its columns, and which charts it draws.
//!
//! Dispatch goes through a fixed registry table keyed by service tag.  Adding
//! a service means adding a [`ServiceKind`] variant and one registry entry.

use std::fmt;

use crate::charts;
use crate::error::{BillingError, Result};
use crate::models::{ChartSpec, RawRow, UsageRecord};
use crate::time_utils::parse_report_timestamp;

// ── Row layouts ───────────────────────────────────────────────────────────────

/// Column layout of one service's rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLayout {
    /// `Service, Operation, UsageType, StartTime, EndTime, UsageValue`
    Plain,
    /// `Service, Operation, UsageType, Resource, StartTime, EndTime, UsageValue`
    WithResource,
}

impl RowLayout {
    /// Number of fields a row must carry.
    pub fn width(self) -> usize {
        match self {
            Self::Plain => 6,
            Self::WithResource => 7,
        }
    }

    /// Index of the `StartTime` column; `EndTime` and `UsageValue` follow it.
    fn start_index(self) -> usize {
        match self {
            Self::Plain => 3,
            Self::WithResource => 4,
        }
    }
}

// ── ServiceKind ───────────────────────────────────────────────────────────────

/// Every AWS service this tool knows how to chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    S3,
    SimpleDb,
    Sqs,
    CloudFront,
    Ses,
}

struct ServiceEntry {
    kind: ServiceKind,
    tag: &'static str,
    layout: RowLayout,
    charts: fn() -> Vec<ChartSpec>,
}

static REGISTRY: [ServiceEntry; 5] = [
    ServiceEntry {
        kind: ServiceKind::S3,
        tag: "AmazonS3",
        layout: RowLayout::WithResource,
        charts: charts::s3,
    },
    ServiceEntry {
        kind: ServiceKind::SimpleDb,
        tag: "AmazonSimpleDB",
        layout: RowLayout::Plain,
        charts: charts::simpledb,
    },
    ServiceEntry {
        kind: ServiceKind::Sqs,
        tag: "AWSQueueService",
        layout: RowLayout::Plain,
        charts: charts::sqs,
    },
    ServiceEntry {
        kind: ServiceKind::CloudFront,
        tag: "AmazonCloudFront",
        layout: RowLayout::WithResource,
        charts: charts::cloudfront,
    },
    ServiceEntry {
        kind: ServiceKind::Ses,
        tag: "AmazonSES",
        layout: RowLayout::Plain,
        charts: charts::ses,
    },
];

impl ServiceKind {
    /// All registered services, in registry order.
    pub const ALL: [ServiceKind; 5] = [
        ServiceKind::S3,
        ServiceKind::SimpleDb,
        ServiceKind::Sqs,
        ServiceKind::CloudFront,
        ServiceKind::Ses,
    ];

    /// Resolve the service named by a row's first field.
    ///
    /// `line` is only used for the error message.
    pub fn from_tag(tag: &str, line: u64) -> Result<Self> {
        REGISTRY
            .iter()
            .find(|entry| entry.tag == tag)
            .map(|entry| entry.kind)
            .ok_or_else(|| BillingError::UnknownService {
                tag: tag.to_string(),
                line,
            })
    }

    fn entry(self) -> &'static ServiceEntry {
        // REGISTRY holds one entry per variant, in declaration order.
        &REGISTRY[self as usize]
    }

    /// The tag identifying this service in usage reports.
    pub fn tag(self) -> &'static str {
        self.entry().tag
    }

    pub fn layout(self) -> RowLayout {
        self.entry().layout
    }

    /// Chart definitions drawn for this service, disabled ones included.
    pub fn charts(self) -> Vec<ChartSpec> {
        (self.entry().charts)()
    }

    /// Convert a raw report row into a [`UsageRecord`].
    ///
    /// Fields past the layout's width are ignored.
    pub fn normalize(self, row: &RawRow) -> Result<UsageRecord> {
        let layout = self.layout();
        if row.fields.len() < layout.width() {
            return Err(BillingError::MissingFields {
                service: self.tag().to_string(),
                line: row.line,
                expected: layout.width(),
                found: row.fields.len(),
            });
        }

        let fields = &row.fields;
        let resource = match layout {
            RowLayout::Plain => None,
            RowLayout::WithResource => Some(fields[3].clone()),
        };
        let at = layout.start_index();

        Ok(UsageRecord {
            service: fields[0].clone(),
            operation: fields[1].clone(),
            usage_type: fields[2].clone(),
            resource,
            start: timestamp_field(&fields[at], "StartTime", row.line)?,
            end: timestamp_field(&fields[at + 1], "EndTime", row.line)?,
            value: value_field(&fields[at + 2], row.line)?,
        })
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// ── Field parsers ─────────────────────────────────────────────────────────────

fn timestamp_field(
    value: &str,
    field: &'static str,
    line: u64,
) -> Result<chrono::DateTime<chrono::Utc>> {
    parse_report_timestamp(value).ok_or_else(|| BillingError::InvalidTimestamp {
        field,
        value: value.to_string(),
        line,
    })
}

fn value_field(value: &str, line: u64) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| BillingError::InvalidNumber {
            field: "UsageValue",
            value: value.to_string(),
            line,
        })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_utils::epoch_millis;
    use chrono::Timelike;

    fn row(fields: &[&str]) -> RawRow {
        RawRow::new(2, fields.iter().map(|f| f.to_string()).collect())
    }

    // ── registry ──────────────────────────────────────────────────────────────

    #[test]
    fn test_registry_order_matches_variants() {
        for kind in ServiceKind::ALL {
            assert_eq!(kind.entry().kind, kind);
        }
    }

    #[test]
    fn test_from_tag_round_trip() {
        for kind in ServiceKind::ALL {
            assert_eq!(ServiceKind::from_tag(kind.tag(), 1).unwrap(), kind);
        }
    }

    #[test]
    fn test_from_tag_unknown() {
        let err = ServiceKind::from_tag("AmazonEC2", 7).unwrap_err();
        match err {
            BillingError::UnknownService { tag, line } => {
                assert_eq!(tag, "AmazonEC2");
                assert_eq!(line, 7);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_tag_is_case_sensitive() {
        assert!(ServiceKind::from_tag("amazons3", 1).is_err());
    }

    #[test]
    fn test_layouts() {
        assert_eq!(ServiceKind::S3.layout(), RowLayout::WithResource);
        assert_eq!(ServiceKind::CloudFront.layout(), RowLayout::WithResource);
        assert_eq!(ServiceKind::SimpleDb.layout(), RowLayout::Plain);
        assert_eq!(ServiceKind::Sqs.layout(), RowLayout::Plain);
        assert_eq!(ServiceKind::Ses.layout(), RowLayout::Plain);
    }

    // ── normalize ─────────────────────────────────────────────────────────────

    #[test]
    fn test_normalize_plain_row() {
        let record = ServiceKind::SimpleDb
            .normalize(&row(&[
                "AmazonSimpleDB",
                "SelectGet",
                "Requests",
                "01/01/70 00:01:00",
                "01/01/70 01:01:00",
                "3",
            ]))
            .unwrap();

        assert_eq!(record.service, "AmazonSimpleDB");
        assert_eq!(record.operation, "SelectGet");
        assert_eq!(record.usage_type, "Requests");
        assert_eq!(record.resource, None);
        assert_eq!(epoch_millis(record.start), 60_000);
        assert_eq!(record.end.hour(), 1);
        assert_eq!(record.value, 3.0);
    }

    #[test]
    fn test_normalize_resource_row() {
        let record = ServiceKind::S3
            .normalize(&row(&[
                "AmazonS3",
                "GetObject",
                "EU-Requests-Tier2",
                "my-bucket",
                "03/14/12 15:09:00",
                "03/14/12 16:09:00",
                "0.000123456789",
            ]))
            .unwrap();

        assert_eq!(record.resource.as_deref(), Some("my-bucket"));
        assert_eq!(record.start.minute(), 9);
        assert_eq!(record.value, 0.000123456789);
    }

    #[test]
    fn test_normalize_keeps_value_precision() {
        let record = ServiceKind::Ses
            .normalize(&row(&[
                "AmazonSES",
                "SendEmail",
                "DataTransfer-Out-Bytes",
                "01/01/12 00:00:00",
                "01/01/12 01:00:00",
                "123456789.987654321",
            ]))
            .unwrap();
        assert_eq!(record.value, "123456789.987654321".parse::<f64>().unwrap());
    }

    #[test]
    fn test_normalize_accepts_zero_and_negative() {
        let base = [
            "AWSQueueService",
            "Send",
            "Requests-RBP",
            "01/01/12 00:00:00",
            "01/01/12 01:00:00",
        ];
        for value in ["0", "-4.5"] {
            let mut fields = base.to_vec();
            fields.push(value);
            let record = ServiceKind::Sqs.normalize(&row(&fields)).unwrap();
            assert_eq!(record.value, value.parse::<f64>().unwrap());
        }
    }

    #[test]
    fn test_normalize_trims_value() {
        let record = ServiceKind::Sqs
            .normalize(&row(&[
                "AWSQueueService",
                "Receive",
                "Requests-RBP",
                "01/01/12 00:00:00",
                "01/01/12 01:00:00",
                " 12 ",
            ]))
            .unwrap();
        assert_eq!(record.value, 12.0);
    }

    #[test]
    fn test_normalize_ignores_extra_fields() {
        let record = ServiceKind::SimpleDb
            .normalize(&row(&[
                "AmazonSimpleDB",
                "ListDomains",
                "Requests",
                "01/01/12 00:00:00",
                "01/01/12 01:00:00",
                "1",
                "trailing",
            ]))
            .unwrap();
        assert_eq!(record.value, 1.0);
    }

    #[test]
    fn test_normalize_missing_fields() {
        let err = ServiceKind::CloudFront
            .normalize(&row(&["AmazonCloudFront", "GET", "EU-Requests-Tier1"]))
            .unwrap_err();
        assert!(err.is_parse_error());
        match err {
            BillingError::MissingFields {
                expected, found, ..
            } => {
                assert_eq!(expected, 7);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_normalize_bad_timestamp() {
        let err = ServiceKind::SimpleDb
            .normalize(&row(&[
                "AmazonSimpleDB",
                "SelectGet",
                "Requests",
                "01/01/12 00:00:00",
                "2012-01-01 01:00",
                "1",
            ]))
            .unwrap_err();
        match err {
            BillingError::InvalidTimestamp { field, value, line } => {
                assert_eq!(field, "EndTime");
                assert_eq!(value, "2012-01-01 01:00");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_normalize_bad_value() {
        let err = ServiceKind::SimpleDb
            .normalize(&row(&[
                "AmazonSimpleDB",
                "SelectGet",
                "Requests",
                "01/01/12 00:00:00",
                "01/01/12 01:00:00",
                "three",
            ]))
            .unwrap_err();
        assert!(matches!(err, BillingError::InvalidNumber { .. }));
    }

    // ── charts ────────────────────────────────────────────────────────────────

    #[test]
    fn test_every_service_has_charts() {
        for kind in ServiceKind::ALL {
            assert!(!kind.charts().is_empty(), "{kind} has no charts");
        }
    }

    #[test]
    fn test_display_is_tag() {
        assert_eq!(ServiceKind::Sqs.to_string(), "AWSQueueService");
    }
}
