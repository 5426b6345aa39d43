//! Chart definitions drawn for each service.
//!
//! Pages are named after the chart; every pair becomes one labelled series.

use crate::models::{ChartSpec, SeriesPair};

fn exact_pairs(operations: &[&str], usage_type: &str) -> Vec<SeriesPair> {
    operations
        .iter()
        .map(|op| SeriesPair::exact(*op, usage_type))
        .collect()
}

/// SimpleDB request counts and transfer volume.
pub fn simpledb() -> Vec<ChartSpec> {
    vec![
        ChartSpec::new(
            "sdb_request",
            exact_pairs(
                &["SelectGet", "PutAttributes", "GetAttributes", "ListDomains"],
                "Requests",
            ),
        ),
        ChartSpec::new(
            "sdb_bytes",
            vec![
                SeriesPair::exact("GetAttributes", "EC2DataTransfer-In-Bytes"),
                SeriesPair::exact("SelectGet", "EC2DataTransfer-Out-Bytes"),
                SeriesPair::exact("PutAttributes", "EC2DataTransfer-Out-Bytes"),
                SeriesPair::exact("ListDomains", "DataTransfer-Out-Bytes"),
            ],
        ),
    ]
}

/// S3 charts, split by billing region (EU vs US standard).
///
/// S3 bills requests in two groups (POST/PUT/LIST/COPY, GET and others) and
/// data transfer per region.  The EU charts carry an extra summed series over
/// all regions.
pub fn s3() -> Vec<ChartSpec> {
    const OPERATIONS: [&str; 4] = ["GetObject", "PutObject", "ListBucket", "HeadObject"];

    let mut requests_eu = exact_pairs(&OPERATIONS, "EU-Requests-Tier?");
    requests_eu.push(SeriesPair::sum("s3_request_sum", "*Requests-Tier?"));

    vec![
        ChartSpec::new("s3_requests_EU", requests_eu),
        ChartSpec::new("s3_requests_US", exact_pairs(&OPERATIONS, "Requests-Tier?")),
        ChartSpec::new(
            "s3_bytes_EU",
            vec![
                SeriesPair::exact("GetObject", "EU-DataTransfer-Out-Bytes"),
                SeriesPair::exact("PutObject", "EU-C3DataTransfer-In-Bytes"),
                SeriesPair::exact("ListBucket", "EU-DataTransfer-Out-Bytes"),
                SeriesPair::sum("s3_bytes_sum", "*DataTransfer-*"),
            ],
        ),
        ChartSpec::new(
            "s3_bytes_US",
            vec![
                SeriesPair::exact("GetObject", "DataTransfer-Out-Bytes"),
                SeriesPair::exact("PutObject", "C3DataTransfer-In-Bytes"),
                SeriesPair::exact("ListBucket", "DataTransfer-Out-Bytes"),
            ],
        ),
        ChartSpec::new(
            "s3_objects",
            vec![SeriesPair::sum("StandardStorage_sum", "StorageObjectCount")],
        ),
    ]
}

pub fn sqs() -> Vec<ChartSpec> {
    vec![
        ChartSpec::new("sqs_request", exact_pairs(&["Receive", "Send"], "Requests-RBP")),
        ChartSpec::new(
            "sqs_bytes",
            vec![
                SeriesPair::exact("Receive", "EC2DataTransfer-Out-Bytes"),
                SeriesPair::exact("Send", "EC2DataTransfer-In-Bytes"),
            ],
        ),
    ]
}

/// CloudFront edge requests per region.  The transfer chart is kept defined
/// but not drawn.
pub fn cloudfront() -> Vec<ChartSpec> {
    const REGIONS: [&str; 4] = ["EU", "JP", "US", "AP"];

    let per_region = |suffix: &str| -> Vec<SeriesPair> {
        REGIONS
            .iter()
            .map(|region| SeriesPair::exact("GET", format!("{region}-{suffix}")))
            .collect()
    };

    vec![
        ChartSpec::new("cf_request", per_region("Requests-Tier1")),
        ChartSpec::new("cf_bytes", per_region("DataTransfer-Out-Bytes")).disabled(),
    ]
}

pub fn ses() -> Vec<ChartSpec> {
    vec![
        ChartSpec::new(
            "ses_request",
            vec![
                SeriesPair::exact("SendEmail", "Requests"),
                SeriesPair::exact("SendEmail", "Recipients"),
                SeriesPair::exact("SendEmail", "Requests-EC2"),
            ],
        ),
        ChartSpec::new(
            "ses_bytes",
            vec![
                SeriesPair::exact("SendEmail", "DataTransfer-In-Bytes"),
                SeriesPair::exact("SendEmail", "DataTransfer-Out-Bytes"),
                SeriesPair::exact("SendEmail", "EC2DataTransfer-In-Bytes"),
            ],
        ),
    ]
}
