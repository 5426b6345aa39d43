//! Data layer for the AWS billing report.
//!
//! Reads usage report CSV rows, normalizes them through the service
//! adapters, matches records into chart series and folds summed series.

pub mod aggregator;
pub mod catalog;
pub mod matcher;
pub mod reader;
pub mod stream;

pub use billing_core as core;
