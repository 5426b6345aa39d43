//! Output layer for the AWS billing report.
//!
//! Encodes chart series as JSON, substitutes them into the page template and
//! drives the per-service chart drawing.

pub mod driver;
pub mod render;
