//! Shared types for the AWS billing report.
//!
//! Models, the error taxonomy, report timestamp handling, the service
//! registry with its row normalizers and chart definitions, and CLI settings.

pub mod charts;
pub mod error;
pub mod models;
pub mod services;
pub mod settings;
pub mod time_utils;

pub use error::{BillingError, Result};
