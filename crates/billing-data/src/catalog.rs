//! Inventory of what a usage report contains.
//!
//! Lists the distinct operations and usage types, and totals the usage of an
//! exact (operation, usage type) combination.

use billing_core::Result;

use crate::stream::RecordSource;

/// Sum of the values of every record whose operation and usage type equal
/// the given ones exactly.
pub fn total(source: &mut impl RecordSource, operation: &str, usage_type: &str) -> Result<f64> {
    let mut sum = 0.0;
    for record in source.traverse()? {
        let record = record?;
        if record.operation == operation && record.usage_type == usage_type {
            sum += record.value;
        }
    }
    Ok(sum)
}

/// A usage type / operation combination with its total usage.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogTotal {
    pub usage_type: String,
    pub operation: String,
    pub total: f64,
}

/// Distinct operations and usage types of a report, first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsageCatalog {
    pub operations: Vec<String>,
    pub usage_types: Vec<String>,
    /// Number of records traversed while collecting.
    pub records: usize,
}

impl UsageCatalog {
    /// Walk `source` once and note every new operation and usage type.
    pub fn collect(source: &mut impl RecordSource) -> Result<Self> {
        let mut catalog = Self::default();
        for record in source.traverse()? {
            let record = record?;
            catalog.records += 1;
            if !catalog.operations.contains(&record.operation) {
                catalog.operations.push(record.operation);
            }
            if !catalog.usage_types.contains(&record.usage_type) {
                catalog.usage_types.push(record.usage_type);
            }
        }
        Ok(catalog)
    }

    /// Every usage type × operation combination with a positive total,
    /// grouped by usage type.
    ///
    /// Costs one traversal of `source` per combination.
    pub fn nonzero_totals(&self, source: &mut impl RecordSource) -> Result<Vec<CatalogTotal>> {
        let mut out = Vec::new();
        for usage_type in &self.usage_types {
            for operation in &self.operations {
                let sum = total(source, operation, usage_type)?;
                if sum > 0.0 {
                    out.push(CatalogTotal {
                        usage_type: usage_type.clone(),
                        operation: operation.clone(),
                        total: sum,
                    });
                }
            }
        }
        Ok(out)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
