//! Report driver: from a usage report to one HTML page per chart.
//!
//! 1. A discovery pass walks the whole report.  It builds the usage catalog,
//!    registers every service present and validates every row, so a bad row
//!    stops the run before any page exists.
//! 2. Each service seen draws its enabled charts, in first-seen order.
//! 3. All pages are rendered, then written.

use std::path::PathBuf;

use billing_core::Result;
use billing_data::catalog::UsageCatalog;
use billing_data::matcher::build_series;
use billing_data::stream::RecordStream;
use tracing::{debug, info, Level};

use crate::render::{ChartPage, PageWriter};

pub struct ReportDriver {
    writer: PageWriter,
}

impl ReportDriver {
    pub fn new(writer: PageWriter) -> Self {
        Self { writer }
    }

    /// Build the series of every chart the report's services draw.
    pub fn collect_pages(&self, stream: &mut RecordStream) -> Result<Vec<ChartPage>> {
        if let Some(path) = stream.source().path() {
            info!("Reading usage report {}", path.display());
        }
        let catalog = UsageCatalog::collect(stream)?;
        info!(
            "Read {} records: {} operations, {} usage types, services: {}",
            catalog.records,
            catalog.operations.len(),
            catalog.usage_types.len(),
            stream
                .adapters()
                .iter()
                .map(|kind| kind.tag())
                .collect::<Vec<_>>()
                .join(", ")
        );

        if tracing::enabled!(Level::DEBUG) {
            debug!("Operation / usage type totals:");
            for t in catalog.nonzero_totals(stream)? {
                debug!("  {}/{} : {}", t.usage_type, t.operation, t.total);
            }
        }

        let kinds = stream.adapters().to_vec();
        let mut pages = Vec::new();
        for kind in kinds {
            for chart in kind.charts() {
                if !chart.enabled {
                    debug!("Skipping disabled chart {} for {}", chart.name, kind);
                    continue;
                }
                let series = build_series(&chart, stream)?;
                pages.push(ChartPage {
                    name: chart.name,
                    series,
                });
            }
        }
        Ok(pages)
    }

    /// Draw every chart and write its page.  Returns the files written.
    pub fn draw_all(&self, stream: &mut RecordStream) -> Result<Vec<PathBuf>> {
        let pages = self.collect_pages(stream)?;
        info!("Rendering {} charts", pages.len());
        self.writer.write_all(&pages)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
