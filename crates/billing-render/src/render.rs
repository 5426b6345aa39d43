//! HTML page output.
//!
//! Series are encoded as a pretty-printed JSON array (4-space indent) and
//! substituted into a page template at the `%(data)s` placeholder.  `%%` in
//! the template stands for a literal `%`.

use std::path::{Path, PathBuf};

use billing_core::models::DataSeries;
use billing_core::{BillingError, Result};
use serde::Serialize;
use tracing::{debug, info};

/// Placeholder replaced by the series JSON.
pub const DATA_PLACEHOLDER: &str = "%(data)s";

const JSON_INDENT: &[u8] = b"    ";

// ── JSON ──────────────────────────────────────────────────────────────────────

/// Encode series as the JSON document embedded in a page.
pub fn encode_series(series: &[DataSeries]) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    series.serialize(&mut ser)?;
    // serde_json only emits UTF-8, so nothing is ever replaced here.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

// ── PageTemplate ──────────────────────────────────────────────────────────────

/// An HTML/JS page with a `%(data)s` placeholder.
#[derive(Debug, Clone)]
pub struct PageTemplate {
    path: PathBuf,
    text: String,
}

impl PageTemplate {
    /// Read the template at `path`.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let text = std::fs::read_to_string(&path).map_err(|source| BillingError::FileRead {
            path: path.clone(),
            source,
        })?;
        debug!("Loaded template {} ({} bytes)", path.display(), text.len());
        Ok(Self { path, text })
    }

    /// Template from text; `path` is only used in error messages.
    pub fn from_text(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Substitute `data` for the placeholder and unescape `%%`.
    ///
    /// Any other `%` directive is an error.
    pub fn render(&self, data: &str) -> Result<String> {
        let mut out = String::with_capacity(self.text.len() + data.len());
        let mut rest = self.text.as_str();

        while let Some(pos) = rest.find('%') {
            out.push_str(&rest[..pos]);
            let directive = &rest[pos..];

            if let Some(after) = directive.strip_prefix("%%") {
                out.push('%');
                rest = after;
            } else if let Some(after) = directive.strip_prefix(DATA_PLACEHOLDER) {
                out.push_str(data);
                rest = after;
            } else {
                let offset = self.text.len() - directive.len();
                let snippet: String = directive.chars().take(12).collect();
                return Err(BillingError::Template {
                    path: self.path.clone(),
                    message: format!("unsupported directive \"{snippet}\" at byte {offset}"),
                });
            }
        }

        out.push_str(rest);
        Ok(out)
    }
}

// ── PageWriter ────────────────────────────────────────────────────────────────

/// One chart's finished series, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPage {
    pub name: String,
    pub series: Vec<DataSeries>,
}

/// Writes `<chart>.html` pages into an output directory.
#[derive(Debug, Clone)]
pub struct PageWriter {
    template: PageTemplate,
    output_dir: PathBuf,
}

impl PageWriter {
    pub fn new(template: PageTemplate, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            template,
            output_dir: output_dir.into(),
        }
    }

    /// Where the page for `chart_name` goes.
    pub fn page_path(&self, chart_name: &str) -> PathBuf {
        self.output_dir.join(format!("{chart_name}.html"))
    }

    /// Full HTML of one page.
    pub fn render(&self, page: &ChartPage) -> Result<String> {
        self.template.render(&encode_series(&page.series)?)
    }

    /// Render every page, then write them all.
    ///
    /// Nothing is written if any page fails to render.  Returns the paths
    /// written, in page order.
    pub fn write_all(&self, pages: &[ChartPage]) -> Result<Vec<PathBuf>> {
        let rendered = pages
            .iter()
            .map(|page| -> Result<(PathBuf, String)> {
                Ok((self.page_path(&page.name), self.render(page)?))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut written = Vec::with_capacity(rendered.len());
        for (path, html) in rendered {
            std::fs::write(&path, html).map_err(|source| BillingError::FileWrite {
                path: path.clone(),
                source,
            })?;
            info!("Wrote {}", path.display());
            written.push(path);
        }
        Ok(written)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
