use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Report file read when no input is given.
pub const DEFAULT_REPORT: &str = "report.csv";
/// Page template read from the working directory by default.
pub const DEFAULT_TEMPLATE: &str = "index.tpl";
pub const DEFAULT_LOG_LEVEL: &str = "INFO";

/// Overrides the template path.
pub const TEMPLATE_ENV: &str = "AWS_REPORT_TEMPLATE";
/// Overrides the directory pages are written to.
pub const OUTPUT_DIR_ENV: &str = "AWS_REPORT_OUTPUT_DIR";
/// Log level name: `DEBUG`, `INFO`, `WARNING` or `ERROR`.
pub const LOG_LEVEL_ENV: &str = "AWS_REPORT_LOG";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Draw usage charts from an AWS usage report
#[derive(Parser, Debug, Clone)]
#[command(
    name = "aws-billing-report",
    about = "Draw usage charts from an AWS usage report",
    version
)]
pub struct Settings {
    /// AWS usage report (CSV)
    #[arg(default_value = DEFAULT_REPORT)]
    pub input: PathBuf,

    /// HTML template containing a `%(data)s` placeholder
    #[arg(skip = PathBuf::from(DEFAULT_TEMPLATE))]
    pub template: PathBuf,

    /// Directory receiving `<chart>.html` pages
    #[arg(skip = PathBuf::from("."))]
    pub output_dir: PathBuf,

    /// Logging level
    #[arg(skip = DEFAULT_LOG_LEVEL.to_string())]
    pub log_level: String,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments and apply environment overrides.
    pub fn load() -> Self {
        Self::load_from(std::env::args_os(), |key| std::env::var(key).ok())
    }

    /// Same as [`load`](Self::load) with an explicit argument list and
    /// environment lookup, so tests need not touch the process environment.
    pub fn load_from<I, T>(args: I, env: impl Fn(&str) -> Option<String>) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut settings = Settings::parse_from(args);
        settings.apply_env(env);
        settings
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = non_empty(TEMPLATE_ENV) {
            self.template = PathBuf::from(v);
        }
        if let Some(v) = non_empty(OUTPUT_DIR_ENV) {
            self.output_dir = PathBuf::from(v);
        }
        if let Some(v) = non_empty(LOG_LEVEL_ENV) {
            self.log_level = v.trim().to_string();
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
