use std::path::Path;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a level name (`DEBUG`, `INFO`, `WARNING`, `ERROR`, any case) to an
/// [`EnvFilter`] directive.  Other strings are passed through unchanged, so
/// full directives such as `billing_data=debug` also work.
pub fn filter_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" | "WARN" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        _ => log_level.to_string(),
    }
}

/// Initialise the global `tracing` subscriber, writing to stderr.
///
/// Falls back to `"info"` if the level string is not a valid directive.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(filter_directive(log_level)).unwrap_or_else(|_| EnvFilter::new("info"));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false);

    tracing_subscriber::registry().with(filter).with(layer).try_init()?;

    Ok(())
}

// ── Output directory ───────────────────────────────────────────────────────────

/// Make sure the page output directory exists.
pub fn ensure_output_dir(dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)?;
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_filter_directive_level_names() {
        assert_eq!(filter_directive("DEBUG"), "debug");
        assert_eq!(filter_directive("info"), "info");
        assert_eq!(filter_directive("WARNING"), "warn");
        assert_eq!(filter_directive("Error"), "error");
        assert_eq!(filter_directive("CRITICAL"), "error");
    }

    #[test]
    fn test_filter_directive_passthrough() {
        assert_eq!(filter_directive("billing_data=trace"), "billing_data=trace");
    }

    #[test]
    fn test_ensure_output_dir_nested() {
        let tmp = TempDir::new().expect("tempdir");
        let target = tmp.path().join("pages").join("2012-03");
        ensure_output_dir(&target).expect("create output dir");
        assert!(target.is_dir());
    }

    #[test]
    fn test_ensure_output_dir_existing() {
        let tmp = TempDir::new().expect("tempdir");
        ensure_output_dir(tmp.path()).expect("existing dir is fine");
    }
}
