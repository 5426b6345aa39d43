mod bootstrap;

use anyhow::{Context, Result};
use billing_core::settings::Settings;
use billing_data::stream::RecordStream;
use billing_render::driver::ReportDriver;
use billing_render::render::{PageTemplate, PageWriter};

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("AWS billing report v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Input: {}, template: {}, output: {}",
        settings.input.display(),
        settings.template.display(),
        settings.output_dir.display()
    );

    let template = PageTemplate::load(&settings.template).context("loading page template")?;
    bootstrap::ensure_output_dir(&settings.output_dir).with_context(|| {
        format!(
            "creating output directory {}",
            settings.output_dir.display()
        )
    })?;

    let driver = ReportDriver::new(PageWriter::new(template, &settings.output_dir));
    let mut stream = RecordStream::open(&settings.input);

    let written = driver
        .draw_all(&mut stream)
        .with_context(|| format!("drawing charts from {}", settings.input.display()))?;

    tracing::info!("Done: {} pages written", written.len());
    Ok(())
}
