pub mod artifact;
pub mod config;
pub mod encoder;
pub mod error;
pub mod logging;
pub mod model;
pub mod placement;
pub mod processor;
pub mod session;
pub mod utils;
pub mod workbook;

pub use artifact::{ArtifactGenerator, SeenNames, generate};
pub use config::{AppConfig, CliArgs, ReportFormat, RunPaths};
pub use error::{ErrorKind, ProcessError, ProcessResult};
pub use logging::{LoggingConfig, init_logging};
pub use model::{RunSummary, SkipReason};
pub use processor::{RowProcessor, process};
pub use session::{COMPLETION_MESSAGE, Session, SessionError};

use anyhow::{Context, Result};

/// Runs the non-interactive entry point over the configured paths.
pub fn run_batch(config: &AppConfig) -> Result<RunSummary> {
    let paths = config.run_paths()?;
    let mut seen = SeenNames::new();
    let summary = process(&paths.source, &paths.output_folder, &mut seen)
        .with_context(|| format!("processing {:?} failed", paths.source))?;
    Ok(summary)
}

/// Completion message printed after a batch run.
pub fn render_report(summary: &RunSummary, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Json => {
            serde_json::to_string_pretty(summary).context("failed to serialize run summary")
        }
        ReportFormat::Text => Ok(format!(
            "{COMPLETION_MESSAGE}\n\
             rows scanned: {}, codes generated: {}, empty rows skipped: {}, \
             duplicate names skipped: {}",
            summary.rows_scanned,
            summary.artifacts.len(),
            summary.skipped_count(SkipReason::EmptyData),
            summary.skipped_count(SkipReason::DuplicateName),
        )),
    }
}
