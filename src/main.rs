use anyhow::Result;
use clap::Parser;
use sheet_qr::{AppConfig, CliArgs, LoggingConfig, init_logging, render_report, run_batch};

fn main() -> Result<()> {
    let _guard = init_logging(LoggingConfig::from_env())?;

    let cli = CliArgs::parse();
    let config = AppConfig::from_args(cli)?;

    if config.interactive {
        return run_dialogs(config);
    }

    let summary = run_batch(&config)?;
    println!("{}", render_report(&summary, config.report)?);
    Ok(())
}

#[cfg(feature = "dialogs")]
fn run_dialogs(config: AppConfig) -> Result<()> {
    use sheet_qr::session::{RfdDialogs, Session, run_interactive};

    let mut session = Session::with_selections(config.source, config.output_folder);
    let runs = run_interactive(&mut session, &mut RfdDialogs);
    tracing::info!(runs = runs.len(), "interactive session closed");
    Ok(())
}

#[cfg(not(feature = "dialogs"))]
fn run_dialogs(_config: AppConfig) -> Result<()> {
    anyhow::bail!("interactive mode requires building with the `dialogs` feature")
}
