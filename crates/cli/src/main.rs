use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use grocer_cli::App;
use grocer_infra::{CsvOrderDesk, Settings};

#[derive(Parser)]
#[command(name = "grocer")]
#[command(about = "Grocery inventory tracker", long_about = None)]
struct Cli {
    /// Directory holding the inventory, marketplace and order files.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// JSON settings file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset (e.g. "info", "grocer_infra=debug").
    #[arg(long)]
    log: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref()).context("loading settings")?;
    if let Some(dir) = cli.data_dir {
        settings.data_dir = dir;
    }
    if let Some(filter) = cli.log {
        settings.log_filter = filter;
    }
    settings.validate().context("validating settings")?;

    grocer_observability::init(&settings.log_filter);
    tracing::info!(data_dir = %settings.data_dir.display(), "starting");

    let desk = CsvOrderDesk::from_settings(&settings);
    let app = App::new(settings, desk);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    app.run(stdin.lock(), stdout.lock())
        .context("terminal I/O failed")?;
    Ok(())
}
