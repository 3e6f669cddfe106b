use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use colored::*;
use config_engine::{ClinicConfig, ConfigLoader};
use logger_redacted::{redacted_error, redacted_warn};
use tracing::debug;

use ops_cli::{commands, AppContext, Cli, ConsoleNotifier};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let notifier = Arc::new(ConsoleNotifier::new());

    match run(cli, Arc::clone(&notifier)).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            redacted_error!("Command failed: {e:#}");
            // Store failures were already shown as notifications
            if !notifier.has_failed() {
                eprintln!("{} {e:#}", "✖ Error:".bright_red());
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, notifier: Arc<ConsoleNotifier>) -> anyhow::Result<()> {
    let config = load_config(&cli)?;

    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    logger_redacted::init_logging(&logging)?;
    debug!(version = env!("CARGO_PKG_VERSION"), offline = cli.offline, "Starting clinicdesk");

    let ctx = if cli.offline {
        AppContext::offline(config, notifier)?
    } else {
        AppContext::online(config, notifier)?
    };

    let result = commands::run(cli.command, &ctx).await;
    if let Err(e) = ctx.persist() {
        redacted_warn!("Could not save offline data: {e:#}");
    }
    result
}

fn load_config(cli: &Cli) -> anyhow::Result<ClinicConfig> {
    let loader = match &cli.config {
        Some(path) => ConfigLoader::new().with_file(path),
        None => ConfigLoader::new(),
    };
    Ok(loader.load()?)
}
