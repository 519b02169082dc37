use anyhow::{Context, Result, anyhow};
use clap::Parser;
use stage_explorer_lib::AppConfig;
use stage_explorer_lib::presentation::cli::Cli;
use stage_explorer_lib::presentation::commands::AppContext;
use stage_explorer_lib::shared::logging;
use tracing::{debug, error};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::from_env();
    if let Some(api_url) = &cli.api_url {
        config.api.base_url = api_url.trim().trim_end_matches('/').to_string();
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if cli.json_logs {
        config.logging.json = true;
    }
    config.validate().map_err(|err| anyhow!(err))?;

    logging::init(&config.logging.level, config.logging.json).map_err(|err| anyhow!(err))?;
    debug!(api = %config.api.base_url, "starting stage-explorer v{}", env!("CARGO_PKG_VERSION"));

    let context = AppContext::new(&config).context("failed to build application context")?;
    match context.run(cli.command).await {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(err) => {
            error!(error = %err, "command failed");
            Err(anyhow!(err.user_message()))
        }
    }
}
