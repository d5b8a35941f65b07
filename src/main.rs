mod action;
mod app;
mod carousel;
mod cli;
mod commands;
mod components;
mod config;
mod error;
mod logging;
mod page;
mod review;
mod scroll;

use color_eyre::eyre::Result;
use cli::Cli;
use config::ConfigManager;
use logging::LogTarget;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse_args();

    let mut config_manager = ConfigManager::load(cli.config.as_deref())?;
    cli.apply_overrides(config_manager.app_config_mut());

    let log_config = &config_manager.app_config().logging;
    let target = if cli.command.is_interactive() {
        LogTarget::file_in(log_config.file.as_deref(), config_manager.config_dir())
    } else {
        LogTarget::Stderr
    };
    let _log_guard = logging::init(&log_config.level, &target)?;
    config_manager.log_warnings();

    tracing::debug!("Using configuration from {}", config_manager.config_path().display());

    commands::run(cli.command, &config_manager).await
}
