use anyhow::Context;
use clap::Parser;
use pforge::domain::config::EngineConfig;
use pforge::kernel::config::load_config;
use pforge_cli::{Cli, run};
use pforge_logger::Logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config: EngineConfig =
        load_config(cli.config.as_ref()).context("Critical: Configuration is malformed")?;

    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    let mut logger = Logger::builder(env!("CARGO_PKG_NAME")).level_str(level)?.json(config.logging.json);
    if let Some(directory) = &config.logging.directory {
        logger = logger.console(false).directory(directory);
    }
    let _log = logger.init()?;

    run(&cli, config, &mut std::io::stdout().lock()).await
}
