//! dls-encoder entry point.
//!
//! Loads the layered configuration, sets up logging and runs either the
//! batch encoder or the interactive page wizard.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dlsenc_core::AppConfig;

mod commands;
mod logging;
mod pipeline;

/// Extract product metadata from saved store pages and encode the matching audio to tagged MP3.
#[derive(Debug, Parser)]
#[command(name = "dls-encoder", version)]
struct Cli {
    /// Create a product page interactively instead of running the batch
    #[arg(long)]
    create_html: bool,

    /// TOML configuration file (default: $DLS_ENCODER_CONFIG_FILE or ./config/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;

    if cli.create_html {
        logging::init_stderr(config.setting.debug);
        return commands::create_html::run(&config).context("failed to create product page");
    }

    config.ensure_directories().context("failed to prepare directories")?;
    let log_file = logging::init(&config.dir_setting.log_dir, config.setting.debug)
        .context("failed to initialise logging")?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), log_file = %log_file.display(), "starting dls-encoder");

    commands::encode::run(&config).await.context("batch failed")?;

    tracing::info!("finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["dls-encoder"]).unwrap();
        assert!(!cli.create_html);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from(["dls-encoder", "--create-html", "--config", "conf/custom.toml"]).unwrap();
        assert!(cli.create_html);
        assert_eq!(cli.config, Some(PathBuf::from("conf/custom.toml")));
    }

    #[test]
    fn test_cli_rejects_unknown_flag() {
        assert!(Cli::try_parse_from(["dls-encoder", "--fetch"]).is_err());
    }
}
