mod cli;
mod commands;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use partfinder_config::{ConfigLoader, ConfigLoaderOptions};
use partfinder_core::{HttpCatalog, SearchSession};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so command output stays pipeable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let load = ConfigLoader::with_options(ConfigLoaderOptions {
        config_path: cli.config.clone(),
        env_file: cli.env_file.clone(),
        skip_env_file: false,
    })
    .load()
    .context("Failed to load configuration")?;
    for note in &load.notes {
        debug!("{note}");
    }
    let config = load.config;

    let base_url = cli
        .base_url
        .clone()
        .unwrap_or_else(|| config.api.base_url.to_string());
    let catalog = HttpCatalog::with_timeout(&base_url, config.api.timeout)
        .with_context(|| format!("Invalid catalog URL {base_url}"))?;
    let mut session = SearchSession::with_options(
        catalog,
        config.filter.policy(),
        config.paging.page_size,
    );

    let mut stdout = std::io::stdout().lock();
    commands::run(cli.command, &mut session, &mut stdout).await
}
