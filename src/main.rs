//! hyperkey - writes the key-remapping host's configuration file
//!
//! Running the binary with no arguments regenerates `karabiner.json` in the
//! working directory from the compiled-in declarations.

use anyhow::{Context, Result};
use clap::Parser;
use hyperkey::config::Config;
use hyperkey::constants::APP_NAME;
use hyperkey::declarations;
use hyperkey::generator::serializer;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Generate the remapping host's configuration file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Write to FILE instead of the configured output path
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print the document to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// Read settings from FILE instead of the platform config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the current settings to the config file and exit
    #[arg(long)]
    init_config: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(level: &str, verbose: bool) {
    let filter = if verbose { "debug" } else { level };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    init_tracing(&config.logging.level, cli.verbose);
    debug!(version = env!("CARGO_PKG_VERSION"), "{APP_NAME} starting");

    if cli.init_config {
        match &cli.config {
            Some(path) => config.save_to(path)?,
            None => config.save()?,
        }
        info!("wrote settings");
        return Ok(());
    }

    let document = declarations::document().context("Failed to build rules")?;

    if cli.stdout {
        println!("{}", serializer::render(&document)?);
        return Ok(());
    }

    let path = cli.output.unwrap_or(config.output.path);
    serializer::write_document(&document, &path)?;

    Ok(())
}
