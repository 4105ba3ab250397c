//! Main entry point for Mini Language Translator CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mini_translator::cli::commands::{self, Commands};
use mini_translator::{DeviceSetting, TranslatorConfig};

/// Mini Language Translator - English ↔ Hindi with pretrained MarianMT models
#[derive(Parser, Debug)]
#[command(name = "mini-translator", version, about, long_about = None)]
struct Args {
    /// Config file (defaults to ./mini-translator.{toml,json,yaml} if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Device to run the models on: auto, cpu or cuda
    #[arg(long)]
    device: Option<DeviceSetting>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}={},tower_http={}", env!("CARGO_CRATE_NAME"), log_level, log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = TranslatorConfig::load(args.config.as_deref())?;

    // Override config with CLI args if provided
    if let Some(device) = args.device {
        config.device = device;
    }

    // Execute command; no subcommand runs the app
    match args.command {
        Some(Commands::Serve {
            host,
            port,
            preload,
        }) => {
            commands::handle_serve(config, host, port, preload).await?;
        }
        Some(Commands::Translate { text, direction }) => {
            commands::handle_translate(config, text, direction).await?;
        }
        Some(Commands::Samples {
            direction,
            limit,
            translate,
        }) => {
            commands::handle_samples(config, direction, limit, translate).await?;
        }
        None => {
            commands::handle_serve(config, None, None, false).await?;
        }
    }

    Ok(())
}
