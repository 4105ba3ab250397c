//! CLI command definitions and handlers

use clap::Subcommand;
use std::sync::Arc;

use crate::core::config::TranslatorConfig;
use crate::core::models::TranslationDirection;
use crate::core::samples::SampleSet;
use crate::core::translator::Translator;

/// Commands for Mini Language Translator
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive web app
    Serve {
        /// Bind address (default from config: 127.0.0.1)
        #[arg(long)]
        host: Option<String>,

        /// Listen port (default from config: 8501)
        #[arg(short, long)]
        port: Option<u16>,

        /// Load both models before accepting requests
        #[arg(long)]
        preload: bool,
    },

    /// Translate a single sentence
    Translate {
        /// Text to translate
        text: String,

        /// en-hi, hi-en or auto (detect from the script of the input)
        #[arg(short, long, default_value = "auto")]
        direction: String,
    },

    /// Show the bundled sample pairs
    Samples {
        /// Direction to orient the pairs in
        #[arg(short, long, default_value = "en-hi")]
        direction: String,

        /// Only show the first N pairs
        #[arg(short, long)]
        limit: Option<usize>,

        /// Also run each source sentence through the model
        #[arg(long)]
        translate: bool,
    },
}

/// Resolve a direction argument, where `auto` inspects the input text
pub fn resolve_direction(value: &str, text: &str) -> anyhow::Result<TranslationDirection> {
    if value.trim().eq_ignore_ascii_case("auto") {
        return Ok(TranslationDirection::detect(text));
    }
    Ok(value.parse()?)
}

/// Handle serve command
pub async fn handle_serve(
    mut config: TranslatorConfig,
    host: Option<String>,
    port: Option<u16>,
    preload: bool,
) -> anyhow::Result<()> {
    use crate::server::api::run_server;
    use tracing::info;

    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    config.validate()?;

    info!("Starting HTTP server on {}:{}", config.host, config.port);
    println!("🈯 Mini Language Translator on http://{}:{}", config.host, config.port);
    println!("📄 OpenAPI document: http://{}:{}/api-docs/openapi.json", config.host, config.port);

    run_server(config, preload).await?;

    Ok(())
}

/// Handle single sentence translation command
pub async fn handle_translate(
    config: TranslatorConfig,
    text: String,
    direction: String,
) -> anyhow::Result<()> {
    use tracing::info;

    let direction = resolve_direction(&direction, &text)?;
    info!("Translating with {} ({})", config.model_id(direction), direction);

    let translator = Translator::new(config)?;
    let translation =
        tokio::task::spawn_blocking(move || translator.translate(&text, direction)).await??;

    println!("{}", translation);

    Ok(())
}

/// Handle samples command
pub async fn handle_samples(
    config: TranslatorConfig,
    direction: String,
    limit: Option<usize>,
    translate: bool,
) -> anyhow::Result<()> {
    use indicatif::{ProgressBar, ProgressStyle};
    use std::time::Instant;
    use tracing::{info, warn};

    let direction: TranslationDirection = direction.parse()?;
    let samples = SampleSet::load(&config.samples_path)?;
    let mut pairs = samples.pairs(direction);
    if let Some(limit) = limit {
        pairs.truncate(limit);
    }

    if !translate {
        println!("{} ({} pairs)", direction.label(), pairs.len());
        for (i, pair) in pairs.iter().enumerate() {
            println!("{:>3}. {}", i + 1, pair.source);
            println!("     {}", pair.target);
        }
        return Ok(());
    }

    let start_time = Instant::now();
    let translator = Arc::new(Translator::new(config)?);

    // Create progress bar
    let pb = ProgressBar::new(pairs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")?
            .progress_chars("=>-"),
    );

    let mut outputs = Vec::with_capacity(pairs.len());
    let mut failed = 0;

    for pair in &pairs {
        pb.set_message(pair.source.chars().take(30).collect::<String>());

        let handle = translator.clone();
        let source = pair.source.clone();
        match tokio::task::spawn_blocking(move || handle.translate(&source, direction)).await? {
            Ok(output) => outputs.push(Some(output)),
            Err(e) => {
                failed += 1;
                warn!("Failed to translate '{}': {}", pair.source, e);
                outputs.push(None);
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message("Completed");

    for (i, (pair, output)) in pairs.iter().zip(&outputs).enumerate() {
        println!("\n{:>3}. {}", i + 1, pair.source);
        println!("     reference: {}", pair.target);
        match output {
            Some(output) => println!("     model:     {}", output),
            None => println!("     model:     <failed>"),
        }
    }

    let duration = start_time.elapsed();
    info!(
        "Completed: {} translated, {} failed in {:?}",
        pairs.len() - failed,
        failed,
        duration
    );

    println!("\n✅ Sample translation completed!");
    println!("   Translated: {}", pairs.len() - failed);
    println!("   Failed: {}", failed);
    println!("   Time: {:?}", duration);

    Ok(())
}
