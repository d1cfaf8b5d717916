//! Anuvad - Multi-Provider Translation Gateway
//!
//! Entry point for the gateway binary: loads configuration, wires up the
//! translation service and either runs the HTTP server or executes one of
//! the maintenance commands.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use anuvad::cli::{Args, Commands};
use anuvad::config::Config;
use anuvad::server;
use anuvad::service::TranslationService;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(args.verbose)?;

    // Load configuration
    let config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => {
            // Try to load anuvad.toml from current directory first
            if std::path::Path::new("anuvad.toml").exists() {
                info!("Found anuvad.toml in current directory, loading...");
                Config::from_file("anuvad.toml")?
            } else {
                Config::default()
            }
        }
    };

    let service = Arc::new(TranslationService::new(&config)?);

    match args.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            info!(
                "Starting translation gateway with providers: {}",
                config.providers.priority.join(", ")
            );
            server::serve(service, &host, port).await?;
        }
        Commands::Translate { text, from, to } => {
            let translation = service.translate(&text, &from, &to).await;
            println!("{}", translation.text);
            eprintln!(
                "(provider: {}, cached: {})",
                translation.provider, translation.cached
            );
        }
        Commands::Providers => {
            let statuses = service.provider_status();

            println!("\nTranslation Providers:");
            println!(
                "{:<16} {:<12} {:<10} {:<8}",
                "Name", "Configured", "Circuit", "Failures"
            );
            println!("{}", "-".repeat(50));

            for status in statuses {
                let configured = if status.configured { "yes" } else { "no" };
                let circuit = if status.circuit_open { "open" } else { "closed" };
                println!(
                    "{:<16} {:<12} {:<10} {:<8}",
                    status.name, configured, circuit, status.failures
                );
            }
        }
    }

    Ok(())
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let anuvad_dir = std::env::current_dir()?.join(".anuvad");
    let log_dir = anuvad_dir.join("log");
    std::fs::create_dir_all(&log_dir)?;

    // Set up file appender with daily rotation
    let file_appender = rolling::daily(&log_dir, "anuvad.log");
    let (non_blocking_file, _guard) = non_blocking(file_appender);
    // Keep the guard alive for the duration of the program
    std::mem::forget(_guard);

    // Determine log level
    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    // Create console layer
    let console_layer = fmt::layer()
        .with_target(false)
        .with_file(true)
        .with_line_number(true);

    // Create file layer
    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false); // No ANSI colors in file

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer);

    subscriber
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
