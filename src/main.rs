//! translocal - AI-assisted translation of JSON locale files
//!
//! This is the main entry point for the translocal CLI, which extracts
//! string values from JSON language files, translates them with an AI
//! provider, and writes structurally identical files for each target locale.

use anyhow::Result;
use clap::Parser;
use tracing::{Level, info};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use translocal::cli::{Args, Commands};
use translocal::config::Config;
use translocal::error::TranslocalError;
use translocal::provider::{ProviderFactory, ProviderKind};
use translocal::service::TranslationService;
use translocal::setup::SetupWizard;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Setup logging to both console and file
    setup_logging(args.verbose)?;

    // Load environment variables from a .env file when present
    dotenvy::dotenv().ok();

    match args.command {
        Commands::Init => {
            info!("Initializing translocal...");

            let wizard = SetupWizard::new()?;
            wizard.run()?;

            println!("\ntranslocal initialized successfully!");
            println!("\nNext steps:");
            println!("1. Add your strings to the source file");
            println!("2. Run 'translocal translate' to generate translated files");
        }
        Commands::Translate { provider, key } => {
            let kind = ProviderKind::parse(&provider)?;
            let api_key = resolve_api_key(key)?;

            info!("Loading configuration...");
            let config = match &args.config {
                Some(config_path) => Config::from_file(config_path)?,
                None => Config::load()?,
            };

            let provider = ProviderFactory::create_provider(kind, api_key);
            let service = TranslationService::new(config, provider);

            let summary = service.translate().await?;

            println!(
                "Translation completed: {} files written, {} locales failed",
                summary.files_written, summary.locales_failed
            );
        }
    }

    Ok(())
}

/// Resolve the provider API key from the CLI option or the environment
fn resolve_api_key(key: Option<String>) -> Result<String, TranslocalError> {
    key.or_else(|| std::env::var("GEMINI_API_KEY").ok())
        .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
        .filter(|key| !key.is_empty())
        .ok_or_else(|| {
            TranslocalError::Config(
                "API key is required. Provide it using --key or the \
                 GEMINI_API_KEY/GOOGLE_API_KEY environment variable"
                    .to_string(),
            )
        })
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let translocal_dir = std::env::current_dir()?.join(".translocal");
    let log_dir = translocal_dir.join("log");
    std::fs::create_dir_all(&log_dir)?;

    // Set up file appender with daily rotation
    let file_appender = rolling::daily(&log_dir, "translocal.log");
    let (non_blocking_file, _guard) = non_blocking(file_appender);
    // Keep the guard alive for the duration of the program
    std::mem::forget(_guard);

    // Determine log level
    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    // Create console layer
    let console_layer = fmt::layer().with_target(false);

    // Create file layer
    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_ansi(false); // No ANSI colors in file

    // Setup layered subscriber
    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer);

    // Initialize the subscriber
    subscriber
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
