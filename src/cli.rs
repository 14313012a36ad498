use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path (default: translocal.json in the working directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize translocal in the current project
    Init,

    /// Translate language files based on the configuration
    Translate {
        /// AI provider to use
        #[arg(short, long, default_value = "gemini")]
        provider: String,

        /// API key for the AI provider (falls back to GEMINI_API_KEY or GOOGLE_API_KEY)
        #[arg(short, long)]
        key: Option<String>,
    },
}
