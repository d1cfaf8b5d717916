use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP translation gateway
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Listen port (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Translate a single text from the terminal
    Translate {
        /// Text to translate
        text: String,

        /// Source language code
        #[arg(short, long, default_value = "en")]
        from: String,

        /// Target language code
        #[arg(short, long)]
        to: String,
    },

    /// Show configured providers and their circuit state
    Providers,
}
