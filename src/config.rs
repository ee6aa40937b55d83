//! Command Line Configuration

use std::path::PathBuf;

use clap::{Args, Parser};
use jiff::Timestamp;

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Catalog settings.
#[derive(Debug, Args)]
pub struct CatalogConfig {
    /// Path to the YAML catalog of products and promotions
    #[arg(
        short,
        long,
        env = "REBATE_CATALOG",
        default_value = "fixtures/catalog.yml"
    )]
    pub catalog: PathBuf,

    /// Only evaluate the product with this id
    #[arg(short, long)]
    pub product: Option<String>,

    /// Evaluate promotions as of this instant (RFC 3339), defaults to now
    #[arg(long, env = "REBATE_AT")]
    pub at: Option<Timestamp>,
}

/// Rebate configuration
#[derive(Debug, Parser)]
#[command(name = "rebate", about = "Resolve automatic promotions for a product catalog", long_about = None)]
pub struct Config {
    /// Catalog and evaluation settings.
    #[command(flatten)]
    pub catalog: CatalogConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
