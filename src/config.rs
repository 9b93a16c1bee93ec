//! Command-line options and logging setup.
//!
//! Every flag defaults to the behavior of a bare `alch_analyzer` run, so the
//! CLI only ever narrows or redirects the report.
//!
//! # Environment Variables
//! - `RUST_LOG`: log level filter (default: `error`)
//! - `LOG_FORMAT`: `pretty` (default) or `json`

use clap::Parser;
use std::io::IsTerminal;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_BASE_URL: &str = "https://prices.runescape.wiki/api/v1/osrs";
pub const DEFAULT_USER_AGENT: &str =
    concat!("alch_analyzer/", env!("CARGO_PKG_VERSION"), " (high alchemy profit report)");

/// High Alchemy profit report built from the OSRS wiki real-time prices.
#[derive(Parser, Debug, Clone)]
#[command(name = "alch_analyzer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Number of rows to show in the table
    #[arg(long, default_value_t = 50)]
    pub top: usize,

    /// Base URL of the prices API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// User-Agent sent with every request
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Only show items usable on free-to-play worlds
    #[arg(long)]
    pub f2p: bool,
}

impl Cli {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Base URL without a trailing slash, ready for `{base}/mapping`.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

pub const DEFAULT_LOG_FILTER: &str = "error";

/// Logs go to stderr; stdout is reserved for the report itself. Nothing in
/// the crate logs at `error`, so a failed run leaves only its own error line
/// on stderr unless `RUST_LOG` turns more on.
pub fn init_logging() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let ansi = std::io::stderr().is_terminal();

    if log_format == "json" {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_ansi(ansi)
            .init();
    }
}
