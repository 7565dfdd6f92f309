//! Configuration types and CLI options.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_CATEGORIES_PATH, DEFAULT_MAX_CONCURRENCY, DEFAULT_NAVIGATION_TIMEOUT_SECS,
    DEFAULT_SIGNATURES_PATH, DEFAULT_USER_AGENT,
};

/// Logging level for the application.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Scan configuration.
///
/// Doubles as the CLI surface (via `clap`) and the library configuration.
/// Construct it programmatically with struct update syntax:
///
/// ```no_run
/// use webwitness::Config;
///
/// let config = Config {
///     urls: vec!["https://example.com".to_string()],
///     max_concurrency: 2,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "webwitness",
    version,
    about = "Concurrent web reconnaissance: rendered screenshots, response metadata, and application fingerprinting"
)]
pub struct Config {
    /// Target URLs to scan
    #[arg(short, long, num_args = 1.., required_unless_present = "file")]
    pub urls: Vec<String>,

    /// File with one target URL per line (`#` comments and blank lines ignored)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Output directory root; each run writes into a timestamped subdirectory
    #[arg(short, long, default_value = "results")]
    pub output: PathBuf,

    /// Signature rule file
    #[arg(long, default_value = DEFAULT_SIGNATURES_PATH)]
    pub signatures: PathBuf,

    /// Category rule file
    #[arg(long, default_value = DEFAULT_CATEGORIES_PATH)]
    pub categories: PathBuf,

    /// Maximum concurrent capture sessions (each owns a browser process)
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub max_concurrency: usize,

    /// Navigation timeout per target in seconds
    #[arg(long, default_value_t = DEFAULT_NAVIGATION_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Skip HTML dashboard rendering
    #[arg(long)]
    pub no_report: bool,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            file: None,
            output: PathBuf::from("results"),
            signatures: PathBuf::from(DEFAULT_SIGNATURES_PATH),
            categories: PathBuf::from(DEFAULT_CATEGORIES_PATH),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            timeout_seconds: DEFAULT_NAVIGATION_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            no_report: false,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}
