use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "roster",
    version,
    about = "A terminal client for managing a student roster",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Students collection URL.
    #[arg(long, value_name = "URL", env = "ROSTER_API_URL")]
    pub api_url: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Enable mouse support.
    #[arg(long)]
    pub mouse: Option<bool>,

    /// Collation locale for sorting names and faculties.
    #[arg(long, value_name = "LOCALE")]
    pub locale: Option<String>,
}
