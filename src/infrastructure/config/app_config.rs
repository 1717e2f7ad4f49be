//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::args::CliArgs;

pub(super) const APP_NAME: &str = "roster-tui";
pub(super) const APP_QUALIFIER: &str = "com";
pub(super) const APP_ORGANIZATION: &str = "linuxmobile";

/// Default students collection endpoint.
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api/students";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, read from `config.toml` and overridden by CLI flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Students collection URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout in seconds. Requests never time out when unset.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Enable mouse support.
    #[serde(default = "default_true")]
    pub mouse: bool,

    /// Locale used to order names and faculties.
    #[serde(default = "default_collation_locale")]
    pub collation_locale: String,

    /// UI configuration.
    #[serde(default)]
    pub ui: UiConfig,
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Birth date display format (chrono format).
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Status message duration in seconds.
    #[serde(default = "default_notification_duration")]
    pub notification_duration: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            notification_duration: default_notification_duration(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_collation_locale() -> String {
    "ru".to_string()
}

fn default_date_format() -> String {
    "%d.%m.%Y".to_string()
}

fn default_true() -> bool {
    true
}

fn default_notification_duration() -> u64 {
    5
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(api_url) = args.api_url {
            self.api_url = api_url;
        }
        if let Some(timeout) = args.timeout {
            self.request_timeout_secs = Some(timeout);
        }
        if let Some(mouse) = args.mouse {
            self.mouse = mouse;
        }
        if let Some(locale) = args.locale {
            self.collation_locale = locale;
        }
    }

    /// Returns the request timeout, if one is configured.
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Returns how long status messages stay visible.
    #[must_use]
    pub const fn notification_duration(&self) -> Duration {
        Duration::from_secs(self.ui.notification_duration)
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("roster.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            api_url: default_api_url(),
            request_timeout_secs: None,
            mouse: true,
            collation_locale: default_collation_locale(),
            ui: UiConfig::default(),
        }
    }
}
