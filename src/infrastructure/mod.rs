//! Infrastructure layer with external service adapters.

/// ICU collation adapter.
pub mod collation;
/// Application configuration.
pub mod config;
/// Students REST API client.
pub mod students_api;

pub use collation::{CollationError, IcuCollation};
pub use config::{AppConfig, CliArgs, ConfigError, LogLevel, StorageManager};
pub use students_api::StudentsApiClient;
