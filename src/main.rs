use std::io::stdout;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use roster_tui::domain::ports::{Collation, OrdinalCollation};
use roster_tui::infrastructure::{
    AppConfig, CliArgs, IcuCollation, StorageManager, StudentsApiClient,
};
use roster_tui::presentation::App;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config() -> Result<AppConfig> {
    let args = CliArgs::parse();
    let storage = StorageManager::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok(config)
}

fn create_collation(locale: &str) -> Arc<dyn Collation> {
    match IcuCollation::new(locale) {
        Ok(collation) => Arc::new(collation),
        Err(e) => {
            warn!(error = %e, "Falling back to ordinal string ordering");
            Arc::new(OrdinalCollation)
        }
    }
}

fn create_app(config: &AppConfig) -> Result<App> {
    info!(
        version = roster_tui::VERSION,
        api_url = %config.api_url,
        "Starting {}",
        roster_tui::NAME
    );

    let client = Arc::new(StudentsApiClient::new(
        &config.api_url,
        config.request_timeout(),
    )?);
    let collation = create_collation(&config.collation_locale);

    Ok(App::new(client, collation, config))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let config = load_config()?;
    init_logging(&config)?;
    let app = create_app(&config)?;

    let mut terminal = ratatui::init();
    if config.mouse {
        execute!(stdout(), EnableMouseCapture)?;
    }

    let result = app.run(&mut terminal).await;

    if config.mouse {
        execute!(stdout(), DisableMouseCapture)?;
    }
    ratatui::restore();

    result
}
