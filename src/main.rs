use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Arc, Mutex};

use clap::Parser;
use hoquei_fixtures::app;
use hoquei_fixtures::config::Config;
use hoquei_fixtures::source::FixtureSource;
use hoquei_fixtures::store::Store;
use hoquei_fixtures::tui;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "hoquei-fixtures.log";

fn main() -> std::io::Result<()> {
    let config = Config::parse();
    let data_dir = config.resolve_data_dir();
    init_logging(&data_dir, config.log_level());

    let store = Store::new(&data_dir);
    let session = app::load_session(&store);
    let source: Arc<dyn FixtureSource> = Arc::from(config.build_source());
    info!(data_dir = %data_dir.display(), source = %source.describe(), "Starting");

    let runtime = tokio::runtime::Runtime::new()?;
    let mut terminal = tui::init()?;
    let result = runtime.block_on(app::run(&mut terminal, session, store, source));
    let restored = tui::restore(&mut terminal);
    // An in-flight fetch must not hold the process open after quitting.
    runtime.shutdown_background();

    if let Err(e) = &result {
        error!(error = %e, "Terminal loop failed");
    }
    result.and(restored)
}

/// JSON logs go to a file next to the data; the terminal belongs to the UI.
fn init_logging(data_dir: &Path, default_level: &str) {
    let Ok(file) = OpenOptions::new().create(true).append(true).open(data_dir.join(LOG_FILE)) else {
        return;
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(false)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
}
