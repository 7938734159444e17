mod app;
mod buffer;
mod config;
mod error;
mod page;
mod paths;
mod terminal;

use std::fs::File;
use std::process::ExitCode;

use log::{LevelFilter, error, warn};
use simplelog::{Config as LogConfig, WriteLogger};

use config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_logging(config.log_level());

    match app::run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Log to `latest.log` in the cache dir, archiving the previous run's log.
fn init_logging(level: LevelFilter) {
    paths::rotate_logs();
    let path = paths::log_file().unwrap_or_else(|| "coursepath-tui.log".into());
    let file = match File::create(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Logging disabled: cannot create {}: {e}", path.display());
            return;
        }
    };
    if WriteLogger::init(level, LogConfig::default(), file).is_err() {
        warn!("Logger already initialized");
    }
}
