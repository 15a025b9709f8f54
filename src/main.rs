use std::process::ExitCode;
use std::sync::Arc;

use pending_reminders::config::Config;
use pending_reminders::constants::{ERROR_ACCESS_DENIED, ERROR_CONFIG_LOAD_FAILED};
use pending_reminders::store::SqliteStore;
use pending_reminders::{app, logger};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {:#}", ERROR_CONFIG_LOAD_FAILED, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logger::init(&config.logging) {
        eprintln!("⚠️ Logging disabled: {:#}", e);
    }

    let database_path = match config.database_path() {
        Ok(path) => path,
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let store = Arc::new(SqliteStore::new(database_path, config.store.default_calendar.clone()));
    let mut stdout = std::io::stdout().lock();

    match app::run(store, config.bridge_options(), &mut stdout).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) if app::is_access_denied(&e) => {
            log::error!("{:#}", e);
            eprintln!("{}", ERROR_ACCESS_DENIED);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
