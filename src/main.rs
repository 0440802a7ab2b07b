mod config;
mod controller;
mod db;
mod logging;
mod models;
mod operations;

use config::AppConfig;
use controller::Controller;
use db::persistence::load_expenses;
use db::store::ExpenseStore;
use log::{error, info};
use models::expense::today;
use std::io;
use std::process;

fn main() {
    let config = AppConfig::default();

    let logger = match logging::init_logging(&config) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Warning: logging disabled: {}", e);
            None
        }
    };

    let result = run(&config);
    if let Err(e) = &result {
        error!("{}", e);
    }
    // Flushes buffered log lines; process::exit skips destructors.
    drop(logger);

    if let Err(e) = result {
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn run(config: &AppConfig) -> Result<(), String> {
    let expenses = load_expenses(&config.data_file, today())
        .map_err(|e| format!("Error loading expenses: {}", e))?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut controller = Controller::new(
        ExpenseStore::from_expenses(expenses),
        config.data_file.clone(),
        stdin.lock(),
        stdout.lock(),
    );

    controller
        .run()
        .map_err(|e| format!("Error: terminal I/O failed: {}", e))?;
    info!("Session ended with {} expenses", controller.store().len());
    Ok(())
}
