mod config;
mod models;
mod utils;
use std::io;
use dotenv::dotenv;
use log::{error, info};
use simplelog::{ColorChoice, Config as LogConfig, TermLogger, TerminalMode};
use crate::config::Config;
use crate::utils::session::Session;

fn main() {
    // Loads environment variables from a `.env` file, if present.
    dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {:#}", e);
            return;
        }
    };

    // Logs go to stderr/stdout alongside the session, coloured when the terminal supports it.
    if let Err(e) = TermLogger::init(config.log_level, LogConfig::default(), TerminalMode::Mixed, ColorChoice::Auto) {
        eprintln!("Error initializing logger: {}", e);
    }
    info!("Credits hint set to {}", config.credits_hint);

    let mut session = match Session::new(config) {
        Ok(session) => session,
        Err(e) => {
            error!("Error starting session: {:#}", e);
            return;
        }
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    if let Err(e) = session.run(stdin.lock(), &mut stdout) {
        error!("Session aborted: {:#}", e);
        return;
    }

    let summary = session.ledger().summary();
    info!("Final CGPA {:.2} ({}) over {} course(s)", summary.current_average, summary.standing, session.ledger().len());
}
