mod config;
mod error;
mod models;
mod pipeline;
mod utils;
use std::process::ExitCode;
use dotenv::dotenv;
use log::{error, info};
use simplelog::{ColorChoice, Config as LogConfig, TermLogger, TerminalMode};
use crate::config::{Config, Invocation};
use crate::pipeline::run;
use crate::utils::report::{render_json, render_text};

// Entry point for the async main function, powered by tokio runtime.
#[tokio::main]
async fn main() -> ExitCode {
    // Loads environment variables from a `.env` file, if present.
    dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    // Logs to the terminal with mixed output (both stdout and stderr) and automatic color support.
    if let Err(e) = TermLogger::init(
        config.log_level,
        LogConfig::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let invocation = match Invocation::from_args(std::env::args().skip(1), std::env::var("ROLL_NUMBER").ok()) {
        Ok(invocation) => invocation,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Looking up results for {}", invocation.roll_number);

    // Fetches, normalizes and scores; any failure aborts before rendering.
    let report = match run(&config, &invocation.roll_number).await {
        Ok(report) => report,
        Err(e) => {
            error!("{}", e.user_message());
            error!("Cause: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let output = if invocation.json {
        match render_json(&report) {
            Ok(json) => json,
            Err(e) => {
                error!("{:#}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        render_text(&report)
    };

    println!("{}", output);
    ExitCode::SUCCESS
}
