//! Foodie storefront command line

use std::{io, process::ExitCode};

use tracing::error;

use foodie::notify::Notification;

use crate::config::CliConfig;

mod commands;
mod config;
mod errors;
mod logging;

/// Foodie CLI entry point
fn main() -> ExitCode {
    // Load configuration from .env and CLI arguments
    let config = match CliConfig::load() {
        Ok(config) => config,
        Err(err) => {
            // Help and version requests come through here too.
            _ = err.print();

            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(err) = logging::init_subscriber(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialise, must use eprintln"
        )]
        {
            eprintln!("Logging error: {err}");
        }

        return ExitCode::FAILURE;
    }

    let stdout = io::stdout();

    match commands::run(&config, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "command failed");

            #[expect(
                clippy::print_stderr,
                reason = "user-facing error, not a log line"
            )]
            {
                eprintln!("{}", Notification::error(err.to_string()));
            }

            ExitCode::FAILURE
        }
    }
}
