//! Achei command line

use std::process;

use crate::config::CliConfig;

mod commands;
mod config;
mod errors;
mod logging;
mod tables;

#[tokio::main]
pub async fn main() {
    let config = CliConfig::load().unwrap_or_else(|error| error.exit());

    if let Err(error) = logging::init_subscriber(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialise, must use eprintln"
        )]
        {
            eprintln!("Logging error: {error}");
        }

        process::exit(1);
    }

    if let Err(error) = commands::run(config).await {
        #[expect(clippy::print_stderr, reason = "errors are reported to the terminal")]
        {
            eprintln!("Erro: {}", error_chain(&error));
        }

        process::exit(1);
    }
}

fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    message
}
