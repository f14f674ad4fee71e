//! shelfmark command-line entry point.
//!
//! Parses arguments, loads configuration, installs tracing, wires the application
//! and prints the rendered result of one command. Errors go to stderr and exit
//! with status 1.

use shelfmark::app::USAGE;
use shelfmark::observability::init_tracing;
use shelfmark::{handle_command, initialize, Config, Invocation, ShelfmarkError};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e @ ShelfmarkError::Command(_)) => {
            eprintln!("error: {e}\n\n{USAGE}");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> shelfmark::Result<String> {
    let invocation = Invocation::parse(std::env::args().skip(1))?;
    let config = Config::load(invocation.config_path.as_deref())?;
    init_tracing(&config);

    tracing::debug!(command = ?invocation.command, "running command");
    let mut app = initialize(&config)?;
    let view = handle_command(&mut app, invocation.command).await?;
    Ok(shelfmark::ui::render(&view))
}
