//! nudelta CLI
//!
//! Reads and writes the keymap of a NuPhy Air75 over USB HID.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};

// CLI definitions
mod cli;
use cli::{Action, Cli};

// Command handlers
mod commands;
use commands::CommandResult;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let Some(action) = cli.action() else {
        if let Err(e) = Cli::command().print_help() {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
        return ExitCode::SUCCESS;
    };

    match run(action) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(action: Action) -> CommandResult {
    match action {
        Action::Version => commands::query::version(),
        Action::Firmware => commands::query::firmware(),
        Action::List => commands::query::list(),
        Action::ResetKeys => commands::keymap::reset(),
        Action::DumpKeys { path, hex } => commands::keymap::dump(&path, hex.as_deref()),
        Action::LoadKeys(path) => commands::keymap::load(&path),
        Action::LoadProfile(path) => commands::profile::load(&path),
    }
}
