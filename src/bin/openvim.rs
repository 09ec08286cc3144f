// src/bin/openvim.rs

use clap::Parser;
use colored::*;
use openvim::cli::{Cli, dispatcher, handlers::commons::ReportedFailure};

/// The main entry point of the `openvim` application.
/// It sets up logging, parses arguments, dispatches to the correct handler,
/// and performs centralized error handling.
fn main() {
    env_logger::init();

    let cli = Cli::parse();
    log::debug!("CLI args parsed: {:?}", cli);

    if let Err(e) = dispatcher::dispatch(cli.args) {
        // Launch failures are shown by the host itself; only the exit code is left to set.
        if e.downcast_ref::<ReportedFailure>().is_some() {
            std::process::exit(1);
        }

        // clap errors carry their own formatting (and `--help` on a handler is not an error).
        if let Some(clap_err) = e.downcast_ref::<clap::Error>() {
            clap_err.exit();
        }

        eprintln!("\n{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}
