// src/cli/handlers/open.rs

use anyhow::Result;
use clap::Parser;
use colored::*;
use std::path::PathBuf;

use super::commons::{ConfigArgs, ReportedFailure};
use crate::cli::host::CliHost;
use crate::core::launcher::{self, LaunchEnvironment};
use crate::models::{HostOs, LaunchOutcome};
use crate::system::executor::{DryRunExecutor, ShellExecutor, SystemExecutor};

#[derive(Parser, Debug)]
#[command(no_binary_name = true)]
struct OpenArgs {
    /// The file to open.
    file: PathBuf,
    /// 1-based line to place the cursor on.
    #[arg(short, long, default_value_t = 1)]
    line: u32,
    /// 1-based column to place the cursor on.
    #[arg(short, long, default_value_t = 1)]
    column: u32,
    /// A workspace folder. Repeat for multi-root workspaces.
    #[arg(short, long = "workspace", value_name = "DIR")]
    workspaces: Vec<PathBuf>,
    /// Print the commands instead of running them.
    #[arg(long)]
    dry_run: bool,
    #[command(flatten)]
    config: ConfigArgs,
}

/// The main handler for the `open` command.
pub fn handle(args: Vec<String>) -> Result<()> {
    let open_args = OpenArgs::try_parse_from(&args)?;

    let host = CliHost::new(
        &open_args.file,
        open_args.line,
        open_args.column,
        open_args.workspaces,
    );
    let executor: &dyn ShellExecutor = if open_args.dry_run {
        &DryRunExecutor
    } else {
        &SystemExecutor
    };
    let env = LaunchEnvironment {
        host: &host,
        executor,
        os: HostOs::current(),
    };

    match launcher::run(&open_args.config.to_sources(), &env) {
        Some(LaunchOutcome::Completed) => Ok(()),
        Some(LaunchOutcome::Detached { pid }) => {
            let pid = pid.map_or_else(|| "-".to_string(), |pid| pid.to_string());
            println!("{}", format!(t!("open.info.detached"), pid = pid).dimmed());
            Ok(())
        }
        None => Err(ReportedFailure.into()),
    }
}
