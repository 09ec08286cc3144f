// src/cli/handlers/config.rs

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;

use super::commons::ConfigArgs;
use crate::core::{config_loader, config_resolver, paths};
use crate::models::{HostOs, OpenMethod};

#[derive(Parser, Debug)]
#[command(no_binary_name = true)]
struct ConfigCmdArgs {
    #[command(flatten)]
    config: ConfigArgs,
}

/// The main handler for the `config` command: prints the resolved configuration.
pub fn handle(args: Vec<String>) -> Result<()> {
    let config_args = ConfigCmdArgs::try_parse_from(&args)?.config;
    let sources = config_args.to_sources();

    let default_file = paths::get_config_file_path()?;
    let config_file = sources.config_file.as_ref().unwrap_or(&default_file);
    println!(
        "{}",
        format!(t!("config.info.file"), path = config_file.display()).dimmed()
    );
    if let Some(settings) = &sources.settings_json {
        println!(
            "{}",
            format!(t!("config.info.settings"), path = settings.display()).dimmed()
        );
    }

    let raw = config_loader::load_raw_config(&sources)?;
    let resolved = config_resolver::resolve_config(raw, HostOs::current());
    let rendered = toml::to_string_pretty(&resolved)
        .context("Failed to render the resolved configuration as TOML")?;
    println!("\n{}", rendered);

    if resolved.open_method.parse::<OpenMethod>().is_err() {
        println!(
            "{}",
            format!(
                t!("config.warn.unknown_method"),
                method = resolved.open_method,
                valid = OpenMethod::valid_ids().join(", ")
            )
            .yellow()
        );
    }
    Ok(())
}
