// src/cli/handlers/methods.rs

use anyhow::{Result, anyhow};
use colored::*;

use crate::models::{HostOs, OpenMethod};

/// The main handler for the `methods` command: lists every open method.
pub fn handle(args: Vec<String>) -> Result<()> {
    if !args.is_empty() {
        return Err(anyhow!(t!("methods.error.no_args")));
    }

    let os = HostOs::current();
    println!("{}", format!(t!("methods.info.header"), os = os).bold());
    for method in OpenMethod::ALL {
        let marker = if method.is_available_on(os) {
            "●".green()
        } else {
            "○".dimmed()
        };
        println!("  {} {:<22} {}", marker, method.id().cyan(), description(method).dimmed());
    }
    Ok(())
}

fn description(method: OpenMethod) -> &'static str {
    match method {
        OpenMethod::Gvim => t!("methods.desc.gvim"),
        OpenMethod::IntegratedTerminal => t!("methods.desc.integrated_terminal"),
        OpenMethod::Kitty => t!("methods.desc.kitty"),
        OpenMethod::GnomeTerminal => t!("methods.desc.gnome_terminal"),
        OpenMethod::Tilix => t!("methods.desc.tilix"),
        OpenMethod::Iterm => t!("methods.desc.iterm"),
        OpenMethod::MacVim => t!("methods.desc.macvim"),
    }
}
