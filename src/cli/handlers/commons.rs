// src/cli/handlers/commons.rs

// Shared pieces of the CLI handlers.

use clap::Args;
use colored::Colorize;
use dialoguer::{Confirm, theme::ColorfulTheme};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use thiserror::Error;

use crate::core::config_loader::ConfigSources;
use crate::models::{HostOs, RawConfig, Remediation};

/// Raised by a handler after the failure was already shown to the user.
/// `main` exits with a failure code without printing anything else.
#[derive(Error, Debug)]
#[error("The failure has already been reported.")]
pub struct ReportedFailure;

/// Configuration flags shared by every action that resolves configuration.
#[derive(Args, Debug, Default, Clone)]
pub struct ConfigArgs {
    /// Read this TOML file instead of the default `config.toml`.
    #[arg(long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,
    /// Also read the `open-in-vim.*` keys of an editor `settings.json`.
    #[arg(long = "settings", value_name = "FILE")]
    pub settings_json: Option<PathBuf>,
    /// Open method to use, overriding every config file.
    #[arg(short = 'm', long = "method", value_name = "METHOD")]
    pub open_method: Option<String>,
    /// Vim executable to use, overriding every config file.
    #[arg(long = "vim", value_name = "EXECUTABLE")]
    pub vim_executable: Option<String>,
    /// Jump back to the host editor at Vim's last cursor position when Vim exits.
    #[arg(long = "restore-cursor")]
    pub restore_cursor: bool,
}

impl ConfigArgs {
    pub fn to_sources(&self) -> ConfigSources {
        ConfigSources {
            config_file: self.config_file.clone(),
            settings_json: self.settings_json.clone(),
            overrides: RawConfig {
                open_method: self.open_method.clone(),
                vim_executable: self.vim_executable.clone(),
                restore_cursor_after_vim: self.restore_cursor.then_some(true),
                ..Default::default()
            },
        }
    }
}

/// Shows a remediation and, on an interactive terminal, offers to open its link.
/// Nothing is opened without an explicit "yes".
pub fn offer_remediation(remediation: &Remediation, interactive: bool) {
    eprintln!(
        "{}",
        format!(t!("remediation.hint"), hint = remediation.message).yellow()
    );

    let Some(url) = remediation.url else {
        return;
    };
    if !interactive {
        eprintln!("{}", url.cyan());
        return;
    }

    let accepted = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!(t!("remediation.prompt"), url = url))
        .default(false)
        .interact()
        .unwrap_or(false);
    if accepted {
        open_url(url, HostOs::current());
    }
}

fn open_url(url: &str, os: HostOs) {
    let mut command = match os {
        HostOs::Windows => {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", "", url]);
            cmd
        }
        HostOs::MacOs => {
            let mut cmd = Command::new("open");
            cmd.arg(url);
            cmd
        }
        HostOs::Linux => {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(url);
            cmd
        }
    };
    if let Err(e) = command
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        log::warn!("Could not open '{}': {}", url, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_args_become_overrides() {
        let args = ConfigArgs {
            open_method: Some("kitty".to_string()),
            restore_cursor: true,
            ..Default::default()
        };
        let sources = args.to_sources();
        assert_eq!(sources.overrides.open_method.as_deref(), Some("kitty"));
        assert_eq!(sources.overrides.restore_cursor_after_vim, Some(true));
        assert_eq!(sources.overrides.vim_executable, None);
        assert!(sources.config_file.is_none());
    }

    #[test]
    fn test_restore_cursor_flag_absent_leaves_config_alone() {
        let sources = ConfigArgs::default().to_sources();
        assert_eq!(sources.overrides.restore_cursor_after_vim, None);
    }
}
