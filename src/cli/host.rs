// src/cli/host.rs

use crate::cli::handlers::commons;
use crate::core::host::EditorHost;
use crate::models::{ActiveDocument, CursorPosition, LaunchOutcome, Remediation};
use crate::system::executor::ExecutionError;
use colored::Colorize;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::Command;

/// The editor host used when openvim runs from a terminal.
///
/// The "active document" is the file named on the command line, the workspace
/// folders come from `--workspace`, and the "embedded terminal" is the terminal
/// openvim itself runs in.
#[derive(Debug, Clone)]
pub struct CliHost {
    document: Option<ActiveDocument>,
    folders: Vec<PathBuf>,
    interactive: bool,
}

impl CliHost {
    /// `line` and `column` are 1-based, as typed by the user.
    pub fn new(file: &Path, line: u32, column: u32, folders: Vec<PathBuf>) -> Self {
        // A file that does not exist yet has never been saved.
        let path = dunce::canonicalize(file).ok();
        if path.is_none() {
            log::debug!("'{}' does not exist on disk.", file.display());
        }

        let folders = folders
            .into_iter()
            .map(|folder| dunce::canonicalize(&folder).unwrap_or(folder))
            .collect();

        Self {
            document: Some(ActiveDocument {
                path,
                is_dirty: false,
                cursor: CursorPosition {
                    line: line.saturating_sub(1),
                    character: column.saturating_sub(1),
                },
            }),
            folders,
            interactive: std::io::stdin().is_terminal() && std::io::stderr().is_terminal(),
        }
    }
}

impl EditorHost for CliHost {
    fn active_document(&self) -> Option<ActiveDocument> {
        self.document.clone()
    }

    fn save_document(&self, document: &ActiveDocument) {
        // Files named on the command line are read from disk; there is no buffer to flush.
        log::debug!("Nothing to save for {:?}.", document.path);
    }

    fn workspace_folders(&self) -> Vec<PathBuf> {
        self.folders.clone()
    }

    fn open_terminal(
        &self,
        shell: &Path,
        script: &str,
        cwd: &Path,
    ) -> Result<LaunchOutcome, ExecutionError> {
        log::debug!("Running '{} {}' in the current terminal.", shell.display(), script);
        let status = Command::new(shell)
            .arg(script)
            .current_dir(dunce::simplified(cwd))
            .status()
            .map_err(|e| ExecutionError::CommandFailed(shell.display().to_string(), e))?;
        if !status.success() {
            log::warn!("Vim session exited with code: {:?}", status.code());
        }
        Ok(LaunchOutcome::Completed)
    }

    fn show_error(&self, message: &str, remediation: Option<&Remediation>) {
        eprintln!("\n{}: {}", "Error".red().bold(), message);
        if let Some(remediation) = remediation {
            commons::offer_remediation(remediation, self.interactive);
        }
    }
}
