// src/core/host.rs

use crate::models::{ActiveDocument, LaunchOutcome, Remediation};
use crate::system::executor::ExecutionError;
use std::path::{Path, PathBuf};

/// The editor openvim is invoked from.
///
/// It owns the focused document, the open workspace folders and the embedded
/// terminal panel, and it is where errors are shown to the user.
pub trait EditorHost {
    /// The focused, editable document, if any.
    fn active_document(&self) -> Option<ActiveDocument>;

    /// Starts saving `document`. Does not wait for the save to finish.
    fn save_document(&self, document: &ActiveDocument);

    /// Root folders of the open workspace, in the order the host lists them.
    fn workspace_folders(&self) -> Vec<PathBuf>;

    /// Opens an embedded terminal running `shell script`, then shows and focuses it.
    fn open_terminal(
        &self,
        shell: &Path,
        script: &str,
        cwd: &Path,
    ) -> Result<LaunchOutcome, ExecutionError>;

    /// Shows a single error notification, with an optional follow-up action.
    fn show_error(&self, message: &str, remediation: Option<&Remediation>);
}
