// src/core/request_builder.rs

use crate::core::host::EditorHost;
use crate::core::launcher::LaunchError;
use crate::models::LaunchRequest;
use std::path::{Path, PathBuf};

/// Collects the focused document, its cursor and its workspace root into a request.
///
/// A dirty document is saved first, without waiting: Vim reads whatever reached
/// the disk by the time it starts.
pub fn build_launch_request(host: &dyn EditorHost) -> Result<LaunchRequest, LaunchError> {
    let document = host
        .active_document()
        .ok_or(LaunchError::NoActiveDocument)?;
    let file_path = document
        .path
        .clone()
        .ok_or(LaunchError::UnsavedDocument)?;

    if document.is_dirty {
        log::debug!("Saving '{}' before launching Vim.", file_path.display());
        host.save_document(&document);
    }

    let workspace_dir =
        resolve_workspace_dir(&file_path, &host.workspace_folders(), dirs::home_dir());

    Ok(LaunchRequest {
        line: document.cursor.line.saturating_add(1),
        column: document.cursor.character.saturating_add(1),
        file_path,
        workspace_dir,
    })
}

/// Picks the working directory for Vim.
///
/// The deepest workspace folder containing `file` wins; otherwise the first
/// workspace folder, then `home`, then the file's own directory.
pub fn resolve_workspace_dir(file: &Path, folders: &[PathBuf], home: Option<PathBuf>) -> PathBuf {
    let containing = folders
        .iter()
        .filter(|folder| file.starts_with(folder))
        .max_by_key(|folder| folder.components().count());

    if let Some(folder) = containing {
        return folder.clone();
    }
    if let Some(first) = folders.first() {
        log::debug!(
            "'{}' is outside every workspace folder. Using '{}'.",
            file.display(),
            first.display()
        );
        return first.clone();
    }
    home.or_else(|| file.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}
