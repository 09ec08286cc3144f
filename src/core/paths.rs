// src/core/paths.rs

use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILENAME};
use crate::models::HostOs;
use lazy_static::lazy_static;
use regex::Regex;
use std::path::PathBuf;
use thiserror::Error;

lazy_static! {
    // `C:` or `/C:` at the very start of a path.
    static ref DRIVE_PREFIX_RE: Regex =
        Regex::new(r"^/?([A-Za-z]):").expect("drive prefix regex is valid");
}

#[derive(Error, Debug)]
pub enum PathError {
    #[error("Could not find system config directory.")]
    ConfigDirNotFound,
    #[error("Failed to expand path '{path}': {reason}")]
    Expansion { path: String, reason: String },
}

/// Returns the path to the openvim configuration directory (`~/.config/openvim`).
/// The directory is not created; a missing config is simply an empty one.
pub fn get_config_dir() -> Result<PathBuf, PathError> {
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME))
        .ok_or(PathError::ConfigDirNotFound)
}

/// Returns the path to the default `config.toml`.
pub fn get_config_file_path() -> Result<PathBuf, PathError> {
    get_config_dir().map(|dir| dir.join(CONFIG_FILENAME))
}

/// Expands `~` and environment variables (`$VAR`, `${VAR}`) in a user-supplied path.
pub fn expand_user_path(template: &str) -> Result<String, PathError> {
    shellexpand::full(template)
        .map(|expanded| expanded.into_owned())
        .map_err(|e| PathError::Expansion {
            path: template.to_string(),
            reason: e.to_string(),
        })
}

/// Rewrites a native path into the form a POSIX shell running on `os` understands.
///
/// On Windows, a leading drive (`C:` or `/C:`) becomes `/c`, or `/mnt/c` when the
/// shell is a WSL one, and backslashes become forward slashes. Elsewhere the path
/// is returned as is. Applying it twice gives the same result as applying it once.
pub fn normalize_path(path: &str, wsl_style: bool, os: HostOs) -> String {
    if !os.is_windows() {
        return path.to_string();
    }

    let rewritten = match DRIVE_PREFIX_RE.captures(path) {
        Some(caps) => {
            let drive = caps
                .get(1)
                .map(|m| m.as_str().to_ascii_lowercase())
                .unwrap_or_default();
            let matched_len = caps.get(0).map_or(0, |m| m.end());
            let rest = path.get(matched_len..).unwrap_or_default();
            let mount = if wsl_style {
                format!("/mnt/{}", drive)
            } else {
                format!("/{}", drive)
            };
            // `C:foo` has no separator after the drive; keep the result absolute.
            if rest.is_empty() || rest.starts_with('\\') || rest.starts_with('/') {
                format!("{}{}", mount, rest)
            } else {
                format!("{}/{}", mount, rest)
            }
        }
        None => path.to_string(),
    };

    rewritten.replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_drive_letter_for_compatibility_shell() {
        assert_eq!(
            normalize_path(r"C:\a\b.txt", false, HostOs::Windows),
            "/c/a/b.txt"
        );
    }

    #[test]
    fn test_normalize_drive_letter_for_wsl() {
        assert_eq!(
            normalize_path(r"C:\a\b.txt", true, HostOs::Windows),
            "/mnt/c/a/b.txt"
        );
    }

    #[test]
    fn test_normalize_leading_slash_drive_and_lowercase() {
        assert_eq!(
            normalize_path("/D:/Projects/app/main.rs", false, HostOs::Windows),
            "/d/Projects/app/main.rs"
        );
        assert_eq!(
            normalize_path(r"E:\x", true, HostOs::Windows),
            "/mnt/e/x"
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            r"C:\Users\me\notes.md",
            r"c:\a",
            "/Z:/deep/tree/file",
            r"\\server\share\file.txt",
            r"relative\path.txt",
            "C:",
        ];
        for wsl in [false, true] {
            for sample in samples {
                let once = normalize_path(sample, wsl, HostOs::Windows);
                let twice = normalize_path(&once, wsl, HostOs::Windows);
                assert_eq!(once, twice, "not idempotent for '{}' (wsl={})", sample, wsl);
            }
        }
    }

    #[test]
    fn test_normalize_without_drive_only_converts_separators() {
        assert_eq!(
            normalize_path(r"\\server\share\file.txt", false, HostOs::Windows),
            "//server/share/file.txt"
        );
        assert_eq!(
            normalize_path(r"src\main.rs", true, HostOs::Windows),
            "src/main.rs"
        );
    }

    #[test]
    fn test_normalize_drive_relative_path_stays_absolute() {
        assert_eq!(normalize_path("C:foo.txt", false, HostOs::Windows), "/c/foo.txt");
        assert_eq!(normalize_path("C:", false, HostOs::Windows), "/c");
    }

    #[test]
    fn test_normalize_is_noop_outside_windows() {
        for os in [HostOs::Linux, HostOs::MacOs] {
            assert_eq!(normalize_path(r"C:\a\b.txt", true, os), r"C:\a\b.txt");
            assert_eq!(normalize_path("/home/me/a.txt", false, os), "/home/me/a.txt");
        }
    }

    #[test]
    fn test_expand_user_path_keeps_plain_paths() {
        assert_eq!(expand_user_path("/bin/bash").unwrap(), "/bin/bash");
    }

    #[test]
    fn test_expand_user_path_reports_missing_variable() {
        let result = expand_user_path("$OPENVIM_SURELY_UNDEFINED_VARIABLE/bash");
        assert!(matches!(result, Err(PathError::Expansion { .. })));
    }
}
