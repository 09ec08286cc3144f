// src/system/shell.rs

use crate::constants::{LAUNCH_SCRIPT_PREFIX, LAUNCH_SCRIPT_SUFFIX, WSL_PROBE_MOUNT};
use crate::system::executor::{Invocation, ShellExecutor};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::{env, fs};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Filesystem Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error with temporary file: {0}")]
    TempFile(#[from] tempfile::PersistError),
}

/// Writes a launch script into a fresh temporary file and returns its path.
///
/// The file is kept on disk: the terminal that runs it may start long after
/// openvim has exited, so cleanup is left to the OS temp directory policy.
pub fn write_launch_script(content: &str) -> Result<PathBuf, ShellError> {
    let mut temp_script = tempfile::Builder::new()
        .prefix(LAUNCH_SCRIPT_PREFIX)
        .suffix(LAUNCH_SCRIPT_SUFFIX)
        .tempfile()?;
    temp_script.write_all(content.as_bytes())?;
    temp_script.flush()?;

    let (_, path) = temp_script.keep()?;
    log::debug!("Launch script created at: {}", path.display());
    Ok(path)
}

/// Finds the shell binary for the integrated terminal.
///
/// A value containing a path separator must point at an existing file; a bare
/// name (`bash`, `zsh.exe`) is looked up on `PATH`.
pub fn locate_shell(configured: &str) -> Option<PathBuf> {
    let candidate = Path::new(configured);
    if candidate.is_file() {
        return Some(dunce::simplified(candidate).to_path_buf());
    }
    if configured.contains('/') || configured.contains('\\') {
        return None;
    }
    let path_var = env::var_os("PATH")?;
    find_executable_in(env::split_paths(&path_var), configured, env::consts::EXE_SUFFIX)
}

/// Looks for `executable_name` in each of `dirs`. A name without an extension
/// also matches `<name><exe_suffix>`, so `bash` finds `bash.exe` on Windows.
fn find_executable_in(
    dirs: impl IntoIterator<Item = PathBuf>,
    executable_name: &str,
    exe_suffix: &str,
) -> Option<PathBuf> {
    let mut names = vec![executable_name.to_string()];
    if !exe_suffix.is_empty() && Path::new(executable_name).extension().is_none() {
        names.push(format!("{}{}", executable_name, exe_suffix));
    }

    dirs.into_iter()
        .flat_map(|dir| names.iter().map(move |name| dir.join(name)))
        .find(|candidate| fs::metadata(candidate).is_ok_and(|meta| meta.is_file()))
}

/// Asks `shell` whether it sees the WSL drive mount. Any failure means "not WSL".
pub fn probe_wsl(shell: &Path, executor: &dyn ShellExecutor) -> bool {
    let probe = Invocation::new(shell.display().to_string())
        .args(["-c", &format!("test -d {}", WSL_PROBE_MOUNT)])
        .capture_output();
    match executor.run_blocking(&probe) {
        Ok(output) => {
            log::debug!("WSL probe for '{}': {}", shell.display(), output.success);
            output.success
        }
        Err(e) => {
            log::warn!("WSL probe for '{}' failed: {}", shell.display(), e);
            false
        }
    }
}
