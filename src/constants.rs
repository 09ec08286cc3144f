// src/constants.rs

/// The name of the openvim directory inside the system config directory.
pub const CONFIG_DIR_NAME: &str = "openvim";

/// The name of the main configuration file (inside the openvim config dir).
pub const CONFIG_FILENAME: &str = "config.toml";

/// Prefix of the namespaced keys read from an editor `settings.json`.
pub const SETTINGS_NAMESPACE: &str = "open-in-vim";

pub const DEFAULT_OPEN_METHOD: &str = "integrated-terminal";
pub const DEFAULT_VIM_EXECUTABLE: &str = "vim";

/// Command used by the cursor-restore hook to jump back into the host editor.
pub const DEFAULT_HOST_EDITOR: &str = "code";

/// Git Bash, as installed by Git for Windows.
pub const WINDOWS_DEFAULT_SHELL: &str = r"C:\Program Files\Git\bin\bash.exe";
pub const POSIX_DEFAULT_SHELL: &str = "/bin/bash";

/// Sentinel meaning "no named profile" for iTerm.
pub const DEFAULT_ITERM_PROFILE: &str = "default profile";

/// Only visible from a WSL bash; Git Bash mounts drives at `/c` instead.
pub const WSL_PROBE_MOUNT: &str = "/mnt/c";

/// Interpreter used by terminal emulators to run the launch script.
pub const SCRIPT_INTERPRETER: &str = "bash";

pub const LAUNCH_SCRIPT_PREFIX: &str = "openvim-launch-";
pub const LAUNCH_SCRIPT_SUFFIX: &str = ".sh";

pub const GIT_FOR_WINDOWS_URL: &str = "https://gitforwindows.org/";
pub const VIM_FOR_WINDOWS_URL: &str = "https://www.vim.org/download.php#pc";
