// src/core/config_resolver.rs

use crate::constants::{
    DEFAULT_HOST_EDITOR, DEFAULT_ITERM_PROFILE, DEFAULT_OPEN_METHOD, DEFAULT_VIM_EXECUTABLE,
    POSIX_DEFAULT_SHELL, WINDOWS_DEFAULT_SHELL,
};
use crate::models::{
    HostOs, IntegratedTerminalOptions, ItermOptions, LinuxOptions, MacosOptions, RawConfig,
    ResolvedConfig, TerminalArgsOptions,
};

/// Identifiers from older releases and the ones that replaced them.
const LEGACY_OPEN_METHODS: &[(&str, &str)] = &[
    ("osx.iterm", "macos.iterm"),
    ("osx.macvim", "macos.macvim"),
];

/// Fills every missing value of `raw` with its default for `os`.
///
/// Never fails: an unknown `openMethod` is carried through untouched and rejected
/// later, when the launcher looks the strategy up.
pub fn resolve_config(raw: RawConfig, os: HostOs) -> ResolvedConfig {
    let open_method = rewrite_legacy_open_method(
        raw.open_method
            .unwrap_or_else(|| DEFAULT_OPEN_METHOD.to_string()),
    );

    let resolved = ResolvedConfig {
        open_method,
        vim_executable: raw
            .vim_executable
            .unwrap_or_else(|| DEFAULT_VIM_EXECUTABLE.to_string()),
        restore_cursor_after_vim: raw.restore_cursor_after_vim.unwrap_or(false),
        host_editor: raw
            .host_editor
            .unwrap_or_else(|| DEFAULT_HOST_EDITOR.to_string()),
        integrated_terminal: IntegratedTerminalOptions {
            path_to_shell: raw
                .integrated_terminal
                .path_to_shell
                .unwrap_or_else(|| default_shell_path(os).to_string()),
        },
        linux: LinuxOptions {
            gnome_terminal: TerminalArgsOptions {
                args: raw.linux.gnome_terminal.args.unwrap_or_default(),
            },
            tilix: TerminalArgsOptions {
                args: raw.linux.tilix.args.unwrap_or_default(),
            },
        },
        macos: MacosOptions {
            iterm: ItermOptions {
                profile: raw
                    .macos
                    .iterm
                    .profile
                    .unwrap_or_else(|| DEFAULT_ITERM_PROFILE.to_string()),
            },
        },
    };

    log::debug!("Resolved configuration: {:?}", resolved);
    resolved
}

/// Maps a legacy identifier to its current spelling. Exact, case-sensitive match.
pub fn rewrite_legacy_open_method(id: String) -> String {
    match LEGACY_OPEN_METHODS.iter().find(|(legacy, _)| *legacy == id) {
        Some((legacy, current)) => {
            log::debug!("Rewriting legacy open method '{}' to '{}'.", legacy, current);
            (*current).to_string()
        }
        None => id,
    }
}

fn default_shell_path(os: HostOs) -> &'static str {
    if os.is_windows() {
        WINDOWS_DEFAULT_SHELL
    } else {
        POSIX_DEFAULT_SHELL
    }
}
