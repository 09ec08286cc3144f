// src/models.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

// --- HOST PLATFORM ---

/// The operating system openvim runs on.
///
/// Passed explicitly everywhere a platform rule applies so that every rule can be
/// exercised from any machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    Windows,
    MacOs,
    Linux,
}

impl HostOs {
    /// Detects the operating system this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Linux
        }
    }

    pub fn is_windows(self) -> bool {
        self == Self::Windows
    }
}

impl fmt::Display for HostOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Windows => "Windows",
            Self::MacOs => "macOS",
            Self::Linux => "Linux",
        };
        f.write_str(name)
    }
}

// --- OPEN METHODS ---

/// One pairing of Vim with the mechanism used to launch it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpenMethod {
    Gvim,
    IntegratedTerminal,
    Kitty,
    GnomeTerminal,
    Tilix,
    Iterm,
    MacVim,
}

impl OpenMethod {
    pub const ALL: [Self; 7] = [
        Self::Gvim,
        Self::IntegratedTerminal,
        Self::Kitty,
        Self::GnomeTerminal,
        Self::Tilix,
        Self::Iterm,
        Self::MacVim,
    ];

    /// The identifier used in configuration files.
    pub fn id(self) -> &'static str {
        match self {
            Self::Gvim => "gvim",
            Self::IntegratedTerminal => "integrated-terminal",
            Self::Kitty => "kitty",
            Self::GnomeTerminal => "linux.gnome-terminal",
            Self::Tilix => "linux.tilix",
            Self::Iterm => "macos.iterm",
            Self::MacVim => "macos.macvim",
        }
    }

    pub fn valid_ids() -> Vec<&'static str> {
        Self::ALL.iter().map(|method| method.id()).collect()
    }

    /// Whether the method can be used at all on the given platform.
    pub fn is_available_on(self, os: HostOs) -> bool {
        match self {
            Self::Gvim | Self::MacVim => !os.is_windows(),
            Self::IntegratedTerminal => true,
            Self::Kitty => os != HostOs::Windows,
            Self::GnomeTerminal | Self::Tilix => os == HostOs::Linux,
            Self::Iterm => os == HostOs::MacOs,
        }
    }
}

impl fmt::Display for OpenMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// An identifier that does not name any [`OpenMethod`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOpenMethod(pub String);

impl FromStr for OpenMethod {
    type Err = UnknownOpenMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.id() == s)
            .ok_or_else(|| UnknownOpenMethod(s.to_string()))
    }
}

// --- CONFIGURATION MODELS (what is read from config.toml / settings.json) ---

/// The sparse configuration as written by the user. Every field may be missing.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawConfig {
    pub open_method: Option<String>,
    pub vim_executable: Option<String>,
    pub restore_cursor_after_vim: Option<bool>,
    pub host_editor: Option<String>,
    #[serde(rename = "integrated-terminal", default)]
    pub integrated_terminal: RawIntegratedTerminal,
    #[serde(default)]
    pub linux: RawLinux,
    #[serde(default)]
    pub macos: RawMacos,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawIntegratedTerminal {
    pub path_to_shell: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RawLinux {
    #[serde(rename = "gnome-terminal", default)]
    pub gnome_terminal: RawTerminalArgs,
    #[serde(default)]
    pub tilix: RawTerminalArgs,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RawTerminalArgs {
    pub args: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RawMacos {
    #[serde(default)]
    pub iterm: RawIterm,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RawIterm {
    pub profile: Option<String>,
}

impl RawConfig {
    /// Layers `other` on top of `self`: every value set in `other` wins.
    pub fn overlay(self, other: Self) -> Self {
        Self {
            open_method: other.open_method.or(self.open_method),
            vim_executable: other.vim_executable.or(self.vim_executable),
            restore_cursor_after_vim: other
                .restore_cursor_after_vim
                .or(self.restore_cursor_after_vim),
            host_editor: other.host_editor.or(self.host_editor),
            integrated_terminal: RawIntegratedTerminal {
                path_to_shell: other
                    .integrated_terminal
                    .path_to_shell
                    .or(self.integrated_terminal.path_to_shell),
            },
            linux: RawLinux {
                gnome_terminal: RawTerminalArgs {
                    args: other
                        .linux
                        .gnome_terminal
                        .args
                        .or(self.linux.gnome_terminal.args),
                },
                tilix: RawTerminalArgs {
                    args: other.linux.tilix.args.or(self.linux.tilix.args),
                },
            },
            macos: RawMacos {
                iterm: RawIterm {
                    profile: other.macos.iterm.profile.or(self.macos.iterm.profile),
                },
            },
        }
    }
}

// --- RESOLVED MODELS (what the launcher works with) ---

/// A fully populated configuration, resolved once per launch request.
///
/// `open_method` is still the raw identifier: it is only validated when the
/// launcher looks up the strategy.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    pub open_method: String,
    pub vim_executable: String,
    pub restore_cursor_after_vim: bool,
    pub host_editor: String,
    #[serde(rename = "integrated-terminal")]
    pub integrated_terminal: IntegratedTerminalOptions,
    pub linux: LinuxOptions,
    pub macos: MacosOptions,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IntegratedTerminalOptions {
    pub path_to_shell: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LinuxOptions {
    #[serde(rename = "gnome-terminal")]
    pub gnome_terminal: TerminalArgsOptions,
    pub tilix: TerminalArgsOptions,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TerminalArgsOptions {
    pub args: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MacosOptions {
    pub iterm: ItermOptions,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ItermOptions {
    pub profile: String,
}

// --- DOCUMENT & REQUEST MODELS ---

/// A 0-based cursor position, as reported by the host editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorPosition {
    pub line: u32,
    pub character: u32,
}

/// The document currently focused in the host editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveDocument {
    /// `None` while the document has never been written to disk.
    pub path: Option<PathBuf>,
    pub is_dirty: bool,
    pub cursor: CursorPosition,
}

/// Everything a strategy needs to know about what to open and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub file_path: PathBuf,
    /// 1-based.
    pub line: u32,
    /// 1-based.
    pub column: u32,
    pub workspace_dir: PathBuf,
}

/// How a strategy left the external process it launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// The launching call blocked until the process finished.
    Completed,
    /// The process was handed off and is not tracked any further.
    Detached { pid: Option<u32> },
}

/// A follow-up action offered to the user alongside an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remediation {
    pub message: String,
    pub url: Option<&'static str>,
}
