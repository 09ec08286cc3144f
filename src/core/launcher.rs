// src/core/launcher.rs

use crate::core::command_builder::build_vim_args;
use crate::core::config_loader::{self, ConfigSources, LoaderError};
use crate::core::config_resolver::resolve_config;
use crate::core::host::EditorHost;
use crate::core::request_builder::build_launch_request;
use crate::core::strategies::{self, StrategyContext};
use crate::models::{HostOs, LaunchOutcome, OpenMethod, Remediation};
use crate::system::executor::{ExecutionError, ShellExecutor};
use crate::system::shell::ShellError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("There is no active document to open in Vim.")]
    NoActiveDocument,
    #[error("The active document has never been saved. Save it to disk first.")]
    UnsavedDocument,
    #[error("Unsupported open method '{method}'. Valid methods are: {}.", .valid.join(", "))]
    UnsupportedStrategy {
        method: String,
        valid: Vec<&'static str>,
    },
    #[error("Could not find a shell at '{path}'.")]
    MissingShell { path: String, hint: Remediation },
    #[error("Open method '{method}' is not supported on {os}.")]
    UnsupportedPlatformCombination {
        method: &'static str,
        os: HostOs,
        hint: Remediation,
    },
    #[error("Command '{command}' failed: {detail}")]
    ExternalProcessFailure { command: String, detail: String },
    #[error("'{0}' must not contain a double-quote character.")]
    ForbiddenQuote(String),
    #[error("Could not parse terminal arguments '{0}'.")]
    InvalidTerminalArgs(String),
    #[error("Configuration Error: {0}")]
    Config(#[from] LoaderError),
    #[error("Shell Error: {0}")]
    Shell(#[from] ShellError),
    #[error("Execution Error: {0}")]
    Execution(#[from] ExecutionError),
}

impl LaunchError {
    /// The follow-up action to offer with this error, if there is one.
    pub fn remediation(&self) -> Option<&Remediation> {
        match self {
            Self::MissingShell { hint, .. } | Self::UnsupportedPlatformCombination { hint, .. } => {
                Some(hint)
            }
            _ => None,
        }
    }
}

/// The collaborators of a launch: who asked, how processes are started, and where.
pub struct LaunchEnvironment<'a> {
    pub host: &'a dyn EditorHost,
    pub executor: &'a dyn ShellExecutor,
    pub os: HostOs,
}

impl std::fmt::Debug for LaunchEnvironment<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LaunchEnvironment")
            .field("os", &self.os)
            .finish_non_exhaustive()
    }
}

/// Opens the host's active document in Vim.
///
/// Configuration is read from `sources` on every call. The first failing step
/// aborts the launch; nothing is retried.
pub fn open_in_vim(
    sources: &ConfigSources,
    env: &LaunchEnvironment<'_>,
) -> Result<LaunchOutcome, LaunchError> {
    // A broken configuration must fail before the document gets saved.
    let raw = config_loader::load_raw_config(sources)?;
    let config = resolve_config(raw, env.os);

    let request = build_launch_request(env.host)?;

    let method: OpenMethod =
        config
            .open_method
            .parse()
            .map_err(|_| LaunchError::UnsupportedStrategy {
                method: config.open_method.clone(),
                valid: OpenMethod::valid_ids(),
            })?;

    let restore_with = config
        .restore_cursor_after_vim
        .then_some(config.host_editor.as_str());
    let vim_args = build_vim_args(request.line, request.column, restore_with)?;

    log::info!(
        "Opening '{}' at {}:{} with '{}' (cwd: '{}').",
        request.file_path.display(),
        request.line,
        request.column,
        method,
        request.workspace_dir.display()
    );

    let ctx = StrategyContext {
        config: &config,
        request: &request,
        vim_args: &vim_args,
        os: env.os,
        host: env.host,
        executor: env.executor,
    };
    strategies::execute(method, &ctx)
}

/// Runs [`open_in_vim`] and turns any failure into a single notification on the host.
///
/// Returns `None` when the launch failed; the error has already been reported.
pub fn run(sources: &ConfigSources, env: &LaunchEnvironment<'_>) -> Option<LaunchOutcome> {
    match open_in_vim(sources, env) {
        Ok(outcome) => Some(outcome),
        Err(e) => {
            log::error!("Open in Vim failed: {:?}", e);
            let message = format!(t!("open.error.failed"), reason = e);
            env.host.show_error(&message, e.remediation());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::{RecordingExecutor, ScriptedHost, Spawn};
    use crate::models::{ActiveDocument, CursorPosition, RawConfig};
    use std::fs;
    use std::io::Write;
    use std::path::{Path, PathBuf};
    use tempfile::NamedTempFile;

    fn saved_document(path: &str) -> ActiveDocument {
        ActiveDocument {
            path: Some(PathBuf::from(path)),
            is_dirty: false,
            cursor: CursorPosition {
                line: 9,
                character: 4,
            },
        }
    }

    fn host_for(path: &str) -> ScriptedHost {
        ScriptedHost::new(Some(saved_document(path)), vec![PathBuf::from("/work")])
    }

    /// An empty TOML file keeps the user's real config out of the tests.
    /// The file lives as long as the returned handle.
    fn sources(raw: RawConfig) -> (ConfigSources, NamedTempFile) {
        let file = NamedTempFile::new().unwrap();
        let sources = ConfigSources {
            config_file: Some(file.path().to_path_buf()),
            settings_json: None,
            overrides: raw,
        };
        (sources, file)
    }

    fn method(id: &str) -> RawConfig {
        RawConfig {
            open_method: Some(id.to_string()),
            ..Default::default()
        }
    }

    fn launch(
        host: &ScriptedHost,
        executor: &RecordingExecutor,
        os: HostOs,
        raw: RawConfig,
    ) -> Result<LaunchOutcome, LaunchError> {
        let env = LaunchEnvironment { host, executor, os };
        let (sources, _config) = sources(raw);
        open_in_vim(&sources, &env)
    }

    fn script_of(path: &str) -> String {
        let content = fs::read_to_string(path).unwrap();
        fs::remove_file(path).ok();
        content
    }

    #[test]
    fn test_unknown_method_lists_the_seven_valid_ones() {
        let host = host_for("/work/a.txt");
        let executor = RecordingExecutor::default();
        let err = launch(&host, &executor, HostOs::Linux, method("bogus")).unwrap_err();

        match err {
            LaunchError::UnsupportedStrategy { method, valid } => {
                assert_eq!(method, "bogus");
                assert_eq!(
                    valid,
                    vec![
                        "gvim",
                        "integrated-terminal",
                        "kitty",
                        "linux.gnome-terminal",
                        "linux.tilix",
                        "macos.iterm",
                        "macos.macvim",
                    ]
                );
            }
            other => panic!("Expected UnsupportedStrategy, got {:?}", other),
        }
        assert!(executor.spawns().is_empty());
    }

    #[test]
    fn test_unsaved_document_spawns_nothing() {
        let host = ScriptedHost::new(
            Some(ActiveDocument {
                path: None,
                is_dirty: true,
                cursor: CursorPosition::default(),
            }),
            vec![],
        );
        let executor = RecordingExecutor::default();
        let err = launch(&host, &executor, HostOs::Linux, method("kitty")).unwrap_err();
        assert!(matches!(err, LaunchError::UnsavedDocument));
        assert!(executor.spawns().is_empty());
        assert!(host.terminals().is_empty());
    }

    #[test]
    fn test_gvim_runs_blocking_in_workspace() {
        let host = host_for("/work/src/a b.rs");
        let executor = RecordingExecutor::default();
        let outcome = launch(&host, &executor, HostOs::Linux, method("gvim")).unwrap();
        assert_eq!(outcome, LaunchOutcome::Completed);

        let spawns = executor.spawns();
        assert_eq!(spawns.len(), 1);
        let Spawn::Blocking(invocation) = &spawns[0] else {
            panic!("gvim must run blocking");
        };
        assert_eq!(invocation.program, "sh");
        assert_eq!(
            invocation.args,
            vec!["-c", "gvim '/work/src/a b.rs' '+call cursor(10, 5)'"]
        );
        assert_eq!(invocation.cwd.as_deref(), Some(Path::new("/work")));
    }

    #[test]
    fn test_gvim_is_refused_on_windows() {
        let host = host_for("/work/a.txt");
        let executor = RecordingExecutor::default();
        let err = launch(&host, &executor, HostOs::Windows, method("gvim")).unwrap_err();
        assert!(matches!(
            err,
            LaunchError::UnsupportedPlatformCombination { method: "gvim", .. }
        ));
        let url = err.remediation().and_then(|remediation| remediation.url);
        assert_eq!(url, Some(crate::constants::VIM_FOR_WINDOWS_URL));
        assert!(executor.spawns().is_empty());
    }

    #[test]
    fn test_gvim_non_zero_exit_is_a_failure() {
        let host = host_for("/work/a.txt");
        let executor = RecordingExecutor::failing_with(1, "");
        let err = launch(&host, &executor, HostOs::Linux, method("gvim")).unwrap_err();
        assert!(matches!(err, LaunchError::ExternalProcessFailure { .. }));
    }

    #[test]
    fn test_legacy_macvim_alias_uses_mvim() {
        let host = host_for("/work/a.txt");
        let executor = RecordingExecutor::default();
        launch(&host, &executor, HostOs::MacOs, method("osx.macvim")).unwrap();
        let Spawn::Blocking(invocation) = &executor.spawns()[0] else {
            panic!("macvim must run blocking");
        };
        assert!(invocation.args[1].starts_with("mvim '/work/a.txt' "));
    }

    #[test]
    fn test_kitty_is_detached_and_loads_launch_script() {
        let host = host_for("/work/a.txt");
        let executor = RecordingExecutor::default();
        let raw = RawConfig {
            vim_executable: Some("nvim".to_string()),
            ..method("kitty")
        };
        let outcome = launch(&host, &executor, HostOs::Linux, raw).unwrap();
        assert!(matches!(outcome, LaunchOutcome::Detached { .. }));

        let Spawn::Detached(invocation) = &executor.spawns()[0] else {
            panic!("kitty must be detached");
        };
        assert_eq!(invocation.program, "kitty");
        assert_eq!(invocation.args[0], "bash");
        assert_eq!(
            script_of(&invocation.args[1]),
            "cd '/work'\nnvim '/work/a.txt' '+call cursor(10, 5)'\n"
        );
    }

    #[test]
    fn test_gnome_terminal_passes_extra_args_before_separator() {
        let host = host_for("/work/a.txt");
        let executor = RecordingExecutor::default();
        let mut raw = method("linux.gnome-terminal");
        raw.linux.gnome_terminal.args = Some("--maximize --title 'my vim'".to_string());
        launch(&host, &executor, HostOs::Linux, raw).unwrap();

        let Spawn::Detached(invocation) = &executor.spawns()[0] else {
            panic!("gnome-terminal must be detached");
        };
        assert_eq!(invocation.program, "gnome-terminal");
        assert_eq!(&invocation.args[..4], ["--maximize", "--title", "my vim", "--"]);
        assert_eq!(invocation.args[4], "bash");
        script_of(&invocation.args[5]);
    }

    #[test]
    fn test_tilix_uses_execute_flag() {
        let host = host_for("/work/a.txt");
        let executor = RecordingExecutor::default();
        let mut raw = method("linux.tilix");
        raw.linux.tilix.args = Some("--new-process".to_string());
        launch(&host, &executor, HostOs::Linux, raw).unwrap();

        let Spawn::Detached(invocation) = &executor.spawns()[0] else {
            panic!("tilix must be detached");
        };
        assert_eq!(invocation.program, "tilix");
        assert_eq!(invocation.args[0], "--new-process");
        assert_eq!(invocation.args[1], "-e");
        let command = &invocation.args[2];
        assert!(command.starts_with("bash '"));
        let script = shlex::split(command).unwrap()[1].clone();
        script_of(&script);
    }

    #[test]
    fn test_iterm_default_and_named_profiles() {
        let host = host_for("/work/a.txt");
        let executor = RecordingExecutor::default();
        let outcome = launch(&host, &executor, HostOs::MacOs, method("osx.iterm")).unwrap();
        assert_eq!(outcome, LaunchOutcome::Completed);

        let mut raw = method("macos.iterm");
        raw.macos.iterm.profile = Some("Work".to_string());
        launch(&host, &executor, HostOs::MacOs, raw).unwrap();

        let spawns = executor.spawns();
        let scripts: Vec<&String> = spawns
            .iter()
            .map(|spawn| match spawn {
                Spawn::Blocking(invocation) => {
                    assert_eq!(invocation.program, "osascript");
                    assert!(invocation.capture_output);
                    &invocation.args[1]
                }
                Spawn::Detached(_) => panic!("iTerm must run blocking"),
            })
            .collect();
        assert!(scripts[0].contains("create window with default profile command"));
        assert!(scripts[1].contains("create window with profile \"Work\" command"));
    }

    #[test]
    fn test_iterm_stderr_output_is_a_failure() {
        let host = host_for("/work/a.txt");
        let executor = RecordingExecutor::failing_with(0, "execution error: iTerm got an error");
        let err = launch(&host, &executor, HostOs::MacOs, method("macos.iterm")).unwrap_err();
        match err {
            LaunchError::ExternalProcessFailure { detail, .. } => {
                assert!(detail.contains("iTerm got an error"));
            }
            other => panic!("Expected ExternalProcessFailure, got {:?}", other),
        }
    }

    #[test]
    fn test_iterm_profile_with_double_quote_is_rejected() {
        let host = host_for("/work/a.txt");
        let executor = RecordingExecutor::default();
        let mut raw = method("macos.iterm");
        raw.macos.iterm.profile = Some("My \"Profile\"".to_string());
        let err = launch(&host, &executor, HostOs::MacOs, raw).unwrap_err();
        assert!(matches!(err, LaunchError::ForbiddenQuote(_)));
        assert!(executor.spawns().is_empty());
    }

    #[test]
    fn test_restore_cursor_adds_exit_hook() {
        let host = host_for("/work/a.txt");
        let executor = RecordingExecutor::default();
        let raw = RawConfig {
            restore_cursor_after_vim: Some(true),
            ..method("kitty")
        };
        launch(&host, &executor, HostOs::Linux, raw).unwrap();
        let Spawn::Detached(invocation) = &executor.spawns()[0] else {
            panic!("kitty must be detached");
        };
        let script = script_of(&invocation.args[1]);
        assert!(script.contains("cursor(10, 5)"));
        assert!(script.contains("VimLeavePre"));
        assert!(script.trim_end().ends_with("; exit"));
        assert!(!script.contains('"'));
    }

    #[test]
    fn test_integrated_terminal_opens_host_terminal() {
        let shell = NamedTempFile::new().unwrap();
        let host = host_for("/work/a.txt");
        let executor = RecordingExecutor::default();
        let mut raw = method("integrated-terminal");
        raw.integrated_terminal.path_to_shell = Some(shell.path().display().to_string());

        let outcome = launch(&host, &executor, HostOs::Linux, raw).unwrap();
        assert_eq!(outcome, LaunchOutcome::Completed);
        // No WSL probe outside Windows.
        assert!(executor.spawns().is_empty());

        let terminals = host.terminals();
        assert_eq!(terminals.len(), 1);
        let (shell_path, script, cwd) = &terminals[0];
        assert_eq!(
            shell_path,
            &dunce::simplified(shell.path()).to_path_buf()
        );
        assert_eq!(cwd, &PathBuf::from("/work"));
        assert_eq!(
            script_of(script),
            "cd '/work'\nvim '/work/a.txt' '+call cursor(10, 5)'\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_integrated_terminal_uses_wsl_paths_when_probe_succeeds() {
        let shell = NamedTempFile::new().unwrap();
        let host = ScriptedHost::new(
            Some(saved_document(r"C:\proj\src\a.txt")),
            vec![PathBuf::from(r"C:\proj")],
        );
        let executor = RecordingExecutor::default();
        let mut raw = method("integrated-terminal");
        raw.integrated_terminal.path_to_shell = Some(shell.path().display().to_string());

        launch(&host, &executor, HostOs::Windows, raw).unwrap();

        let Spawn::Blocking(probe) = &executor.spawns()[0] else {
            panic!("WSL probe must run blocking");
        };
        assert_eq!(probe.args, vec!["-c", "test -d /mnt/c"]);

        let (_, script, _) = &host.terminals()[0];
        assert_eq!(
            script_of(script),
            "cd '/mnt/c/proj'\nvim '/mnt/c/proj/src/a.txt' '+call cursor(10, 5)'\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_integrated_terminal_uses_git_bash_paths_when_probe_fails() {
        let shell = NamedTempFile::new().unwrap();
        let host = ScriptedHost::new(
            Some(saved_document(r"D:\proj\a.txt")),
            vec![PathBuf::from(r"D:\proj")],
        );
        let executor = RecordingExecutor::failing_with(1, "");
        let mut raw = method("integrated-terminal");
        raw.integrated_terminal.path_to_shell = Some(shell.path().display().to_string());

        launch(&host, &executor, HostOs::Windows, raw).unwrap();
        let (_, script, _) = &host.terminals()[0];
        assert_eq!(
            script_of(script),
            "cd '/d/proj'\nvim '/d/proj/a.txt' '+call cursor(10, 5)'\n"
        );
    }

    #[test]
    fn test_integrated_terminal_missing_shell() {
        let host = host_for("/work/a.txt");
        let executor = RecordingExecutor::default();
        let mut raw = method("integrated-terminal");
        raw.integrated_terminal.path_to_shell = Some("/no/such/bash".to_string());

        let err = launch(&host, &executor, HostOs::Linux, raw).unwrap_err();
        assert!(matches!(err, LaunchError::MissingShell { .. }));
        assert!(host.terminals().is_empty());
    }

    #[test]
    fn test_missing_shell_on_windows_offers_git_for_windows() {
        let host = host_for("/work/a.txt");
        let executor = RecordingExecutor::default();
        let mut raw = method("integrated-terminal");
        raw.integrated_terminal.path_to_shell = Some(r"C:\nope\bash.exe".to_string());

        let err = launch(&host, &executor, HostOs::Windows, raw).unwrap_err();
        let hint = err.remediation().unwrap();
        assert_eq!(hint.url, Some("https://gitforwindows.org/"));
    }

    #[test]
    fn test_run_reports_exactly_one_error() {
        let host = host_for("/work/a.txt");
        let executor = RecordingExecutor::default();
        let env = LaunchEnvironment {
            host: &host,
            executor: &executor,
            os: HostOs::Linux,
        };
        let (sources, _config) = sources(method("bogus"));
        let outcome = run(&sources, &env);
        assert_eq!(outcome, None);

        let errors = host.errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].0.contains("bogus"));
        assert!(!errors[0].1);
    }

    #[test]
    fn test_run_reports_config_errors_too() {
        let host = host_for("/work/a.txt");
        let executor = RecordingExecutor::default();
        let env = LaunchEnvironment {
            host: &host,
            executor: &executor,
            os: HostOs::Linux,
        };
        let broken = ConfigSources {
            config_file: Some(PathBuf::from("/no/such/openvim/config.toml")),
            ..Default::default()
        };
        assert_eq!(run(&broken, &env), None);
        assert_eq!(host.errors().len(), 1);
    }

    #[test]
    fn test_broken_config_leaves_dirty_document_unsaved() {
        let host = ScriptedHost::new(
            Some(ActiveDocument {
                is_dirty: true,
                ..saved_document("/work/a.txt")
            }),
            vec![PathBuf::from("/work")],
        );
        let executor = RecordingExecutor::default();
        let mut config = NamedTempFile::new().unwrap();
        config.write_all(b"openMethod = [").unwrap();
        config.flush().unwrap();
        let env = LaunchEnvironment {
            host: &host,
            executor: &executor,
            os: HostOs::Linux,
        };
        let broken = ConfigSources {
            config_file: Some(config.path().to_path_buf()),
            ..Default::default()
        };

        let err = open_in_vim(&broken, &env).unwrap_err();
        assert!(matches!(err, LaunchError::Config(_)));
        assert_eq!(host.saves(), 0);
        assert!(executor.spawns().is_empty());
    }

    #[test]
    fn test_run_passes_remediation_along() {
        let host = host_for("/work/a.txt");
        let executor = RecordingExecutor::default();
        let env = LaunchEnvironment {
            host: &host,
            executor: &executor,
            os: HostOs::Windows,
        };
        let (sources, _config) = sources(method("gvim"));
        assert_eq!(run(&sources, &env), None);
        assert!(host.errors()[0].1);
    }
}
