// src/core/strategies.rs

use crate::constants::{
    DEFAULT_ITERM_PROFILE, GIT_FOR_WINDOWS_URL, SCRIPT_INTERPRETER, VIM_FOR_WINDOWS_URL,
};
use crate::core::command_builder::{
    build_editor_command, build_launch_script, ensure_no_double_quote, single_quote,
};
use crate::core::host::EditorHost;
use crate::core::launcher::LaunchError;
use crate::core::paths::normalize_path;
use crate::models::{HostOs, LaunchOutcome, LaunchRequest, OpenMethod, Remediation, ResolvedConfig};
use crate::system::executor::{Invocation, ShellExecutor};
use crate::system::shell;
use std::path::PathBuf;

/// Everything a strategy handler may touch.
pub struct StrategyContext<'a> {
    pub config: &'a ResolvedConfig,
    pub request: &'a LaunchRequest,
    /// Output of `build_vim_args` for this request.
    pub vim_args: &'a str,
    pub os: HostOs,
    pub host: &'a dyn EditorHost,
    pub executor: &'a dyn ShellExecutor,
}

impl std::fmt::Debug for StrategyContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyContext")
            .field("config", self.config)
            .field("request", self.request)
            .field("vim_args", &self.vim_args)
            .field("os", &self.os)
            .finish_non_exhaustive()
    }
}

impl StrategyContext<'_> {
    fn file_path(&self) -> String {
        self.request.file_path.display().to_string()
    }

    fn workspace_dir(&self) -> String {
        self.request.workspace_dir.display().to_string()
    }

    fn editor_command(&self, editor: &str, file_path: &str) -> String {
        build_editor_command(
            editor,
            file_path,
            self.vim_args,
            self.config.restore_cursor_after_vim,
        )
    }

    /// Writes the launch script for `vimExecutable` with native paths.
    fn native_launch_script(&self) -> Result<PathBuf, LaunchError> {
        let command = self.editor_command(&self.config.vim_executable, &self.file_path());
        let script = build_launch_script(&self.workspace_dir(), &command);
        Ok(shell::write_launch_script(&script)?)
    }
}

/// Launches Vim with the handler registered for `method`.
pub fn execute(method: OpenMethod, ctx: &StrategyContext<'_>) -> Result<LaunchOutcome, LaunchError> {
    log::debug!("Executing open method '{}'.", method);
    match method {
        OpenMethod::Gvim => open_gui_vim(ctx, method, "gvim"),
        OpenMethod::IntegratedTerminal => open_integrated_terminal(ctx),
        OpenMethod::Kitty => open_kitty(ctx),
        OpenMethod::GnomeTerminal => open_gnome_terminal(ctx),
        OpenMethod::Tilix => open_tilix(ctx),
        OpenMethod::Iterm => open_iterm(ctx),
        OpenMethod::MacVim => open_gui_vim(ctx, method, "mvim"),
    }
}

// --- GUI Vim (gvim, mvim) ---

fn open_gui_vim(
    ctx: &StrategyContext<'_>,
    method: OpenMethod,
    executable: &str,
) -> Result<LaunchOutcome, LaunchError> {
    if ctx.os.is_windows() {
        return Err(LaunchError::UnsupportedPlatformCombination {
            method: method.id(),
            os: ctx.os,
            hint: Remediation {
                message: t!("remediation.use_integrated_terminal").to_string(),
                url: Some(VIM_FOR_WINDOWS_URL),
            },
        });
    }

    let command_line = ctx.editor_command(executable, &ctx.file_path());
    let invocation =
        Invocation::shell(&command_line, ctx.os).current_dir(&ctx.request.workspace_dir);
    let output = ctx.executor.run_blocking(&invocation)?;
    if !output.success {
        return Err(LaunchError::ExternalProcessFailure {
            command: command_line,
            detail: exit_detail(output.code),
        });
    }
    Ok(LaunchOutcome::Completed)
}

// --- Embedded terminal panel ---

fn open_integrated_terminal(ctx: &StrategyContext<'_>) -> Result<LaunchOutcome, LaunchError> {
    let configured = &ctx.config.integrated_terminal.path_to_shell;
    let shell_path = shell::locate_shell(configured).ok_or_else(|| LaunchError::MissingShell {
        path: configured.clone(),
        hint: missing_shell_hint(ctx.os),
    })?;

    let wsl_style = ctx.os.is_windows() && shell::probe_wsl(&shell_path, ctx.executor);
    let normalize = |path: &str| normalize_path(path, wsl_style, ctx.os);

    let command = ctx.editor_command(
        &ctx.config.vim_executable,
        &normalize(&ctx.file_path()),
    );
    let script = build_launch_script(&normalize(&ctx.workspace_dir()), &command);
    let script_path = shell::write_launch_script(&script)?;

    let outcome = ctx.host.open_terminal(
        &shell_path,
        &normalize(&script_path.display().to_string()),
        &ctx.request.workspace_dir,
    )?;
    Ok(outcome)
}

fn missing_shell_hint(os: HostOs) -> Remediation {
    if os.is_windows() {
        Remediation {
            message: t!("remediation.install_git_bash").to_string(),
            url: Some(GIT_FOR_WINDOWS_URL),
        }
    } else {
        Remediation {
            message: t!("remediation.configure_shell").to_string(),
            url: None,
        }
    }
}

// --- Terminal emulators ---

fn open_kitty(ctx: &StrategyContext<'_>) -> Result<LaunchOutcome, LaunchError> {
    let script_path = ctx.native_launch_script()?;
    let invocation = Invocation::new("kitty")
        .args([SCRIPT_INTERPRETER.to_string(), script_path.display().to_string()])
        .current_dir(&ctx.request.workspace_dir);
    spawn_terminal(ctx, &invocation)
}

fn open_gnome_terminal(ctx: &StrategyContext<'_>) -> Result<LaunchOutcome, LaunchError> {
    let extra_args = split_terminal_args(&ctx.config.linux.gnome_terminal.args)?;
    let script_path = ctx.native_launch_script()?;
    let invocation = Invocation::new("gnome-terminal")
        .args(extra_args)
        .args(["--".to_string(), SCRIPT_INTERPRETER.to_string(), script_path.display().to_string()])
        .current_dir(&ctx.request.workspace_dir);
    spawn_terminal(ctx, &invocation)
}

fn open_tilix(ctx: &StrategyContext<'_>) -> Result<LaunchOutcome, LaunchError> {
    let extra_args = split_terminal_args(&ctx.config.linux.tilix.args)?;
    let script_path = ctx.native_launch_script()?;
    // `tilix -e` takes the whole command as a single string.
    let command = format!(
        "{} {}",
        SCRIPT_INTERPRETER,
        single_quote(&script_path.display().to_string())
    );
    let invocation = Invocation::new("tilix")
        .args(extra_args)
        .args(["-e".to_string(), command])
        .current_dir(&ctx.request.workspace_dir);
    spawn_terminal(ctx, &invocation)
}

fn split_terminal_args(args: &str) -> Result<Vec<String>, LaunchError> {
    shlex::split(args).ok_or_else(|| LaunchError::InvalidTerminalArgs(args.to_string()))
}

fn spawn_terminal(ctx: &StrategyContext<'_>, invocation: &Invocation) -> Result<LaunchOutcome, LaunchError> {
    let pid = ctx.executor.spawn_detached(invocation)?;
    Ok(LaunchOutcome::Detached { pid })
}

// --- iTerm (AppleScript) ---

fn open_iterm(ctx: &StrategyContext<'_>) -> Result<LaunchOutcome, LaunchError> {
    let profile = &ctx.config.macos.iterm.profile;
    ensure_no_double_quote(profile)?;

    let script_path = ctx.native_launch_script()?;
    let script_path = script_path.display().to_string();
    ensure_no_double_quote(&script_path)?;

    let invocation = Invocation::new("osascript")
        .args(["-e".to_string(), iterm_applescript(profile, &script_path)])
        .current_dir(&ctx.request.workspace_dir)
        .capture_output();

    let output = ctx.executor.run_blocking(&invocation)?;
    if !output.success || !output.stderr.trim().is_empty() {
        let detail = if output.stderr.trim().is_empty() {
            exit_detail(output.code)
        } else {
            output.stderr.trim().to_string()
        };
        return Err(LaunchError::ExternalProcessFailure {
            command: invocation.display_line(),
            detail,
        });
    }
    Ok(LaunchOutcome::Completed)
}

fn iterm_applescript(profile: &str, script_path: &str) -> String {
    let profile_clause = if profile == DEFAULT_ITERM_PROFILE {
        "default profile".to_string()
    } else {
        format!("profile \"{}\"", profile)
    };
    format!(
        "tell application \"iTerm\"\n  create window with {} command \"{} {}\"\nend tell",
        profile_clause,
        SCRIPT_INTERPRETER,
        single_quote(script_path)
    )
}

fn exit_detail(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {}", code),
        None => "terminated by a signal".to_string(),
    }
}
