// src/system/executor.rs

use crate::models::HostOs;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::{Command as StdCommand, Stdio};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Command '{0}' could not be executed: {1}")]
    CommandFailed(String, std::io::Error),
}

/// A fully specified process launch: program, argument vector and working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    /// Capture stdout/stderr instead of inheriting them (blocking runs only).
    pub capture_output: bool,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            capture_output: false,
        }
    }

    /// Runs `command_line` through the platform shell (`sh -c`, or `cmd /C` on Windows).
    pub fn shell(command_line: &str, os: HostOs) -> Self {
        if os.is_windows() {
            Self::new("cmd").arg("/C").arg(command_line)
        } else {
            Self::new("sh").arg("-c").arg(command_line)
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }

    pub fn capture_output(mut self) -> Self {
        self.capture_output = true;
        self
    }

    /// A shell-quoted, human readable rendering used in logs and error messages.
    pub fn display_line(&self) -> String {
        let parts = std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str));
        shlex::try_join(parts).unwrap_or_else(|_| {
            std::iter::once(self.program.clone())
                .chain(self.args.iter().cloned())
                .collect::<Vec<_>>()
                .join(" ")
        })
    }

    fn to_command(&self) -> StdCommand {
        let mut command = StdCommand::new(&self.program);
        command.args(&self.args);
        if let Some(cwd) = &self.cwd {
            command.current_dir(dunce::simplified(cwd));
        }
        command
    }
}

/// What a blocking run left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub success: bool,
    pub code: Option<i32>,
    /// Empty unless the invocation asked for captured output.
    pub stdout: String,
    pub stderr: String,
}

/// The boundary between openvim and the processes it starts.
pub trait ShellExecutor {
    /// Runs the invocation and waits for it to exit. No timeout is applied.
    fn run_blocking(&self, invocation: &Invocation) -> Result<ProcessOutput, ExecutionError>;

    /// Starts the invocation and returns immediately. The child is never awaited.
    fn spawn_detached(&self, invocation: &Invocation) -> Result<Option<u32>, ExecutionError>;
}

/// Executes invocations for real with `std::process`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl ShellExecutor for SystemExecutor {
    fn run_blocking(&self, invocation: &Invocation) -> Result<ProcessOutput, ExecutionError> {
        log::debug!("Running (blocking): {}", invocation.display_line());
        let mut command = invocation.to_command();

        if invocation.capture_output {
            let output = command
                .stdin(Stdio::null())
                .output()
                .map_err(|e| ExecutionError::CommandFailed(invocation.display_line(), e))?;
            return Ok(ProcessOutput {
                success: output.status.success(),
                code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let status = command
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| ExecutionError::CommandFailed(invocation.display_line(), e))?;
        Ok(ProcessOutput {
            success: status.success(),
            code: status.code(),
            ..Default::default()
        })
    }

    fn spawn_detached(&self, invocation: &Invocation) -> Result<Option<u32>, ExecutionError> {
        log::debug!("Spawning (detached): {}", invocation.display_line());
        let child = invocation
            .to_command()
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| ExecutionError::CommandFailed(invocation.display_line(), e))?;
        // The child handle is dropped on purpose: terminal windows outlive openvim.
        Ok(Some(child.id()))
    }
}

/// Prints what would be executed instead of executing it.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunExecutor;

impl DryRunExecutor {
    fn print(kind: &str, invocation: &Invocation) {
        let cwd = invocation
            .cwd
            .as_ref()
            .map(|dir| format!(" (in {})", dir.display()))
            .unwrap_or_default();
        println!(
            "{} {} {}{}",
            t!("dry_run.label").dimmed(),
            kind.cyan(),
            invocation.display_line().green(),
            cwd.dimmed()
        );
    }
}

impl ShellExecutor for DryRunExecutor {
    fn run_blocking(&self, invocation: &Invocation) -> Result<ProcessOutput, ExecutionError> {
        Self::print("run", invocation);
        Ok(ProcessOutput {
            success: true,
            code: Some(0),
            ..Default::default()
        })
    }

    fn spawn_detached(&self, invocation: &Invocation) -> Result<Option<u32>, ExecutionError> {
        Self::print("spawn", invocation);
        Ok(None)
    }
}
