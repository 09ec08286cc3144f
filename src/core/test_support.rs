// src/core/test_support.rs
// Scripted collaborators for pipeline tests.

use crate::core::host::EditorHost;
use crate::models::{ActiveDocument, LaunchOutcome, Remediation};
use crate::system::executor::{ExecutionError, Invocation, ProcessOutput, ShellExecutor};
use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

/// An editor host whose state is fixed up front and which records what it is asked to do.
pub(crate) struct ScriptedHost {
    document: Option<ActiveDocument>,
    folders: Vec<PathBuf>,
    saves: Cell<usize>,
    terminals: RefCell<Vec<(PathBuf, String, PathBuf)>>,
    errors: RefCell<Vec<(String, bool)>>,
}

impl ScriptedHost {
    pub(crate) fn new(document: Option<ActiveDocument>, folders: Vec<PathBuf>) -> Self {
        Self {
            document,
            folders,
            saves: Cell::new(0),
            terminals: RefCell::new(Vec::new()),
            errors: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn saves(&self) -> usize {
        self.saves.get()
    }

    /// `(shell, script, cwd)` of every terminal opened so far.
    pub(crate) fn terminals(&self) -> Vec<(PathBuf, String, PathBuf)> {
        self.terminals.borrow().clone()
    }

    /// `(message, had_remediation)` of every error shown so far.
    pub(crate) fn errors(&self) -> Vec<(String, bool)> {
        self.errors.borrow().clone()
    }
}

impl EditorHost for ScriptedHost {
    fn active_document(&self) -> Option<ActiveDocument> {
        self.document.clone()
    }

    fn save_document(&self, _document: &ActiveDocument) {
        self.saves.set(self.saves.get() + 1);
    }

    fn workspace_folders(&self) -> Vec<PathBuf> {
        self.folders.clone()
    }

    fn open_terminal(
        &self,
        shell: &Path,
        script: &str,
        cwd: &Path,
    ) -> Result<LaunchOutcome, ExecutionError> {
        self.terminals.borrow_mut().push((
            shell.to_path_buf(),
            script.to_string(),
            cwd.to_path_buf(),
        ));
        Ok(LaunchOutcome::Completed)
    }

    fn show_error(&self, message: &str, remediation: Option<&Remediation>) {
        self.errors
            .borrow_mut()
            .push((message.to_string(), remediation.is_some()));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Spawn {
    Blocking(Invocation),
    Detached(Invocation),
}

/// Records invocations instead of running them. Blocking runs return `output`.
pub(crate) struct RecordingExecutor {
    output: ProcessOutput,
    spawns: RefCell<Vec<Spawn>>,
}

impl Default for RecordingExecutor {
    fn default() -> Self {
        Self {
            output: ProcessOutput {
                success: true,
                code: Some(0),
                ..Default::default()
            },
            spawns: RefCell::new(Vec::new()),
        }
    }
}

impl RecordingExecutor {
    pub(crate) fn failing_with(code: i32, stderr: &str) -> Self {
        Self {
            output: ProcessOutput {
                success: code == 0,
                code: Some(code),
                stdout: String::new(),
                stderr: stderr.to_string(),
            },
            ..Default::default()
        }
    }

    pub(crate) fn spawns(&self) -> Vec<Spawn> {
        self.spawns.borrow().clone()
    }
}

impl ShellExecutor for RecordingExecutor {
    fn run_blocking(&self, invocation: &Invocation) -> Result<ProcessOutput, ExecutionError> {
        self.spawns
            .borrow_mut()
            .push(Spawn::Blocking(invocation.clone()));
        Ok(self.output.clone())
    }

    fn spawn_detached(&self, invocation: &Invocation) -> Result<Option<u32>, ExecutionError> {
        self.spawns
            .borrow_mut()
            .push(Spawn::Detached(invocation.clone()));
        Ok(Some(4242))
    }
}
