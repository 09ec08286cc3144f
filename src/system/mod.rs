//! # System Interaction Layer
//!
//! The boundary between the launch pipeline and the operating system.
//!
//! ## Modules
//!
//! - **`executor`**: the `ShellExecutor` trait and its implementations. `SystemExecutor`
//!   runs processes either blocking (GUI Vim, `osascript`) or detached (terminal
//!   emulators); `DryRunExecutor` only prints what would run.
//! - **`shell`**: compatibility shell discovery, WSL probing and launch script files.

pub mod executor;
pub mod shell;
