//! openvim: open the file you are editing in Vim, at the same cursor position,
//! inside a GUI Vim, a terminal emulator or an embedded terminal panel.

include!(concat!(env!("OUT_DIR"), "/translations.rs"));

pub mod cli;
pub mod constants;
pub mod core;
pub mod models;
pub mod system;
