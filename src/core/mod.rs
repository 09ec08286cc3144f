//! # Launch Pipeline
//!
//! Everything between "open this document in Vim" and the process invocation.
//!
//! ## Modules
//!
//! - **`config_loader`**: reads the sparse user configuration from `config.toml`,
//!   an editor `settings.json` and command-line overrides, fresh on every request.
//! - **`config_resolver`**: fills in platform defaults and rewrites legacy identifiers.
//! - **`request_builder`**: turns the host's active document into a `LaunchRequest`.
//! - **`paths`**: config locations, user path expansion and Windows-to-POSIX path rewriting.
//! - **`command_builder`**: Vim arguments, shell quoting and launch script bodies.
//! - **`strategies`**: one handler per open method.
//! - **`launcher`**: orchestrates the pipeline and reports failures through the host.
//! - **`host`**: the `EditorHost` seam.

pub mod command_builder;
pub mod config_loader;
pub mod config_resolver;
pub mod host;
pub mod launcher;
pub mod paths;
pub mod request_builder;
pub mod strategies;

#[cfg(test)]
pub(crate) mod test_support;
