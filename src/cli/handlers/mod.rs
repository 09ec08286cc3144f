// src/cli/handlers/mod.rs

// One module per CLI action.

pub mod commons;
pub mod config;
pub mod methods;
pub mod open;
