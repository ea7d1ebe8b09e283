//! Command implementations behind the `dam` binary.

pub mod cli;
pub mod commands;
pub mod errors;
pub mod files;
pub mod ui;
