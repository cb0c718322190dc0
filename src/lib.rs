//! Core library for the `divvy` task-tree CLI.
//!
//! The store, tree algorithms, and batch coordinator are usable as a
//! library; the CLI is a thin layer over them.

pub mod adapters;
pub mod batch;
pub mod cli;
pub mod commands;
pub mod context;
pub mod error;
pub mod ident;
pub mod ports;
pub mod store;
pub mod task;
pub mod tree;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli.command)
}
