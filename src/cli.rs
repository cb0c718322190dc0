//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `divvy`.
#[derive(Debug, Parser)]
#[command(name = "divvy", version, about = "Manage divide-and-conquer task trees")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new root task tree.
    Init {
        /// Root identifier (lowercase words separated by hyphens).
        id: String,
        /// What the tree is trying to achieve.
        #[arg(long)]
        goal: String,
        /// How to tell the work is complete.
        #[arg(long)]
        acceptance: String,
    },
    /// Append a child task under an existing parent.
    Add {
        /// Root tree to modify.
        root: String,
        /// Parent task id (may be the root itself).
        parent: String,
        /// Identifier for the new child.
        child: String,
        /// What the child task is trying to achieve.
        #[arg(long)]
        goal: String,
        /// How to tell the child task is complete.
        #[arg(long)]
        acceptance: String,
    },
    /// Update fields on one task in a tree.
    Update {
        /// Root tree containing the task.
        root: String,
        /// Task to update.
        target: String,
        /// New goal text.
        #[arg(long)]
        goal: Option<String>,
        /// New status (init, accept, in-progress, done, delete, hold, split).
        #[arg(long)]
        status: Option<String>,
        /// New acceptance text.
        #[arg(long)]
        acceptance: Option<String>,
        /// New additional instructions.
        #[arg(long)]
        instructions: Option<String>,
    },
    /// Remove a task; removing the root deletes the whole tree.
    Remove {
        /// Root tree containing the task.
        root: String,
        /// Task to remove.
        target: String,
    },
    /// Print a task tree.
    Show {
        /// Root tree to print.
        root: String,
    },
    /// List all root task-tree ids.
    List,
    /// Apply a JSON batch of status/instruction updates.
    Batch {
        /// Read the JSON request list from this file instead of stdin.
        #[arg(long)]
        file: Option<PathBuf>,
    },
}
