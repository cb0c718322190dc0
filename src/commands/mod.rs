//! Command dispatch and handlers.

pub mod add;
pub mod batch;
pub mod init;
pub mod list;
pub mod remove;
pub mod show;
pub mod update;

use std::env;
use std::path::{Path, PathBuf};

use crate::cli::Command;
use crate::context::ServiceContext;
use crate::store::TaskStore;

/// Dispatch a parsed command to its handler.
///
/// The store root comes from `DIVVY_DATA` (a `.env` file is honored),
/// defaulting to `./.divvy`.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    dotenvy::dotenv().ok();
    let data_dir =
        env::var("DIVVY_DATA").map_or_else(|_| PathBuf::from(".divvy"), PathBuf::from);
    let ctx = ServiceContext::live();
    dispatch_with_context(command, &ctx, &data_dir)
}

/// Dispatch a command with the given service context and store root.
fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    data_dir: &Path,
) -> Result<(), String> {
    let store = TaskStore::new(ctx, data_dir);
    match command {
        Command::Init { id, goal, acceptance } => init::run(&store, id, goal, acceptance),
        Command::Add { root, parent, child, goal, acceptance } => {
            add::run(&store, root, parent, child, goal, acceptance)
        }
        Command::Update { root, target, goal, status, acceptance, instructions } => update::run(
            &store,
            root,
            target,
            goal.as_deref(),
            status.as_deref(),
            acceptance.as_deref(),
            instructions.as_deref(),
        ),
        Command::Remove { root, target } => remove::run(&store, root, target),
        Command::Show { root } => show::run(&store, root),
        Command::List => list::run(&store),
        Command::Batch { file } => batch::run(&store, file.as_deref()),
    }
}
