//! `divvy init` — create a new root task tree.

use crate::store::TaskStore;

/// Creates the root aggregate and reports it.
///
/// # Errors
///
/// Returns an error string when validation or persistence fails.
pub fn run(store: &TaskStore<'_>, id: &str, goal: &str, acceptance: &str) -> Result<(), String> {
    store.init(id, goal, acceptance).map_err(|e| e.to_string())?;
    println!("Created task tree '{id}'");
    Ok(())
}
