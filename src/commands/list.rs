//! `divvy list` — list all root task-tree ids.

use crate::store::TaskStore;

/// Prints all persisted root ids, one per line.
///
/// # Errors
///
/// Returns an error string when the store directory cannot be listed.
pub fn run(store: &TaskStore<'_>) -> Result<(), String> {
    let ids = store.list_ids().map_err(|e| e.to_string())?;
    if ids.is_empty() {
        println!("No task trees found");
    } else {
        for id in ids {
            println!("{id}");
        }
    }
    Ok(())
}
