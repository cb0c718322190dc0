//! `divvy remove` — remove a task or delete a whole tree.

use crate::store::TaskStore;

/// Removes a descendant, or the whole aggregate when `target` is the root.
///
/// # Errors
///
/// Returns an error string when validation, lookup, or persistence fails.
pub fn run(store: &TaskStore<'_>, root: &str, target: &str) -> Result<(), String> {
    store.remove(root, target).map_err(|e| e.to_string())?;
    if root == target {
        println!("Deleted task tree '{root}'");
    } else {
        println!("Removed task '{target}' from '{root}'");
    }
    Ok(())
}
