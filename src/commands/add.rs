//! `divvy add` — append a child task under a parent.

use crate::store::TaskStore;

/// Appends the child and reports it.
///
/// # Errors
///
/// Returns an error string when validation, lookup, or persistence fails.
pub fn run(
    store: &TaskStore<'_>,
    root: &str,
    parent: &str,
    child: &str,
    goal: &str,
    acceptance: &str,
) -> Result<(), String> {
    store.append_child(root, parent, child, goal, acceptance).map_err(|e| e.to_string())?;
    println!("Added task '{child}' under '{parent}' in '{root}'");
    Ok(())
}
