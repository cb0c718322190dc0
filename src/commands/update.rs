//! `divvy update` — change fields on one task.

use crate::store::TaskStore;
use crate::task::status::{transition_warning, Status};
use crate::tree::{self, FieldChanges};

/// Applies a partial field update and reports it.
///
/// When the status changes, a step outside the recommended transition
/// table prints an advisory warning on stderr; the update still applies.
///
/// # Errors
///
/// Returns an error string when validation, lookup, or persistence fails.
pub fn run(
    store: &TaskStore<'_>,
    root: &str,
    target: &str,
    goal: Option<&str>,
    status: Option<&str>,
    acceptance: Option<&str>,
    instructions: Option<&str>,
) -> Result<(), String> {
    let status = match status {
        Some(s) => Some(Status::parse_input(s)?),
        None => None,
    };
    // Prior status, for the advisory warning only.
    let prior = store.load(root).ok().and_then(|t| tree::find(&t, target).map(|n| n.status));

    let changes = FieldChanges {
        goal: goal.map(str::to_string),
        status,
        acceptance: acceptance.map(str::to_string),
        additional_instructions: instructions.map(str::to_string),
    };
    store.update_node(root, target, &changes).map_err(|e| e.to_string())?;

    if let (Some(prior), Some(new)) = (prior, status) {
        if let Some(warning) = transition_warning(prior, new) {
            eprintln!("warning: {warning}");
        }
    }
    println!("Updated task '{target}' in '{root}'");
    Ok(())
}
