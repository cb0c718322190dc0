//! Pure tree algorithms over an in-memory task tree.
//!
//! All four operations are side-effect free with respect to storage: they
//! only walk or mutate the structure passed in. Every lookup uses pre-order
//! depth-first search (node first, then children in order), so when a tree
//! degenerately contains duplicate ids, the first match always wins.

use crate::task::{Status, Task};

/// A partial set of field updates for a single node.
///
/// A field left as `None` is not touched; `Some("")` is a legitimate
/// overwrite, distinct from "not provided".
#[derive(Debug, Clone, Default)]
pub struct FieldChanges {
    /// New goal text.
    pub goal: Option<String>,
    /// New status.
    pub status: Option<Status>,
    /// New acceptance text.
    pub acceptance: Option<String>,
    /// New additional-instructions text.
    pub additional_instructions: Option<String>,
}

impl FieldChanges {
    /// Returns `true` when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.goal.is_none()
            && self.status.is_none()
            && self.acceptance.is_none()
            && self.additional_instructions.is_none()
    }
}

/// Finds the first node with `target_id`, pre-order. `None` if absent.
#[must_use]
pub fn find<'a>(tree: &'a Task, target_id: &str) -> Option<&'a Task> {
    if tree.id == target_id {
        return Some(tree);
    }
    tree.tasks.iter().find_map(|child| find(child, target_id))
}

/// Mutable variant of [`find`]; same traversal order.
pub fn find_mut<'a>(tree: &'a mut Task, target_id: &str) -> Option<&'a mut Task> {
    if tree.id == target_id {
        return Some(tree);
    }
    tree.tasks.iter_mut().find_map(|child| find_mut(child, target_id))
}

/// Appends `child` at the end of `parent`'s children, preserving display
/// order.
///
/// The caller must already have verified that `child.id` does not collide
/// with a descendant id under `parent`; this primitive does not check.
pub fn append_child(parent: &mut Task, child: Task) {
    parent.tasks.push(child);
}

/// Applies `changes` to the first node matching `target_id`.
///
/// Only the fields present in `changes` are overwritten; the rest keep
/// their values. No status-transition policy is applied here. Returns
/// whether a matching node was found.
pub fn update_fields(tree: &mut Task, target_id: &str, changes: &FieldChanges) -> bool {
    let Some(node) = find_mut(tree, target_id) else {
        return false;
    };
    if let Some(goal) = &changes.goal {
        node.goal = goal.clone();
    }
    if let Some(status) = changes.status {
        node.status = status;
    }
    if let Some(acceptance) = &changes.acceptance {
        node.acceptance = acceptance.clone();
    }
    if let Some(instructions) = &changes.additional_instructions {
        node.additional_instructions = Some(instructions.clone());
    }
    true
}

/// Splices the first node matching `target_id` out of its parent's child
/// list, searching children pre-order.
///
/// The tree's own root is never a candidate, so `remove(tree, tree.id)`
/// returns `false` and leaves the tree untouched. Returns whether a node
/// was removed.
pub fn remove(tree: &mut Task, target_id: &str) -> bool {
    let mut i = 0;
    while i < tree.tasks.len() {
        if tree.tasks[i].id == target_id {
            tree.tasks.remove(i);
            return true;
        }
        if remove(&mut tree.tasks[i], target_id) {
            return true;
        }
        i += 1;
    }
    false
}
