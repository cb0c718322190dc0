//! Change-notification port.
//!
//! The store tells an explicitly constructed observer about every
//! successful save or aggregate deletion. Callers that do not care wire a
//! no-op implementation; there is no process-wide singleton.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// What happened to a root aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TreeAction {
    /// A new root aggregate was created.
    Created,
    /// An existing tree was mutated and saved.
    Updated,
    /// The whole aggregate was deleted.
    Deleted,
}

/// A change notification emitted after a successful save or deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeEvent {
    /// The root aggregate that changed.
    pub root_id: String,
    /// What happened to it.
    pub action: TreeAction,
    /// When the change was persisted.
    pub at: DateTime<Utc>,
}

/// Observes persisted changes to task trees.
pub trait ChangeNotifier: Send + Sync {
    /// Called after a tree has been durably saved or deleted.
    fn tree_saved(&self, event: &TreeEvent);
}
