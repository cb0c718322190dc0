//! The task data model: a recursive tree of work items.

pub mod status;

pub use status::Status;

use serde::{Deserialize, Serialize};

/// One node in a divide-and-conquer task tree.
///
/// A root aggregate is simply a `Task` with no parent; its `id` names the
/// persistence unit. Children live in `tasks` in display order. The field
/// names on the wire are camelCase to match the persisted document shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Identifier, unique within its own tree (not across trees).
    pub id: String,
    /// What this task is trying to achieve. Required, non-empty.
    pub goal: String,
    /// How to tell the task is complete. Required at creation.
    pub acceptance: String,
    /// Lifecycle status.
    pub status: Status,
    /// Optional free-text instructions, mutable independently of status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_instructions: Option<String>,
    /// Child tasks in display order. Never null: an empty list is
    /// serialized explicitly.
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Task {
    /// Creates a fresh node with status `init` and no children.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        goal: impl Into<String>,
        acceptance: impl Into<String>,
    ) -> Self {
        Task {
            id: id.into(),
            goal: goal.into(),
            acceptance: acceptance.into(),
            status: Status::Init,
            additional_instructions: None,
            tasks: Vec::new(),
        }
    }

    /// Rewrites every legacy `pending` status in this subtree to `init`.
    ///
    /// Applied on every load (migration-on-read); the persisted file is
    /// only corrected the next time the root is saved.
    pub fn migrate_legacy_statuses(&mut self) {
        if self.status == Status::Pending {
            self.status = Status::Init;
        }
        for child in &mut self.tasks {
            child.migrate_legacy_statuses();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Status, Task};

    #[test]
    fn new_task_starts_at_init_with_no_children() {
        let task = Task::new("proj-x", "G", "A");
        assert_eq!(task.status, Status::Init);
        assert!(task.tasks.is_empty());
        assert!(task.additional_instructions.is_none());
    }

    #[test]
    fn migration_rewrites_pending_recursively() {
        let mut root = Task::new("root", "g", "a");
        root.status = Status::Pending;
        let mut child = Task::new("child", "g", "a");
        child.status = Status::Pending;
        let mut grandchild = Task::new("grandchild", "g", "a");
        grandchild.status = Status::Done;
        child.tasks.push(grandchild);
        root.tasks.push(child);

        root.migrate_legacy_statuses();

        assert_eq!(root.status, Status::Init);
        assert_eq!(root.tasks[0].status, Status::Init);
        assert_eq!(root.tasks[0].tasks[0].status, Status::Done);
    }

    #[test]
    fn yaml_round_trip_preserves_structure() {
        let mut root = Task::new("proj-x", "Ship it", "All tests green");
        root.tasks.push(Task::new("step-1", "First step", "Step done"));
        root.tasks[0].additional_instructions = Some("mind the edge cases".into());

        let yaml = serde_yaml::to_string(&root).unwrap();
        assert!(yaml.contains("additionalInstructions"));
        let parsed: Task = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, root);
    }

    #[test]
    fn missing_tasks_field_reads_as_empty_list() {
        let yaml = "id: solo\ngoal: g\nacceptance: a\nstatus: init\n";
        let parsed: Task = serde_yaml::from_str(yaml).unwrap();
        assert!(parsed.tasks.is_empty());
    }

    #[test]
    fn empty_tasks_list_is_serialized_explicitly() {
        let yaml = serde_yaml::to_string(&Task::new("solo", "g", "a")).unwrap();
        assert!(yaml.contains("tasks"));
    }
}
