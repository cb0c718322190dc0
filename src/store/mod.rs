//! Task store — persistence layer and boundary operations for task trees.
//!
//! One directory per root aggregate: root id `R` lives at
//! `<root>/R/task.yaml`, a single human-readable YAML document holding the
//! whole tree. All I/O goes through the `FileSystem` port so the store
//! works against disk or memory alike.
//!
//! The lower half of this type is the repository contract (`exists`,
//! `load`, `save`, `delete`, `list_ids`); the upper half is the boundary
//! operations (`init`, `append_child`, `update_node`, `remove`) that
//! validate client input, run the tree algorithms, save once, and notify
//! the change observer.

use std::path::{Path, PathBuf};

use crate::context::ServiceContext;
use crate::error::{Error, Result};
use crate::ident;
use crate::ports::notifier::{TreeAction, TreeEvent};
use crate::task::Task;
use crate::tree::{self, FieldChanges};

/// File name of the serialized tree inside each root's directory.
pub const TREE_FILE: &str = "task.yaml";

/// Persistence layer and boundary operations for task trees.
pub struct TaskStore<'a> {
    ctx: &'a ServiceContext,
    root: PathBuf,
}

impl<'a> TaskStore<'a> {
    /// Creates a store rooted at the given data directory.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, root: &Path) -> Self {
        Self { ctx, root: root.to_path_buf() }
    }

    fn tree_path(&self, root_id: &str) -> PathBuf {
        self.root.join(root_id).join(TREE_FILE)
    }

    // --- repository contract ---

    /// Returns `true` iff a persisted aggregate exists for `root_id`.
    #[must_use]
    pub fn exists(&self, root_id: &str) -> bool {
        self.ctx.fs.exists(&self.tree_path(root_id))
    }

    /// Loads the full tree for `root_id`, migrating every legacy `pending`
    /// status to `init` before handing it back.
    ///
    /// # Errors
    ///
    /// `NotFound` if no aggregate exists, `Corrupt` if the payload does not
    /// parse as a task tree, `Io` if reading fails.
    pub fn load(&self, root_id: &str) -> Result<Task> {
        let path = self.tree_path(root_id);
        if !self.ctx.fs.exists(&path) {
            return Err(Error::not_found(format!("no task tree named '{root_id}'")));
        }
        let contents = self
            .ctx
            .fs
            .read_to_string(&path)
            .map_err(|e| Error::io(format!("failed to read task tree '{root_id}': {e}")))?;
        let mut tree: Task = serde_yaml::from_str(&contents)
            .map_err(|e| Error::Corrupt { root_id: root_id.to_string(), detail: e.to_string() })?;
        tree.migrate_legacy_statuses();
        Ok(tree)
    }

    /// Overwrites the persisted aggregate for `root_id` with `tree`.
    ///
    /// A full overwrite, not a merge; container directories are created as
    /// needed and the write is atomic from a reader's point of view.
    ///
    /// # Errors
    ///
    /// `Io` if serialization or the write fails.
    pub fn save(&self, root_id: &str, tree: &Task) -> Result<()> {
        let yaml = serde_yaml::to_string(tree)
            .map_err(|e| Error::io(format!("failed to serialize task tree '{root_id}': {e}")))?;
        self.ctx
            .fs
            .write(&self.tree_path(root_id), &yaml)
            .map_err(|e| Error::io(format!("failed to write task tree '{root_id}': {e}")))
    }

    /// Removes the aggregate and all its storage. Idempotent: deleting an
    /// id that does not exist is not an error.
    ///
    /// # Errors
    ///
    /// `Io` only for unexpected storage failures.
    pub fn delete(&self, root_id: &str) -> Result<()> {
        self.ctx
            .fs
            .remove_dir_all(&self.root.join(root_id))
            .map_err(|e| Error::io(format!("failed to delete task tree '{root_id}': {e}")))
    }

    /// Lists all persisted root ids, sorted lexicographically.
    ///
    /// Returns an empty list (never an error) when the store directory does
    /// not exist yet. Stray entries without a tree document are skipped.
    ///
    /// # Errors
    ///
    /// `Io` if the store directory cannot be listed.
    pub fn list_ids(&self) -> Result<Vec<String>> {
        if !self.ctx.fs.exists(&self.root) {
            return Ok(Vec::new());
        }
        let entries = self
            .ctx
            .fs
            .list_dir(&self.root)
            .map_err(|e| Error::io(format!("failed to list task trees: {e}")))?;
        let mut ids: Vec<String> =
            entries.into_iter().filter(|name| self.exists(name)).collect();
        ids.sort();
        Ok(ids)
    }

    // --- boundary operations ---

    /// Creates a new root aggregate with status `init` and no children.
    ///
    /// # Errors
    ///
    /// `Validation` if the id fails the grammar, a required field is empty,
    /// or the id already exists; `Io` if persisting fails.
    pub fn init(&self, id: &str, goal: &str, acceptance: &str) -> Result<Task> {
        validate_id(id)?;
        require_text("goal", goal)?;
        require_text("acceptance", acceptance)?;
        if self.exists(id) {
            return Err(Error::validation(format!("task tree '{id}' already exists")));
        }
        let tree = Task::new(id, goal, acceptance);
        self.save(id, &tree)?;
        self.notify(id, TreeAction::Created);
        Ok(tree)
    }

    /// Appends a new child under `parent_id` and returns the updated tree.
    ///
    /// # Errors
    ///
    /// `Validation` for bad ids, empty fields, or a `child_id` that already
    /// exists under the parent's subtree; `NotFound` if the root or parent
    /// is missing; `Corrupt`/`Io` from the load/save.
    pub fn append_child(
        &self,
        root_id: &str,
        parent_id: &str,
        child_id: &str,
        goal: &str,
        acceptance: &str,
    ) -> Result<Task> {
        validate_id(root_id)?;
        validate_id(parent_id)?;
        validate_id(child_id)?;
        require_text("goal", goal)?;
        require_text("acceptance", acceptance)?;

        let mut tree = self.load(root_id)?;
        let Some(parent) = tree::find_mut(&mut tree, parent_id) else {
            return Err(Error::not_found(format!(
                "no task '{parent_id}' under root '{root_id}'"
            )));
        };
        if tree::find(parent, child_id).is_some() {
            return Err(Error::validation(format!(
                "task '{child_id}' already exists under '{parent_id}'"
            )));
        }
        tree::append_child(parent, Task::new(child_id, goal, acceptance));
        self.save(root_id, &tree)?;
        self.notify(root_id, TreeAction::Updated);
        Ok(tree)
    }

    /// Applies a partial field update to one node and returns the updated
    /// tree. Same merge semantics as the batch path; no transition policy
    /// is enforced.
    ///
    /// # Errors
    ///
    /// `Validation` for bad ids or an empty change set; `NotFound` if the
    /// root or target is missing; `Corrupt`/`Io` from the load/save.
    pub fn update_node(
        &self,
        root_id: &str,
        target_id: &str,
        changes: &FieldChanges,
    ) -> Result<Task> {
        validate_id(root_id)?;
        validate_id(target_id)?;
        if changes.is_empty() {
            return Err(Error::validation(format!("no fields to update for '{target_id}'")));
        }
        let mut tree = self.load(root_id)?;
        if !tree::update_fields(&mut tree, target_id, changes) {
            return Err(Error::not_found(format!(
                "no task '{target_id}' under root '{root_id}'"
            )));
        }
        self.save(root_id, &tree)?;
        self.notify(root_id, TreeAction::Updated);
        Ok(tree)
    }

    /// Removes a node. When `target_id` names the root itself, the whole
    /// aggregate is deleted; otherwise the node is spliced out of its
    /// parent's child list.
    ///
    /// # Errors
    ///
    /// `Validation` for bad ids; `NotFound` if the root or target is
    /// missing; `Corrupt`/`Io` from the load/save.
    pub fn remove(&self, root_id: &str, target_id: &str) -> Result<()> {
        validate_id(root_id)?;
        validate_id(target_id)?;
        if root_id == target_id {
            if !self.exists(root_id) {
                return Err(Error::not_found(format!("no task tree named '{root_id}'")));
            }
            self.delete(root_id)?;
            self.notify(root_id, TreeAction::Deleted);
            return Ok(());
        }
        let mut tree = self.load(root_id)?;
        if !tree::remove(&mut tree, target_id) {
            return Err(Error::not_found(format!(
                "no task '{target_id}' under root '{root_id}'"
            )));
        }
        self.save(root_id, &tree)?;
        self.notify(root_id, TreeAction::Updated);
        Ok(())
    }

    /// Emits a change event through the context's notifier.
    pub(crate) fn notify(&self, root_id: &str, action: TreeAction) {
        self.ctx.notifier.tree_saved(&TreeEvent {
            root_id: root_id.to_string(),
            action,
            at: self.ctx.clock.now(),
        });
    }
}

fn validate_id(id: &str) -> Result<()> {
    ident::validate(id)
        .map_err(|e| Error::validation(format!("invalid identifier '{id}': {e}")))
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(format!("{field} must not be empty")));
    }
    Ok(())
}
