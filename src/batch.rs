//! Batch update coordinator.
//!
//! Applies many `(targetId, rootId, field-changes)` requests in one pass
//! while guaranteeing that each root tree is loaded once and saved at most
//! once per batch. Grouping by root id is what prevents the intra-request
//! lost-update race that per-request load/save would cause; it deliberately
//! does NOT protect two concurrent batches touching the same root.
//!
//! Structural problems with the request list (empty batch, bad identifier,
//! bad status, no fields) reject the whole batch. Per-node problems (root
//! or target missing, I/O failure for one group) are reported in the
//! per-request outcomes and never abort the other groups.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ident;
use crate::ports::notifier::TreeAction;
use crate::store::TaskStore;
use crate::task::Status;
use crate::tree::{self, FieldChanges};

/// One requested change: a target node in a root tree plus the fields to
/// set. At least one of `status` / `additional_instructions` must be
/// present. `status` is carried as a string so the legacy `pending` value
/// can be rejected with a precise message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    /// The node to change.
    pub target_id: String,
    /// The root tree containing it.
    pub root_id: String,
    /// New status, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// New additional instructions, if any. An empty string is a
    /// legitimate overwrite.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_instructions: Option<String>,
}

/// Per-request outcome, in the original input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcome {
    /// The node the request targeted.
    pub target_id: String,
    /// Whether the change was applied and persisted.
    pub success: bool,
    /// Failure reason when `success` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregate response for a structurally valid batch.
///
/// `success` stays `true` even when individual nodes failed; callers must
/// inspect `results`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResponse {
    /// `true` for every structurally valid batch.
    pub success: bool,
    /// One outcome per request, in input order.
    pub results: Vec<BatchOutcome>,
}

/// Validated form of one request, ready to apply.
struct PlannedChange {
    target_id: String,
    changes: FieldChanges,
}

/// Runs a batch of updates against the store.
///
/// # Errors
///
/// Returns `Validation` when the batch itself is malformed: empty, an
/// identifier fails the grammar, a status is not one of the seven current
/// values, or a request carries no fields. No group is processed in that
/// case. Per-node failures do not error; they land in the outcomes.
pub fn run(store: &TaskStore<'_>, requests: &[BatchRequest]) -> Result<BatchResponse> {
    let planned = validate_batch(requests)?;

    // Group request indices by root id, preserving first-seen group order
    // and the relative order of requests within each group.
    let mut groups: Vec<(&str, Vec<usize>)> = Vec::new();
    for (i, request) in requests.iter().enumerate() {
        match groups.iter_mut().find(|(root, _)| *root == request.root_id) {
            Some((_, indices)) => indices.push(i),
            None => groups.push((request.root_id.as_str(), vec![i])),
        }
    }

    let mut outcomes: Vec<Option<BatchOutcome>> = requests.iter().map(|_| None).collect();

    for (root_id, indices) in groups {
        apply_group(store, root_id, &indices, &planned, &mut outcomes);
    }

    let results = outcomes
        .into_iter()
        .map(|o| o.unwrap_or_else(|| unreachable!("every request receives an outcome")))
        .collect();
    Ok(BatchResponse { success: true, results })
}

/// Loads one root, applies its group's changes in order, and saves once if
/// anything succeeded. Failures here only affect this group.
fn apply_group(
    store: &TaskStore<'_>,
    root_id: &str,
    indices: &[usize],
    planned: &[PlannedChange],
    outcomes: &mut [Option<BatchOutcome>],
) {
    let fail_all = |outcomes: &mut [Option<BatchOutcome>], message: &str| {
        for &i in indices {
            outcomes[i] = Some(BatchOutcome {
                target_id: planned[i].target_id.clone(),
                success: false,
                error: Some(message.to_string()),
            });
        }
    };

    let mut tree = match store.load(root_id) {
        Ok(tree) => tree,
        Err(Error::NotFound(_)) => {
            fail_all(outcomes, &format!("root not found: {root_id}"));
            return;
        }
        Err(e) => {
            fail_all(outcomes, &e.to_string());
            return;
        }
    };

    let mut any_applied = false;
    for &i in indices {
        let change = &planned[i];
        // Later requests against the same node overwrite earlier fields.
        let applied = tree::update_fields(&mut tree, &change.target_id, &change.changes);
        any_applied |= applied;
        outcomes[i] = Some(BatchOutcome {
            target_id: change.target_id.clone(),
            success: applied,
            error: if applied {
                None
            } else {
                Some(format!("target not found: {}", change.target_id))
            },
        });
    }

    if !any_applied {
        return;
    }
    // Exactly one save for the whole group. If it fails, nothing was
    // persisted, so the requests that applied in memory are failed too.
    if let Err(e) = store.save(root_id, &tree) {
        let message = e.to_string();
        for &i in indices {
            if let Some(outcome) = &mut outcomes[i] {
                if outcome.success {
                    outcome.success = false;
                    outcome.error = Some(message.clone());
                }
            }
        }
        return;
    }
    store.notify(root_id, TreeAction::Updated);
}

/// Validates the whole request list up front. Any failure rejects the
/// batch before any group is touched.
fn validate_batch(requests: &[BatchRequest]) -> Result<Vec<PlannedChange>> {
    if requests.is_empty() {
        return Err(Error::validation("batch contains no requests"));
    }
    let mut planned = Vec::with_capacity(requests.len());
    for (i, request) in requests.iter().enumerate() {
        let n = i + 1;
        ident::validate(&request.target_id).map_err(|e| {
            Error::validation(format!(
                "request {n}: invalid target id '{}': {e}",
                request.target_id
            ))
        })?;
        ident::validate(&request.root_id).map_err(|e| {
            Error::validation(format!("request {n}: invalid root id '{}': {e}", request.root_id))
        })?;
        let status = match &request.status {
            Some(s) => Some(
                Status::parse_input(s)
                    .map_err(|e| Error::validation(format!("request {n}: {e}")))?,
            ),
            None => None,
        };
        if status.is_none() && request.additional_instructions.is_none() {
            return Err(Error::validation(format!(
                "request {n}: at least one of status or additionalInstructions is required"
            )));
        }
        planned.push(PlannedChange {
            target_id: request.target_id.clone(),
            changes: FieldChanges {
                status,
                additional_instructions: request.additional_instructions.clone(),
                ..FieldChanges::default()
            },
        });
    }
    Ok(planned)
}

#[cfg(test)]
mod tests {
    use super::{run, BatchRequest};
    use crate::adapters::memory::{MemFileSystem, MemoryNotifier};
    use crate::context::ServiceContext;
    use crate::error::Error;
    use crate::ports::filesystem::FileSystem;
    use crate::ports::notifier::TreeAction;
    use crate::store::TaskStore;
    use crate::task::Status;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};

    fn request(target: &str, root: &str, status: Option<&str>) -> BatchRequest {
        BatchRequest {
            target_id: target.into(),
            root_id: root.into(),
            status: status.map(String::from),
            additional_instructions: None,
        }
    }

    fn seeded_store_ctx() -> (ServiceContext, MemoryNotifier) {
        let fs = MemFileSystem::new();
        let notifier = MemoryNotifier::new();
        let ctx = ServiceContext::in_memory(fs, notifier.clone());
        (ctx, notifier)
    }

    /// Delegating filesystem that counts reads and writes per path.
    #[derive(Clone, Default)]
    struct CountingFs {
        inner: MemFileSystem,
        reads: Arc<Mutex<HashMap<PathBuf, u32>>>,
        writes: Arc<Mutex<HashMap<PathBuf, u32>>>,
    }

    impl CountingFs {
        fn reads_of(&self, path: &Path) -> u32 {
            *self.reads.lock().unwrap().get(path).unwrap_or(&0)
        }
        fn writes_of(&self, path: &Path) -> u32 {
            *self.writes.lock().unwrap().get(path).unwrap_or(&0)
        }
    }

    impl FileSystem for CountingFs {
        fn read_to_string(
            &self,
            path: &Path,
        ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
            *self.reads.lock().unwrap().entry(path.to_path_buf()).or_insert(0) += 1;
            self.inner.read_to_string(path)
        }
        fn write(
            &self,
            path: &Path,
            contents: &str,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            *self.writes.lock().unwrap().entry(path.to_path_buf()).or_insert(0) += 1;
            self.inner.write(path, contents)
        }
        fn exists(&self, path: &Path) -> bool {
            self.inner.exists(path)
        }
        fn list_dir(
            &self,
            path: &Path,
        ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
            self.inner.list_dir(path)
        }
        fn remove_dir_all(
            &self,
            path: &Path,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            self.inner.remove_dir_all(path)
        }
    }

    #[test]
    fn rejects_empty_batch() {
        let (ctx, _n) = seeded_store_ctx();
        let store = TaskStore::new(&ctx, Path::new("/store"));
        let err = run(&store, &[]).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn rejects_structurally_invalid_requests_without_processing_any() {
        let (ctx, notifier) = seeded_store_ctx();
        let store = TaskStore::new(&ctx, Path::new("/store"));
        store.init("proj-x", "g", "a").unwrap();
        store.append_child("proj-x", "proj-x", "step-1", "g", "a").unwrap();
        let created = notifier.events().len();

        // Second request is bad; the valid first one must not run.
        let bad_id = [
            request("step-1", "proj-x", Some("done")),
            request("Bad-Id", "proj-x", Some("done")),
        ];
        assert!(matches!(run(&store, &bad_id), Err(Error::Validation(_))));

        let legacy = [request("step-1", "proj-x", Some("pending"))];
        let err = run(&store, &legacy).unwrap_err();
        assert!(err.to_string().contains("legacy"));

        let no_fields = [request("step-1", "proj-x", None)];
        let err = run(&store, &no_fields).unwrap_err();
        assert!(err.to_string().contains("at least one"));

        assert_eq!(store.load("proj-x").unwrap().tasks[0].status, Status::Init);
        assert_eq!(notifier.events().len(), created);
    }

    #[test]
    fn one_load_one_save_per_root_with_partial_failures() {
        let fs = CountingFs::default();
        let notifier = MemoryNotifier::new();
        let ctx = ServiceContext::in_memory(MemFileSystem::new(), notifier.clone());
        let ctx = ServiceContext { fs: Box::new(fs.clone()), ..ctx };
        let store = TaskStore::new(&ctx, Path::new("/store"));

        store.init("proj-x", "g", "a").unwrap();
        store.append_child("proj-x", "proj-x", "step-1", "g", "a").unwrap();
        store.append_child("proj-x", "proj-x", "step-2", "g", "a").unwrap();
        let path = Path::new("/store").join("proj-x").join("task.yaml");
        let (reads_before, writes_before) = (fs.reads_of(&path), fs.writes_of(&path));

        let requests = [
            request("step-1", "proj-x", Some("accept")),
            request("ghost", "proj-x", Some("done")),
            request("step-2", "proj-x", Some("hold")),
        ];
        let response = run(&store, &requests).unwrap();

        assert!(response.success);
        assert_eq!(response.results.len(), 3);
        assert!(response.results[0].success);
        assert!(!response.results[1].success);
        assert_eq!(response.results[1].error.as_deref(), Some("target not found: ghost"));
        assert!(response.results[2].success);

        // Exactly one load and one save for the whole group.
        assert_eq!(fs.reads_of(&path) - reads_before, 1);
        assert_eq!(fs.writes_of(&path) - writes_before, 1);

        // The saved tree reflects both successful merges together.
        let tree = store.load("proj-x").unwrap();
        assert_eq!(tree.tasks[0].status, Status::Accept);
        assert_eq!(tree.tasks[1].status, Status::Hold);
        assert_eq!(notifier.events().last().unwrap().action, TreeAction::Updated);
    }

    #[test]
    fn missing_root_fails_its_group_but_not_others() {
        let (ctx, _n) = seeded_store_ctx();
        let store = TaskStore::new(&ctx, Path::new("/store"));
        store.init("proj-x", "g", "a").unwrap();
        store.append_child("proj-x", "proj-x", "step-1", "g", "a").unwrap();

        let requests = [
            request("anything", "missing-root", Some("done")),
            request("step-1", "proj-x", Some("done")),
            request("other", "missing-root", Some("hold")),
        ];
        let response = run(&store, &requests).unwrap();

        assert!(response.success);
        assert_eq!(response.results[0].error.as_deref(), Some("root not found: missing-root"));
        assert!(response.results[1].success);
        assert_eq!(response.results[2].error.as_deref(), Some("root not found: missing-root"));
        assert_eq!(store.load("proj-x").unwrap().tasks[0].status, Status::Done);
    }

    #[test]
    fn later_requests_overwrite_earlier_fields_on_the_same_node() {
        let (ctx, _n) = seeded_store_ctx();
        let store = TaskStore::new(&ctx, Path::new("/store"));
        store.init("proj-x", "g", "a").unwrap();
        store.append_child("proj-x", "proj-x", "step-1", "g", "a").unwrap();

        let mut first = request("step-1", "proj-x", Some("accept"));
        first.additional_instructions = Some("keep me".into());
        let second = request("step-1", "proj-x", Some("in-progress"));

        let response = run(&store, &[first, second]).unwrap();
        assert!(response.results.iter().all(|r| r.success));

        let tree = store.load("proj-x").unwrap();
        assert_eq!(tree.tasks[0].status, Status::InProgress);
        // The instruction from the first request survives; the second
        // request did not carry that field.
        assert_eq!(tree.tasks[0].additional_instructions.as_deref(), Some("keep me"));
    }

    #[test]
    fn corrupt_root_fails_group_with_underlying_message() {
        let fs = MemFileSystem::new();
        let notifier = MemoryNotifier::new();
        let ctx = ServiceContext::in_memory(fs.clone(), notifier);
        let store = TaskStore::new(&ctx, Path::new("/store"));
        fs.put(Path::new("/store").join("bad").join("task.yaml"), "goal: [unclosed");

        let response = run(&store, &[request("x", "bad", Some("done"))]).unwrap();
        assert!(!response.results[0].success);
        assert!(response.results[0].error.as_deref().unwrap().contains("corrupt"));
    }

    #[test]
    fn groups_with_no_applied_updates_are_not_saved() {
        let fs = CountingFs::default();
        let ctx = ServiceContext::in_memory(MemFileSystem::new(), MemoryNotifier::new());
        let ctx = ServiceContext { fs: Box::new(fs.clone()), ..ctx };
        let store = TaskStore::new(&ctx, Path::new("/store"));
        store.init("proj-x", "g", "a").unwrap();
        let path = Path::new("/store").join("proj-x").join("task.yaml");
        let writes_before = fs.writes_of(&path);

        let response = run(&store, &[request("ghost", "proj-x", Some("done"))]).unwrap();
        assert!(!response.results[0].success);
        assert_eq!(fs.writes_of(&path), writes_before);
    }

    #[test]
    fn scenario_init_append_batch() {
        let (ctx, _n) = seeded_store_ctx();
        let store = TaskStore::new(&ctx, Path::new("/store"));

        let root = store.init("proj-x", "G", "A").unwrap();
        assert_eq!(root.status, Status::Init);
        assert!(root.tasks.is_empty());

        let tree = store.append_child("proj-x", "proj-x", "step-1", "g", "a").unwrap();
        assert_eq!(tree.tasks.len(), 1);
        assert_eq!(tree.tasks[0].status, Status::Init);

        let requests = [
            request("step-1", "proj-x", Some("done")),
            request("ghost", "proj-x", Some("done")),
        ];
        let response = run(&store, &requests).unwrap();
        assert_eq!(response.results.len(), 2);
        assert!(response.results[0].success);
        assert_eq!(response.results[1].error.as_deref(), Some("target not found: ghost"));

        let reloaded = store.load("proj-x").unwrap();
        assert_eq!(reloaded.tasks.len(), 1);
        assert_eq!(reloaded.tasks[0].status, Status::Done);
    }
}
