//! In-memory adapters for tests and embedders.
//!
//! Each type is cloneable and shares its backing state across clones, so a
//! test can keep a handle after boxing one clone into a `ServiceContext`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};

use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::notifier::{ChangeNotifier, TreeEvent};

/// In-memory filesystem keyed by full path.
#[derive(Clone, Default)]
pub struct MemFileSystem {
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
}

impl MemFileSystem {
    /// Creates an empty in-memory filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct access to a stored file, bypassing the port.
    #[must_use]
    pub fn get(&self, path: &Path) -> Option<String> {
        self.files.lock().unwrap().get(path).cloned()
    }

    /// Replaces a stored file directly, bypassing the port.
    pub fn put(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files.lock().unwrap().insert(path.into(), contents.into());
    }
}

impl FileSystem for MemFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| format!("File not found: {}", path.display()).into())
    }

    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.files.lock().unwrap().insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let files = self.files.lock().unwrap();
        // Exact file, or a directory implied by a file underneath it.
        files.contains_key(path) || files.keys().any(|k| k.starts_with(path) && k != path)
    }

    fn list_dir(
        &self,
        path: &Path,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        let files = self.files.lock().unwrap();
        let mut names: Vec<String> = files
            .keys()
            .filter_map(|k| {
                let rest = k.strip_prefix(path).ok()?;
                let first = rest.components().next()?;
                Some(first.as_os_str().to_string_lossy().into_owned())
            })
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    fn remove_dir_all(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.files.lock().unwrap().retain(|k, _| !k.starts_with(path));
        Ok(())
    }
}

/// Clock pinned to a fixed instant.
#[derive(Clone)]
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        FixedClock(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Notifier that records every event it receives.
#[derive(Clone, Default)]
pub struct MemoryNotifier {
    events: Arc<Mutex<Vec<TreeEvent>>>,
}

impl MemoryNotifier {
    /// Creates an empty recording notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<TreeEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ChangeNotifier for MemoryNotifier {
    fn tree_saved(&self, event: &TreeEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::MemFileSystem;
    use crate::ports::filesystem::FileSystem;
    use std::path::Path;

    #[test]
    fn clones_share_backing_state() {
        let fs = MemFileSystem::new();
        let handle = fs.clone();
        fs.write(Path::new("/store/r1/task.yaml"), "x").unwrap();
        assert_eq!(handle.get(Path::new("/store/r1/task.yaml")).as_deref(), Some("x"));
    }

    #[test]
    fn list_dir_returns_immediate_children_only() {
        let fs = MemFileSystem::new();
        fs.write(Path::new("/store/r2/task.yaml"), "b").unwrap();
        fs.write(Path::new("/store/r1/task.yaml"), "a").unwrap();
        fs.write(Path::new("/store/r1/notes/extra.yaml"), "c").unwrap();

        let entries = fs.list_dir(Path::new("/store")).unwrap();
        assert_eq!(entries, vec!["r1", "r2"]);
    }

    #[test]
    fn remove_dir_all_drops_the_subtree() {
        let fs = MemFileSystem::new();
        fs.write(Path::new("/store/r1/task.yaml"), "a").unwrap();
        fs.write(Path::new("/store/r2/task.yaml"), "b").unwrap();

        fs.remove_dir_all(Path::new("/store/r1")).unwrap();
        assert!(!fs.exists(Path::new("/store/r1")));
        assert!(fs.exists(Path::new("/store/r2/task.yaml")));
        // Removing again is fine.
        fs.remove_dir_all(Path::new("/store/r1")).unwrap();
    }
}
