//! Task lifecycle status values.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a task node.
///
/// `Pending` is a legacy value accepted only when reading persisted trees;
/// every load rewrites it to `Init` before the tree reaches callers, and
/// [`Status::parse_input`] rejects it at client boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    /// Freshly created, not yet triaged.
    Init,
    /// Accepted for implementation.
    Accept,
    /// Being worked on.
    InProgress,
    /// Completed and verified.
    Done,
    /// Marked for deletion.
    Delete,
    /// Parked.
    Hold,
    /// Broken down into child tasks.
    Split,
    /// Legacy spelling of `Init`; read-side only.
    Pending,
}

/// The seven statuses a client may submit (excludes legacy `pending`).
pub const INPUT_STATUSES: [Status; 7] = [
    Status::Init,
    Status::Accept,
    Status::InProgress,
    Status::Done,
    Status::Delete,
    Status::Hold,
    Status::Split,
];

impl Status {
    /// The wire spelling of this status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Init => "init",
            Status::Accept => "accept",
            Status::InProgress => "in-progress",
            Status::Done => "done",
            Status::Delete => "delete",
            Status::Hold => "hold",
            Status::Split => "split",
            Status::Pending => "pending",
        }
    }

    /// Parses a client-supplied status string.
    ///
    /// # Errors
    ///
    /// Returns a message naming the offending value when it is not one of
    /// the seven current statuses. The legacy `pending` gets a dedicated
    /// message since it is still valid in persisted trees.
    pub fn parse_input(s: &str) -> Result<Status, String> {
        for status in INPUT_STATUSES {
            if s == status.as_str() {
                return Ok(status);
            }
        }
        if s == "pending" {
            return Err("status 'pending' is a legacy value; use 'init'".to_string());
        }
        Err(format!(
            "unknown status '{s}' (expected one of: init, accept, in-progress, done, delete, hold, split)"
        ))
    }

    /// The recommended next statuses from this one.
    ///
    /// Advisory only: nothing in the update path enforces this table.
    /// `done` and `delete` are terminal; legacy `pending` follows `init`
    /// since that is what it migrates to.
    #[must_use]
    pub fn recommended_next(self) -> &'static [Status] {
        match self {
            Status::Init | Status::Pending => {
                &[Status::Accept, Status::Delete, Status::Hold, Status::Split]
            }
            Status::Accept => &[Status::InProgress, Status::Hold],
            Status::InProgress => &[Status::Done, Status::Hold],
            Status::Hold => &[Status::Init, Status::Accept],
            Status::Split => &[Status::Init],
            Status::Done | Status::Delete => &[],
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns a warning when a status change strays from the recommended
/// transition table, or `None` when the change follows it (or is a no-op).
#[must_use]
pub fn transition_warning(from: Status, to: Status) -> Option<String> {
    if from == to || from.recommended_next().contains(&to) {
        return None;
    }
    let detail = if from.recommended_next().is_empty() {
        format!("'{from}' is terminal")
    } else {
        let next: Vec<&str> = from.recommended_next().iter().map(|s| s.as_str()).collect();
        format!("expected one of: {}", next.join(", "))
    };
    Some(format!("'{from}' -> '{to}' is outside the recommended transitions ({detail})"))
}
