//! No-op notifier for callers without an event consumer.

use crate::ports::notifier::{ChangeNotifier, TreeEvent};

/// Discards every notification.
pub struct NullNotifier;

impl ChangeNotifier for NullNotifier {
    fn tree_saved(&self, _event: &TreeEvent) {}
}
