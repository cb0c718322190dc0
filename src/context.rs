//! Service context bundling all port trait objects.

use crate::adapters::live::{LiveClock, LiveFileSystem, NullNotifier};
use crate::adapters::memory::{FixedClock, MemFileSystem, MemoryNotifier};
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::notifier::ChangeNotifier;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors wire
/// up different adapter implementations (live disk, in-memory).
pub struct ServiceContext {
    /// Clock for change-event timestamps.
    pub clock: Box<dyn Clock>,
    /// Filesystem backing the task store.
    pub fs: Box<dyn FileSystem>,
    /// Observer of persisted tree changes.
    pub notifier: Box<dyn ChangeNotifier>,
}

impl ServiceContext {
    /// Creates a live context: real disk, wall clock, no-op notifier.
    #[must_use]
    pub fn live() -> Self {
        ServiceContext {
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            notifier: Box::new(NullNotifier),
        }
    }

    /// Creates a fully in-memory context with a fixed clock and a
    /// recording notifier. Clone the adapters before calling this when a
    /// test needs handles to inspect them afterwards.
    #[must_use]
    pub fn in_memory(fs: MemFileSystem, notifier: MemoryNotifier) -> Self {
        ServiceContext {
            clock: Box::new(FixedClock::default()),
            fs: Box::new(fs),
            notifier: Box::new(notifier),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ServiceContext;
    use crate::adapters::memory::{MemFileSystem, MemoryNotifier};
    use std::path::Path;

    #[test]
    fn in_memory_context_shares_state_with_handles() {
        let fs = MemFileSystem::new();
        let notifier = MemoryNotifier::new();
        let ctx = ServiceContext::in_memory(fs.clone(), notifier.clone());

        ctx.fs.write(Path::new("/x/y"), "hello").unwrap();
        assert_eq!(fs.get(Path::new("/x/y")).as_deref(), Some("hello"));
        assert!(notifier.events().is_empty());
    }
}
