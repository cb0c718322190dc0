//! Port traits for external boundaries.

pub mod clock;
pub mod filesystem;
pub mod notifier;
