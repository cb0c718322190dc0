//! Live adapters backed by the real disk and wall clock.

pub mod clock;
pub mod filesystem;
pub mod notifier;

pub use clock::LiveClock;
pub use filesystem::LiveFileSystem;
pub use notifier::NullNotifier;
