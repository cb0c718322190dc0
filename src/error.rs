//! Error taxonomy shared by the store, the boundary operations, and the
//! batch coordinator.
//!
//! Four classes: `Validation` (bad identifier, status, or required field —
//! recoverable, surfaced with the violated rule), `NotFound` (root or node
//! absent), `Corrupt` (persisted payload unparsable), and `Io` (underlying
//! storage failure, carrying the original message). The store never retries
//! internally.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The error classes a store or coordinator operation can fail with.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A client-supplied identifier, status, or field violated a rule.
    /// The message names the offending value and the rule.
    #[error("{0}")]
    Validation(String),
    /// A root aggregate or a node inside one does not exist.
    #[error("{0}")]
    NotFound(String),
    /// A persisted aggregate could not be parsed as a valid task tree.
    #[error("corrupt task tree '{root_id}': {detail}")]
    Corrupt {
        /// The root id whose payload failed to parse.
        root_id: String,
        /// The parser's message.
        detail: String,
    },
    /// The backing store failed; the original message is preserved.
    #[error("{0}")]
    Io(String),
}

impl Error {
    /// Builds a `Validation` error from anything displayable.
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    /// Builds a `NotFound` error from anything displayable.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Error::NotFound(msg.into())
    }

    /// Builds an `Io` error from anything displayable.
    pub fn io(msg: impl Into<String>) -> Self {
        Error::Io(msg.into())
    }
}
