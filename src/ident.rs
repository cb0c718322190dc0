//! Identifier validation.
//!
//! Every id crossing a client boundary (root id, parent id, target id, new
//! child id) must pass this check before any tree or storage operation runs.
//! The grammar: 1–100 characters of lowercase ascii letters, digits, and
//! hyphens; no leading, trailing, or doubled hyphen; at most 10
//! hyphen-separated words.

/// Maximum identifier length in characters.
pub const MAX_LENGTH: usize = 100;

/// Maximum number of hyphen-separated words.
pub const MAX_WORDS: usize = 10;

/// The rule an identifier violated. Each variant maps to one grammar rule
/// so callers can surface an actionable message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentError {
    /// The identifier is empty.
    #[error("identifier is empty")]
    Empty,
    /// The identifier exceeds [`MAX_LENGTH`] characters.
    #[error("identifier is {0} characters long (maximum {MAX_LENGTH})")]
    TooLong(usize),
    /// The identifier contains a character outside `[a-z0-9-]`.
    #[error("identifier contains '{0}' (only lowercase letters, digits, and hyphens are allowed)")]
    BadCharacter(char),
    /// A hyphen leads, trails, or doubles up.
    #[error("hyphens must separate words (no leading, trailing, or doubled hyphens)")]
    HyphenPlacement,
    /// More than [`MAX_WORDS`] hyphen-separated words.
    #[error("identifier has {0} hyphen-separated words (maximum {MAX_WORDS})")]
    TooManyWords(usize),
}

/// Checks an identifier against the naming grammar.
///
/// Pure and total: no I/O, never panics.
///
/// # Errors
///
/// Returns the first violated rule, checked in the order: empty, length,
/// character set, hyphen placement, word count.
pub fn validate(id: &str) -> Result<(), IdentError> {
    if id.is_empty() {
        return Err(IdentError::Empty);
    }
    if id.len() > MAX_LENGTH {
        return Err(IdentError::TooLong(id.len()));
    }
    if let Some(bad) =
        id.chars().find(|c| !c.is_ascii_lowercase() && !c.is_ascii_digit() && *c != '-')
    {
        return Err(IdentError::BadCharacter(bad));
    }
    if id.starts_with('-') || id.ends_with('-') || id.contains("--") {
        return Err(IdentError::HyphenPlacement);
    }
    let words = id.split('-').count();
    if words > MAX_WORDS {
        return Err(IdentError::TooManyWords(words));
    }
    Ok(())
}
