//! Filesystem port for file I/O operations.

use std::path::Path;

/// Provides filesystem access for reading and writing task trees.
///
/// Abstracting the filesystem keeps the store testable without touching
/// the real disk.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;

    /// Writes the given contents to a file, creating parent directories as
    /// needed.
    ///
    /// Implementations must make the write atomic from a reader's point of
    /// view: a concurrent read sees either the old contents or the new,
    /// never a torn file. The live adapter writes a temp sibling and
    /// renames it into place.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Returns `true` if the path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Lists the entry names in a directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a directory or cannot be read.
    fn list_dir(
        &self,
        path: &Path,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>>;

    /// Removes a directory and everything under it.
    ///
    /// Removing a path that does not exist is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error only for unexpected I/O failures.
    fn remove_dir_all(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
