//! File-backed token store.
//!
//! The token lives in a single plain-text file under the data directory.
//! Writes go through a temp file renamed into place, so a crash mid-write
//! never leaves a truncated token behind.

use crate::domain::error::{ConsoleError, Result};
use crate::storage::backend::TokenStore;
use std::fs;
use std::path::PathBuf;

/// Token store rooted at a concrete file path.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store for the given file. The parent directory is created
    /// on the first save.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ConsoleError::Storage(format!(
                "failed to read token file {}: {e}",
                self.path.display()
            ))),
        }
    }

    fn save(&mut self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConsoleError::Storage(format!(
                    "failed to create directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let temp = self.path.with_extension("tmp");
        fs::write(&temp, token).map_err(|e| {
            ConsoleError::Storage(format!("failed to write {}: {e}", temp.display()))
        })?;
        fs::rename(&temp, &self.path).map_err(|e| {
            ConsoleError::Storage(format!(
                "failed to move token into place at {}: {e}",
                self.path.display()
            ))
        })?;

        tracing::debug!(path = %self.path.display(), "token saved");
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ConsoleError::Storage(format!(
                "failed to remove token file {}: {e}",
                self.path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_token() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileTokenStore::new(dir.path().join("token"));

        assert_eq!(store.load().unwrap(), None);
        store.save("abc123").unwrap();
        assert_eq!(store.load().unwrap(), Some("abc123".to_string()));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        // Clearing twice is fine.
        store.clear().unwrap();
    }

    #[test]
    fn whitespace_only_files_count_as_no_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        fs::write(&path, "  \n").unwrap();

        let store = FileTokenStore::new(path);
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileTokenStore::new(dir.path().join("nested/deeper/token"));
        store.save("t").unwrap();
        assert_eq!(store.load().unwrap(), Some("t".to_string()));
    }
}
