//! Persisted storage for the single bearer token.
//!
//! The store is a key-value file holding the token under the well-known key
//! `token`. There is no client-side expiry: a token stays until logout or
//! until the backend answers 401.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crm_core::AccessToken;
use thiserror::Error;

/// Key under which the token is persisted.
pub const TOKEN_KEY: &str = "token";

/// Errors that can occur when reading or writing stored credentials.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the credentials file failed.
    #[error("credential store I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The credentials file is not a JSON object of strings.
    #[error("credential store at {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A thread panicked while holding the in-memory store.
    #[error("credential store lock poisoned")]
    Poisoned,
}

/// Storage for at most one active bearer token.
pub trait CredentialStore: Send + Sync {
    /// Get the stored token, if any.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing storage cannot be read.
    fn get(&self) -> Result<Option<AccessToken>, StoreError>;

    /// Replace the stored token.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing storage cannot be written.
    fn set(&self, token: &AccessToken) -> Result<(), StoreError>;

    /// Remove the stored token. Clearing an empty store succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing storage cannot be written.
    fn clear(&self) -> Result<(), StoreError>;
}

/// File-backed credential store surviving process restarts.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Create a store persisting to `path`. The file is created lazily.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the credentials file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Entries to rewrite, or `None` when the file is corrupt and must be
    /// replaced wholesale.
    fn writable_entries(&self) -> Result<Option<BTreeMap<String, String>>, StoreError> {
        match self.read_entries() {
            Ok(entries) => Ok(Some(entries)),
            Err(StoreError::Corrupt { source, .. }) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %source,
                    "Discarding corrupt credential store"
                );
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn remove_file(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let body = serde_json::to_vec_pretty(entries).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        // Write to a sibling file first so a crash never leaves half a token
        let tmp_path = self.path.with_extension("tmp");
        let mut file = open_private(&tmp_path).map_err(|e| self.io_error(e))?;
        file.write_all(&body).map_err(|e| self.io_error(e))?;
        file.sync_all().map_err(|e| self.io_error(e))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| self.io_error(e))
    }
}

#[cfg(unix)]
fn open_private(path: &Path) -> io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;

    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> io::Result<fs::File> {
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

impl CredentialStore for FileCredentialStore {
    fn get(&self) -> Result<Option<AccessToken>, StoreError> {
        Ok(self
            .read_entries()?
            .remove(TOKEN_KEY)
            .filter(|token| !token.is_empty())
            .map(AccessToken::new))
    }

    fn set(&self, token: &AccessToken) -> Result<(), StoreError> {
        let mut entries = self.writable_entries()?.unwrap_or_default();
        entries.insert(TOKEN_KEY.to_owned(), token.expose().to_owned());
        self.write_entries(&entries)?;
        tracing::debug!(path = %self.path.display(), "Stored access token");
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let Some(mut entries) = self.writable_entries()? else {
            return self.remove_file();
        };
        if entries.remove(TOKEN_KEY).is_none() {
            return Ok(());
        }

        if entries.is_empty() {
            self.remove_file()?;
        } else {
            self.write_entries(&entries)?;
        }
        tracing::debug!(path = %self.path.display(), "Cleared access token");
        Ok(())
    }
}

/// In-process credential store.
///
/// Used for tests and for sessions that should not touch the disk.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    token: RwLock<Option<AccessToken>>,
}

impl MemoryCredentialStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `token`.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(AccessToken::new(token))),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self) -> Result<Option<AccessToken>, StoreError> {
        self.token
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| StoreError::Poisoned)
    }

    fn set(&self, token: &AccessToken) -> Result<(), StoreError> {
        let mut guard = self.token.write().map_err(|_| StoreError::Poisoned)?;
        *guard = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut guard = self.token.write().map_err(|_| StoreError::Poisoned)?;
        *guard = None;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("nested").join("credentials.json"));

        assert!(store.get().unwrap().is_none());

        store.set(&AccessToken::new("tok-1")).unwrap();
        assert_eq!(store.get().unwrap(), Some(AccessToken::new("tok-1")));

        store.set(&AccessToken::new("tok-2")).unwrap();
        assert_eq!(store.get().unwrap(), Some(AccessToken::new("tok-2")));
    }

    #[test]
    fn test_file_store_uses_well_known_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        let store = FileCredentialStore::new(&path);
        store.set(&AccessToken::new("abc")).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw[TOKEN_KEY], "abc");
    }

    #[test]
    fn test_file_store_clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        let store = FileCredentialStore::new(&path);
        store.set(&AccessToken::new("abc")).unwrap();

        store.clear().unwrap();
        assert!(!path.exists());
        assert!(store.get().unwrap().is_none());

        // Clearing again is not an error
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_clear_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(&path, r#"{"token": "abc", "theme": "dark"}"#).unwrap();
        let store = FileCredentialStore::new(&path);

        store.clear().unwrap();
        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(raw.get(TOKEN_KEY).is_none());
        assert_eq!(raw["theme"], "dark");
    }

    #[test]
    fn test_file_store_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(&path, "not json").unwrap();

        let err = FileCredentialStore::new(&path).get().unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[test]
    fn test_file_store_clear_removes_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(&path, r#"{"token": "abc", "n": 1}"#).unwrap();
        let store = FileCredentialStore::new(&path);

        store.clear().unwrap();
        assert!(!path.exists());
        assert!(store.get().unwrap().is_none());
    }

    #[test]
    fn test_file_store_set_replaces_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(&path, "not json").unwrap();
        let store = FileCredentialStore::new(&path);

        store.set(&AccessToken::new("fresh")).unwrap();
        assert_eq!(store.get().unwrap(), Some(AccessToken::new("fresh")));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryCredentialStore::with_token("abc");
        assert_eq!(store.get().unwrap(), Some(AccessToken::new("abc")));
        store.clear().unwrap();
        assert!(store.get().unwrap().is_none());
        store.set(&AccessToken::new("def")).unwrap();
        assert_eq!(store.get().unwrap(), Some(AccessToken::new("def")));
    }
}
