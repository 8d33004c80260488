//! Persisted credentials.
//!
//! The token file holds `{access_token, refresh_token, expires_at}` as JSON.
//! It is readable by the owning user only, and is replaced by rename so a
//! reader never sees a partially written record.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::api::TokenGrant;

#[derive(Error, Debug)]
pub enum TokenStoreError {
    #[error("No saved tokens at {}", .0.display())]
    NotFound(PathBuf),

    #[error("Token file {} is corrupt", path.display())]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to access token file {}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("Failed to encode tokens")]
    Encode(#[source] serde_json::Error),
}

/// Access and refresh tokens issued together, with the access token's
/// absolute expiry as a Unix timestamp in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tokens {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
}

impl Tokens {
    /// Build a record from a server grant received at `now`
    pub fn from_grant(grant: TokenGrant, now: i64) -> Self {
        Self {
            access_token: grant.access_token,
            refresh_token: grant.refresh_token,
            expires_at: now.saturating_add(grant.expires_in),
        }
    }

    /// The access token is unusable from its expiry second onwards
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.expires_at
    }
}

/// Reads and writes the token file
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load tokens from disk
    pub fn load(&self) -> Result<Tokens, TokenStoreError> {
        let contents = fs::read(&self.path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                TokenStoreError::NotFound(self.path.clone())
            } else {
                self.io_error(e)
            }
        })?;

        serde_json::from_slice(&contents).map_err(|source| TokenStoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Save tokens to disk, replacing any existing record
    pub fn save(&self, tokens: &Tokens) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            create_private_dir(parent).map_err(|e| self.io_error(e))?;
        }

        let contents = serde_json::to_vec_pretty(tokens).map_err(TokenStoreError::Encode)?;

        let tmp_path = self.temp_path();
        write_private_file(&tmp_path, &contents).map_err(|e| self.io_error(e))?;
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(self.io_error(e));
        }

        debug!(path = %self.path.display(), expires_at = tokens.expires_at, "Saved tokens");
        Ok(())
    }

    /// Sibling file used to stage writes before the rename
    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "tokens.json".to_string());
        self.path.with_file_name(format!(".{}.tmp", name))
    }

    fn io_error(&self, source: io::Error) -> TokenStoreError {
        TokenStoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> io::Result<()> {
    use std::os::unix::fs::{DirBuilderExt, PermissionsExt};

    fs::DirBuilder::new().recursive(true).mode(0o700).create(dir)?;

    // An existing directory keeps its old mode. Shared sticky directories
    // such as /tmp are left alone.
    let mode = fs::metadata(dir)?.permissions().mode();
    if mode & 0o077 != 0 && mode & 0o1000 == 0 {
        fs::set_permissions(dir, fs::Permissions::from_mode(0o700))?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)
}

#[cfg(unix)]
fn write_private_file(path: &Path, contents: &[u8]) -> io::Result<()> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // A stale staging file keeps its old mode
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    file.write_all(contents)?;
    file.sync_all()
}

#[cfg(not(unix))]
fn write_private_file(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(contents)?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Tokens {
        Tokens {
            access_token: "access_abc".to_string(),
            refresh_token: "refresh_xyz".to_string(),
            expires_at: 1_700_000_000,
        }
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("tokens.json"));

        store.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap(), sample());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("nonexistent").join("tokens.json"));

        assert!(matches!(store.load(), Err(TokenStoreError::NotFound(_))));
    }

    #[test]
    fn test_load_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        let store = TokenStore::new(&path);

        fs::write(&path, "not json at all").unwrap();
        assert!(matches!(store.load(), Err(TokenStoreError::Corrupt { .. })));

        // A record missing a field is as unusable as garbage
        fs::write(&path, r#"{"access_token":"a","expires_at":5}"#).unwrap();
        assert!(matches!(store.load(), Err(TokenStoreError::Corrupt { .. })));
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("tokens.json"));

        let first = Tokens {
            access_token: "old".into(),
            refresh_token: "old_refresh".into(),
            expires_at: 1,
        };
        let second = Tokens {
            access_token: "new".into(),
            refresh_token: "new_refresh".into(),
            expires_at: 2,
        };
        store.save(&first).unwrap();
        store.save(&second).unwrap();

        assert_eq!(store.load().unwrap(), second);
        assert!(!store.temp_path().exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_save_restricts_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        let path = nested.join("tokens.json");
        let store = TokenStore::new(&path);

        store.save(&sample()).unwrap();

        let file_mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(file_mode, 0o600);
        let dir_mode = fs::metadata(&nested).unwrap().permissions().mode() & 0o777;
        assert_eq!(dir_mode, 0o700);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_tightens_existing_directory() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("existing");
        fs::create_dir(&existing).unwrap();
        fs::set_permissions(&existing, fs::Permissions::from_mode(0o755)).unwrap();

        TokenStore::new(existing.join("tokens.json"))
            .save(&sample())
            .unwrap();

        let dir_mode = fs::metadata(&existing).unwrap().permissions().mode() & 0o777;
        assert_eq!(dir_mode, 0o700);
    }

    #[test]
    fn test_from_grant_and_expiry() {
        let grant = TokenGrant {
            access_token: "x".into(),
            refresh_token: "y".into(),
            expires_in: 3600,
        };
        let tokens = Tokens::from_grant(grant, 1_000);
        assert_eq!(tokens.expires_at, 4_600);
        assert!(!tokens.is_expired_at(4_599));
        assert!(tokens.is_expired_at(4_600));
    }
}
