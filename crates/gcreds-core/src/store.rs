//! Storage for the application-default-credentials file.
//!
//! The on-disk schema is fixed by the Google client libraries that consume
//! the file; this module reads and writes exactly that shape and nothing
//! else. A missing or unparsable file is an ordinary "no credentials", not
//! an error.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::types::{ClientId, ClientSecret, RefreshToken};

/// Environment variable the Google client libraries read to locate the
/// credential file.
pub const GOOGLE_APPLICATION_CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// Credential material as it appears on disk.
///
/// The `type` tag discriminates credential kinds the Google libraries
/// understand; only user credentials obtained through the interactive flow
/// are produced here. Files with a different tag parse as unknown and read
/// back as `None`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoredCredentials {
    AuthorizedUser {
        client_id: ClientId,
        client_secret: ClientSecret,
        refresh_token: RefreshToken,
    },
}

impl StoredCredentials {
    /// Create a user credential entry.
    pub fn authorized_user(
        client_id: ClientId,
        client_secret: ClientSecret,
        refresh_token: RefreshToken,
    ) -> Self {
        Self::AuthorizedUser {
            client_id,
            client_secret,
            refresh_token,
        }
    }

    /// The stored refresh token.
    pub fn refresh_token(&self) -> &RefreshToken {
        match self {
            Self::AuthorizedUser { refresh_token, .. } => refresh_token,
        }
    }
}

/// Observable state of the credential file, for read-only reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsStatus {
    /// No credential file on disk.
    Absent,
    /// A file exists but does not parse as stored credentials.
    Invalid,
    /// Parsed credentials; the refresh token may still be empty.
    Present { has_refresh_token: bool },
}

/// Reads, writes, and deletes the credential file at a fixed path.
///
/// Writes go through a temp-file-and-rename so a concurrently reading
/// process never observes a half-written file. There is no cross-process
/// locking; the last writer wins.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the credential file, for handing to child processes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read stored credentials, treating every failure as "no credentials".
    pub fn read(&self) -> Option<StoredCredentials> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) => {
                if err.kind() != io::ErrorKind::NotFound {
                    tracing::debug!(
                        path = %self.path.display(), %err,
                        "credential file unreadable"
                    );
                }
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(credentials) => Some(credentials),
            Err(err) => {
                tracing::debug!(
                    path = %self.path.display(), %err,
                    "credential file does not parse"
                );
                None
            }
        }
    }

    /// Write credentials atomically and restrict the file to the owner.
    pub fn write(&self, credentials: &StoredCredentials) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| AuthError::store(&self.path, e))?;
        }

        let content = serde_json::to_string_pretty(credentials)
            .map_err(|e| AuthError::store(&self.path, e))?;

        // Drop any temp left behind by an interrupted write; the fresh file
        // is owner-only from creation, before the first byte lands.
        let temp_path = self.path.with_extension("tmp");
        if let Err(err) = fs::remove_file(&temp_path) {
            if err.kind() != io::ErrorKind::NotFound {
                return Err(AuthError::store(&self.path, err));
            }
        }

        let mut file =
            create_owner_only(&temp_path).map_err(|e| AuthError::store(&self.path, e))?;
        file.write_all(content.as_bytes())
            .map_err(|e| AuthError::store(&self.path, e))?;
        file.sync_all().map_err(|e| AuthError::store(&self.path, e))?;

        fs::rename(&temp_path, &self.path).map_err(|e| AuthError::store(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), "credentials written");
        Ok(())
    }

    /// Delete the credential file. Succeeds when the file is already gone.
    pub fn delete(&self) -> Result<(), AuthError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "credential file removed");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(AuthError::store(&self.path, err)),
        }
    }

    /// Report the state of the credential file without touching the network.
    pub fn status(&self) -> CredentialsStatus {
        if !self.path.exists() {
            return CredentialsStatus::Absent;
        }
        match self.read() {
            Some(credentials) => CredentialsStatus::Present {
                has_refresh_token: !credentials.refresh_token().as_str().is_empty(),
            },
            None => CredentialsStatus::Invalid,
        }
    }
}

/// Create the file readable and writable by the owner only.
#[cfg(unix)]
fn create_owner_only(path: &Path) -> io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;

    fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn create_owner_only(path: &Path) -> io::Result<fs::File> {
    fs::File::create(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_credentials() -> StoredCredentials {
        StoredCredentials::authorized_user(
            ClientId::new("client-1"),
            ClientSecret::new("secret-1"),
            RefreshToken::new("refresh-1"),
        )
    }

    fn store_in(dir: &TempDir) -> CredentialStore {
        CredentialStore::new(dir.path().join("adc.json"))
    }

    #[test]
    fn test_write_then_read_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.write(&sample_credentials()).unwrap();
        let read_back = store.read().unwrap();

        assert_eq!(read_back, sample_credentials());
        assert_eq!(read_back.refresh_token().as_str(), "refresh-1");
    }

    #[test]
    fn test_written_file_uses_the_fixed_schema() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.write(&sample_credentials()).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();

        assert_eq!(value["type"], "authorized_user");
        assert_eq!(value["client_id"], "client-1");
        assert_eq!(value["client_secret"], "secret-1");
        assert_eq!(value["refresh_token"], "refresh-1");
    }

    #[test]
    fn test_missing_file_reads_as_none() {
        let dir = TempDir::new().unwrap();
        assert_eq!(store_in(&dir).read(), None);
    }

    #[test]
    fn test_corrupt_file_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "{ this is not json").unwrap();

        assert_eq!(store.read(), None);
    }

    #[test]
    fn test_unknown_credential_type_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            r#"{"type": "service_account", "project_id": "p"}"#,
        )
        .unwrap();

        assert_eq!(store.read(), None);
    }

    #[test]
    fn test_write_leaves_no_temp_file_behind() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.write(&sample_credentials()).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("adc.json")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_restricts_file_to_owner() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.write(&sample_credentials()).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_replaces_stale_temp_without_inheriting_its_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        // Leftover from an interrupted write, wider than the store allows
        let temp_path = dir.path().join("adc.tmp");
        fs::write(&temp_path, "stale").unwrap();
        fs::set_permissions(&temp_path, fs::Permissions::from_mode(0o644)).unwrap();

        store.write(&sample_credentials()).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.read().unwrap(), sample_credentials());
    }

    #[test]
    fn test_write_creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = CredentialStore::new(dir.path().join("nested/dirs/adc.json"));

        store.write(&sample_credentials()).unwrap();
        assert!(store.read().is_some());
    }

    #[test]
    fn test_delete_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.write(&sample_credentials()).unwrap();
        store.delete().unwrap();
        assert_eq!(store.read(), None);

        // Second delete finds nothing and still succeeds
        store.delete().unwrap();
    }

    #[test]
    fn test_status_reflects_file_states() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.status(), CredentialsStatus::Absent);

        store.write(&sample_credentials()).unwrap();
        assert_eq!(
            store.status(),
            CredentialsStatus::Present {
                has_refresh_token: true
            }
        );

        store
            .write(&StoredCredentials::authorized_user(
                ClientId::new("client-1"),
                ClientSecret::new("secret-1"),
                RefreshToken::new(""),
            ))
            .unwrap();
        assert_eq!(
            store.status(),
            CredentialsStatus::Present {
                has_refresh_token: false
            }
        );

        fs::write(store.path(), "garbage").unwrap();
        assert_eq!(store.status(), CredentialsStatus::Invalid);
    }
}
