//! Credential stores.
//!
//! A store maps usernames to password digests. The JSON file layout is a flat
//! object, `{"alice": "<sha256 hex>", ...}`; a missing file means no users.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::digest::password_digest;
use crate::error::{AuthError, Result};

/// Username to password digest.
pub type UserDigests = BTreeMap<String, String>;

/// Persistent username/password registry.
///
/// Implementors provide `load` and `save`; the remaining methods are built
/// on those two.
pub trait CredentialStore {
    /// Every registered user and their digest.
    fn load(&self) -> Result<UserDigests>;

    /// Replace the stored users with `users`.
    fn save(&mut self, users: &UserDigests) -> Result<()>;

    fn exists(&self, username: &str) -> Result<bool> {
        Ok(self.load()?.contains_key(username.trim()))
    }

    /// Register a new user. Blank fields and existing usernames are rejected.
    fn register(&mut self, username: &str, password: &str) -> Result<()> {
        let username = non_blank("username", username)?.trim();
        non_blank("password", password)?;

        let mut users = self.load()?;
        if users.contains_key(username) {
            warn!(username, "registration rejected: user exists");
            return Err(AuthError::UserExists {
                username: username.to_string(),
            });
        }
        users.insert(username.to_string(), password_digest(username, password));
        self.save(&users)?;
        info!(username, "user registered");
        Ok(())
    }

    /// True when `username` exists and `password` matches its digest.
    fn authenticate(&self, username: &str, password: &str) -> Result<bool> {
        let username = non_blank("username", username)?.trim();
        non_blank("password", password)?;

        let users = self.load()?;
        let matched = users
            .get(username)
            .is_some_and(|digest| *digest == password_digest(username, password));
        debug!(username, matched, "authentication attempt");
        Ok(matched)
    }
}

fn non_blank<'a>(field: &'static str, value: &'a str) -> Result<&'a str> {
    if value.trim().is_empty() {
        Err(AuthError::BlankCredential { field })
    } else {
        Ok(value)
    }
}

/// Users persisted as a JSON object in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileCredentialStore {
    path: PathBuf,
}

impl JsonFileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for JsonFileCredentialStore {
    fn load(&self) -> Result<UserDigests> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "credential file absent; no users");
                return Ok(UserDigests::new());
            }
            Err(err) => return Err(AuthError::io("read", &self.path, err)),
        };
        if contents.trim().is_empty() {
            return Ok(UserDigests::new());
        }
        serde_json::from_str(&contents).map_err(|source| AuthError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&mut self, users: &UserDigests) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(users).map_err(AuthError::Serialization)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|err| AuthError::io("create directory", parent, err))?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let mut file =
            File::create(&temp_path).map_err(|err| AuthError::io("create", &temp_path, err))?;
        file.write_all(&bytes)
            .map_err(|err| AuthError::io("write", &temp_path, err))?;
        file.sync_all()
            .map_err(|err| AuthError::io("sync", &temp_path, err))?;

        fs::rename(&temp_path, &self.path).map_err(|source| AuthError::AtomicWriteFailed {
            temp_path: temp_path.clone(),
            target_path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), users = users.len(), "credential file saved");
        Ok(())
    }
}

/// Store held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    users: UserDigests,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<UserDigests> {
        Ok(self.users.clone())
    }

    fn save(&mut self, users: &UserDigests) -> Result<()> {
        self.users.clone_from(users);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_then_authenticate() {
        let mut store = MemoryCredentialStore::new();
        store.register("alice", "secret").unwrap();

        assert!(store.exists("alice").unwrap());
        assert!(store.authenticate("alice", "secret").unwrap());
        assert!(!store.authenticate("alice", "wrong").unwrap());
        assert!(!store.authenticate("bob", "secret").unwrap());
    }

    #[test]
    fn passwords_are_never_stored_in_clear() {
        let mut store = MemoryCredentialStore::new();
        store.register("alice", "secret").unwrap();

        let users = store.load().unwrap();
        assert_eq!(users["alice"], password_digest("alice", "secret"));
        assert!(!users.values().any(|digest| digest.contains("secret")));
    }

    #[test]
    fn duplicate_username_rejected() {
        let mut store = MemoryCredentialStore::new();
        store.register("alice", "secret").unwrap();

        let err = store.register(" alice ", "other").unwrap_err();
        assert!(matches!(err, AuthError::UserExists { ref username } if username == "alice"));
        assert!(store.authenticate("alice", "secret").unwrap());
    }

    #[test]
    fn blank_fields_rejected() {
        let mut store = MemoryCredentialStore::new();
        assert!(matches!(
            store.register("  ", "secret"),
            Err(AuthError::BlankCredential { field: "username" })
        ));
        assert!(matches!(
            store.register("alice", ""),
            Err(AuthError::BlankCredential { field: "password" })
        ));
        assert!(matches!(
            store.authenticate("", "secret"),
            Err(AuthError::BlankCredential { .. })
        ));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn user_messages() {
        assert_eq!(
            AuthError::InvalidCredentials.user_message(),
            "Invalid username or password."
        );
        assert_eq!(
            AuthError::BlankCredential { field: "username" }.user_message(),
            "Please enter both username and password."
        );
    }
}
