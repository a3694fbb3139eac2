//! Authentication and credential-store errors.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("failed to {operation} credential file {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("credential file {path} is not a JSON object of user digests: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize credentials: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("failed to replace credential file {target_path}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{field} must not be blank")]
    BlankCredential { field: &'static str },

    #[error("user {username:?} already exists")]
    UserExists { username: String },

    #[error("invalid username or password")]
    InvalidCredentials,
}

impl AuthError {
    pub(crate) fn io(operation: &'static str, path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.to_path_buf(),
            source,
        }
    }

    /// User-facing message for the login and sign-up screens.
    pub fn user_message(&self) -> String {
        match self {
            Self::BlankCredential { .. } => "Please enter both username and password.".to_string(),
            Self::UserExists { .. } => "Username already exists.".to_string(),
            Self::InvalidCredentials => "Invalid username or password.".to_string(),
            other => format!("Credential storage failed: {other}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
