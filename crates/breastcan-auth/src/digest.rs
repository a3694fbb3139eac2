use sha2::{Digest, Sha256};

/// SHA-256 of `username:password`, hex encoded. Equal passwords under
/// different usernames give different digests.
pub fn password_digest(username: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(username.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}
