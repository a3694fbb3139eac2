//! Clinician accounts and session state.
//!
//! Credentials live behind the [`CredentialStore`] trait so the storage
//! backend can be swapped; [`JsonFileCredentialStore`] keeps them in a JSON
//! file and [`MemoryCredentialStore`] keeps them in memory. A [`Session`] is
//! the authenticated context that carries the last evaluation to the report
//! exporter.

#![deny(unsafe_code)]

mod digest;
mod error;
mod session;
mod store;

pub use digest::password_digest;
pub use error::{AuthError, Result};
pub use session::{EvaluationRecord, Session};
pub use store::{CredentialStore, JsonFileCredentialStore, MemoryCredentialStore, UserDigests};
