#![deny(unsafe_code)]

pub mod error;
pub mod loader;
pub mod table;

pub use crate::error::StandardsError;
pub use crate::loader::{load_mutation_table, read_mutation_table};
pub use crate::table::{MutationTherapy, MutationTherapyTable, canonical_mutation_id};
