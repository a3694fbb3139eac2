//! Breast-cancer therapy recommendation engine.
//!
//! Data flow: snapshot mapping → [`normalize()`] → [`rules::evaluate_rules`] →
//! [`compose()`] → [`Recommendation`]. Everything here is pure and synchronous;
//! the only shared state is the read-only mutation therapy table.

mod compose;
mod config;
mod engine;
mod error;
mod normalize;
pub mod rules;

pub use compose::{Recommendation, compose};
pub use config::{ConfigError, EngineConfig};
pub use engine::{RecommendationEngine, evaluate};
pub use error::{EngineError, Result, ValidationError};
pub use normalize::{normalize, validate_mutations};
