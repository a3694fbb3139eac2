//! Engine error types.
//!
//! Validation failures always name the offending field by its dotted path so
//! the presentation layer can point the user at the input to fix.

use thiserror::Error;

/// A malformed, out-of-range or unknown input field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    /// Dotted path of the field (e.g. `tumor.size_cm`, `mutations[1]`).
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn missing(field: &str) -> Self {
        Self::new(field, "field is required")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A mutation identifier absent from the mutation therapy table.
    #[error("invalid {field}: unknown mutation {mutation:?}")]
    UnknownMutation { field: String, mutation: String },

    /// The rule evaluator produced no lines; indicates a gap in the rule table.
    #[error("rule evaluation produced no recommendation lines")]
    EmptyRecommendation,
}

impl EngineError {
    /// The offending input field, for errors the caller can correct.
    pub fn field(&self) -> Option<&str> {
        match self {
            EngineError::Validation(err) => Some(&err.field),
            EngineError::UnknownMutation { field, .. } => Some(field),
            EngineError::EmptyRecommendation => None,
        }
    }

    /// True for input problems; false for internal invariant violations.
    pub fn is_validation(&self) -> bool {
        !matches!(self, EngineError::EmptyRecommendation)
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
