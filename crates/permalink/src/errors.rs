//! Error types for permalink resolution

use thiserror::Error;

/// Terminal failures of a resolution call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PermalinkError {
    #[error("URL named '{name}' must be defined in the route registry to resolve a permalink")]
    RouteNotFound { name: String },

    #[error("Could not resolve a valid url for '{name}' and object '{type_name}'")]
    NoResolvableCandidate { name: String, type_name: String },
}

/// The object has no readable attribute for a parameter a candidate requires.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("object has no attribute '{name}'")]
pub struct MissingAttribute {
    pub name: String,
}

/// A candidate refused to generate an address from the supplied values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("supplied parameters {provided:?} do not match declared parameters {expected:?}")]
    ParameterMismatch {
        expected: Vec<String>,
        provided: Vec<String>,
    },

    #[error("value '{value}' does not satisfy the pattern of parameter '{parameter}'")]
    ConstraintViolation { parameter: String, value: String },
}

pub type Result<T> = std::result::Result<T, PermalinkError>;
