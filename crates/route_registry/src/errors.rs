//! Error types for the route registry

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Invalid route pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Duplicate parameter '{parameter}' in route pattern '{pattern}'")]
    DuplicateParameter { pattern: String, parameter: String },

    #[error("Route name must not be empty")]
    EmptyRouteName,

    #[error("Invalid route configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to read route configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse route configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, RegistryError>;
