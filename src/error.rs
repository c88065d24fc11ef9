//! Error types for the planet simulation
//!
//! The physics core has no I/O, so almost every variant describes a
//! degenerate initial configuration rejected before the first step

use thiserror::Error;

/// Result alias used across the crate
pub type SimResult<T> = Result<T, SimError>;

#[derive(Debug, Error)]
pub enum SimError {
    /// No body is marked as the fixed anchor
    #[error("scenario has no fixed anchor body")]
    NoAnchor,

    /// More than one body is marked as fixed
    #[error("scenario has {0} fixed bodies, expected exactly one")]
    MultipleAnchors(usize),

    #[error("body '{name}' has non-positive mass {mass}")]
    NonPositiveMass { name: String, mass: f64 },

    #[error("body '{name}' has non-positive radius {radius}")]
    NonPositiveRadius { name: String, radius: f64 },

    /// Two bodies share a position, gravity between them is singular
    #[error("bodies '{first}' and '{second}' occupy the same position")]
    CoincidentBodies { first: String, second: String },

    #[error("body '{name}' has a non-finite {field}")]
    NonFiniteValue { name: String, field: &'static str },

    #[error("time step must be positive and finite, got {0}")]
    NonPositiveTimestep(f64),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
