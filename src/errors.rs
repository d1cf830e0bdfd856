// Copyright 2025 Cowboy AI, LLC.

//! Error types for compatibility resolution

use thiserror::Error;

use crate::engines::Engine;
use crate::targets::Target;

/// Errors raised while parsing identifiers or validating a resolver at startup.
///
/// None of these surface from per-request resolution, which always yields a
/// target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompatError {
    /// Target token is not one of the known build targets
    #[error("Unknown target: {0}")]
    UnknownTarget(String),

    /// Engine token is not one of the known engines
    #[error("Unknown engine: {0}")]
    UnknownEngine(String),

    /// Version string does not match the accepted grammar
    #[error("Invalid version: {0:?}")]
    InvalidVersion(String),

    /// An engine the classifier can emit has no entry in the compatibility oracle
    #[error("Engine {0} is not registered with the compatibility oracle")]
    UnregisteredEngine(Engine),

    /// A ladder target has no specification level known to the compatibility oracle
    #[error("Target {0} is not registered with the compatibility oracle")]
    UnregisteredTarget(Target),

    /// Resolver configuration is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for compatibility operations
pub type CompatResult<T> = Result<T, CompatError>;

impl From<serde_json::Error> for CompatError {
    fn from(err: serde_json::Error) -> Self {
        CompatError::InvalidConfig(err.to_string())
    }
}

impl CompatError {
    /// Check if this is a startup registration failure
    pub fn is_registration_error(&self) -> bool {
        matches!(
            self,
            CompatError::UnregisteredEngine(_) | CompatError::UnregisteredTarget(_)
        )
    }
}
