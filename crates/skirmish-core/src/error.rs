//! Error types surfaced across the crate boundary.

/// An input action that the scene cannot honor.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// Actions such as SHOOT need a pointer position.
    #[error("action {action} requires a pointer position")]
    MissingPointer { action: &'static str },
}

/// A configuration snapshot that could not be loaded.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
