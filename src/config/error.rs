//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Command prefix must not be empty")]
    EmptyCommandPrefix,

    #[error("Command prefix must not contain whitespace")]
    WhitespaceInCommandPrefix,

    #[error("Invalid chat identity: {0}")]
    InvalidIdentity(&'static str),

    #[error("Ledger timeout must be between 1 and 60 seconds")]
    InvalidLedgerTimeout,

    #[error("Ledger URL must start with http:// or https://")]
    InvalidLedgerUrl,

    #[error("Storage path must not be empty: {0}")]
    EmptyStoragePath(&'static str),
}
