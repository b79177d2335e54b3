use thiserror::Error;

use crate::registry::adapters::AdapterError;

/// Top-level error type for configuration, startup and serving.
///
/// Upstream registry failures never appear here: adapters report
/// [`AdapterError`] to the orchestrator, which logs and collapses them to an
/// empty result per the fail-open contract.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid input: {field} - {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Adapter setup error: {0}")]
    AdapterSetup(String),
}

impl From<AdapterError> for Error {
    fn from(err: AdapterError) -> Self {
        // Adapters only surface errors at construction time; runtime search
        // failures stay inside the orchestrator.
        Self::AdapterSetup(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
