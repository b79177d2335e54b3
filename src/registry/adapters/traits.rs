use crate::registry::{CompanyRecord, Jurisdiction};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while querying an upstream registry.
///
/// These never reach the orchestrator's caller: the orchestrator logs them
/// and collapses every variant to an empty result, so a broken upstream
/// degrades to "no matches" rather than an error.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Upstream returned HTTP {0}")]
    Status(u16),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Timeout occurred")]
    Timeout,
}

impl From<reqwest::Error> for AdapterError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Parse(err.to_string())
        } else if err.is_connect() {
            Self::Network(format!("Connection failed: {err}"))
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Capability contract implemented once per jurisdiction.
///
/// An adapter encapsulates how to query one external registry and how to
/// normalize its raw payload into [`CompanyRecord`]s. Implementations must
/// bound every outbound call (connect and total timeout) and must build each
/// output record field by field; raw upstream objects are never passed
/// through.
#[async_trait]
pub trait RegistryAdapter: Send + Sync {
    /// Jurisdiction this adapter serves.
    fn jurisdiction(&self) -> Jurisdiction;

    /// Human-readable description of the upstream registry.
    fn description(&self) -> &str;

    /// Query the upstream and return normalized records in upstream order
    /// (or the adapter's own relevance-filter order).
    async fn search(&self, query: &str) -> Result<Vec<CompanyRecord>, AdapterError>;
}
