//! Layered application configuration.
//!
//! Values come from serde defaults, then an optional TOML file, then
//! `REGISTRY_HUB__*` environment variables (double underscore separates
//! sections, e.g. `REGISTRY_HUB__REGISTRY__UK_API_KEY`).

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::{Error, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub cache: CacheConfig,
    pub registry: RegistryConfig,
    pub logging: LoggingConfig,
}

/// HTTP serving settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Search-result cache bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of cached (jurisdiction, query) entries. 0 = unbounded.
    pub capacity: usize,
    /// Entry lifetime in seconds.
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 256,
            ttl_secs: 900,
        }
    }
}

/// Upstream registry settings shared by the adapters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Companies House API key, sent as HTTP Basic username.
    pub uk_api_key: String,
    /// Companies House base URL.
    pub companies_house_url: String,
    /// SEC EDGAR base URL.
    pub sec_edgar_url: String,
    /// Descriptive client identification EDGAR requires on every request.
    pub sec_user_agent: String,
    /// Connect timeout for outbound calls, in seconds.
    pub connect_timeout_secs: u64,
    /// Total timeout for outbound calls, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            uk_api_key: "DEMO_KEY".to_string(),
            companies_house_url: "https://api.company-information.service.gov.uk".to_string(),
            sec_edgar_url: "https://www.sec.gov".to_string(),
            sec_user_agent: "registry-hub/0.3 (contact@registry-hub.example)".to_string(),
            connect_timeout_secs: 5,
            request_timeout_secs: 10,
        }
    }
}

impl RegistryConfig {
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter, overridable via `RUST_LOG`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from an optional file plus environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix("REGISTRY_HUB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific TOML file, no environment layering.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .build()?;
        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants the rest of the system assumes.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("registry.companies_house_url", &self.registry.companies_house_url),
            ("registry.sec_edgar_url", &self.registry.sec_edgar_url),
        ] {
            Url::parse(value).map_err(|e| Error::InvalidInput {
                field: field.to_string(),
                reason: format!("not a valid URL: {e}"),
            })?;
        }

        if self.registry.request_timeout_secs == 0 || self.registry.connect_timeout_secs == 0 {
            return Err(Error::InvalidInput {
                field: "registry".to_string(),
                reason: "timeouts must be non-zero".to_string(),
            });
        }

        if self.cache.ttl_secs == 0 {
            return Err(Error::InvalidInput {
                field: "cache.ttl_secs".to_string(),
                reason: "cache TTL must be non-zero".to_string(),
            });
        }

        if self.registry.sec_user_agent.trim().is_empty() {
            return Err(Error::InvalidInput {
                field: "registry.sec_user_agent".to_string(),
                reason: "EDGAR rejects requests without a client identification".to_string(),
            });
        }

        Ok(())
    }
}
