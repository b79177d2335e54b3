use crate::config::Config;
use crate::registry::adapters::{CompaniesHouseAdapter, RegistryAdapter, SecEdgarAdapter};
use crate::registry::cache::{CacheStats, SearchCache};
use crate::registry::{CompanyRecord, Jurisdiction};
use crate::Result;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Routes a search to the adapter for the requested jurisdiction and applies
/// the result cache.
///
/// The external contract is fail-open-to-empty: an unsupported jurisdiction,
/// a failed upstream and a genuine zero-match search are all observationally
/// identical to the caller (an empty list). Internally the adapters return a
/// typed error, which is logged here before being collapsed.
pub struct SearchOrchestrator {
    adapters: HashMap<Jurisdiction, Arc<dyn RegistryAdapter>>,
    cache: SearchCache,
}

impl SearchOrchestrator {
    /// Build one adapter per supported jurisdiction and the shared cache.
    pub fn new(config: &Config) -> Result<Self> {
        let mut adapters: HashMap<Jurisdiction, Arc<dyn RegistryAdapter>> = HashMap::new();
        adapters.insert(
            Jurisdiction::Uk,
            Arc::new(CompaniesHouseAdapter::new(&config.registry)?),
        );
        adapters.insert(
            Jurisdiction::Us,
            Arc::new(SecEdgarAdapter::new(&config.registry)?),
        );

        info!("Initialized orchestrator with {} registry adapters", adapters.len());

        Ok(Self {
            adapters,
            cache: SearchCache::new(
                config.cache.capacity,
                Duration::from_secs(config.cache.ttl_secs),
            ),
        })
    }

    /// Search one jurisdiction's registry.
    ///
    /// Returns records in adapter order; never fails. Only non-empty results
    /// are cached, so an identical query after an outage or a zero-match
    /// response retries the upstream.
    pub async fn search(&self, country: &str, query: &str) -> Vec<CompanyRecord> {
        let Ok(jurisdiction) = country.parse::<Jurisdiction>() else {
            debug!("Unsupported jurisdiction code: {}", country);
            return Vec::new();
        };

        if let Some(cached) = self.cache.get(jurisdiction, query).await {
            return cached;
        }

        let Some(adapter) = self.adapters.get(&jurisdiction) else {
            // The adapter map covers every enum variant by construction.
            return Vec::new();
        };

        let records = match adapter.search(query).await {
            Ok(records) => records,
            Err(e) => {
                warn!("{} adapter failed, degrading to empty: {}", jurisdiction, e);
                return Vec::new();
            }
        };

        if !records.is_empty() {
            self.cache
                .insert(jurisdiction, query, records.clone())
                .await;
        }

        records
    }

    /// Jurisdiction codes this orchestrator can serve.
    #[must_use]
    pub fn supported_jurisdictions(&self) -> Vec<&'static str> {
        let mut codes: Vec<&'static str> = self.adapters.keys().map(|j| j.code()).collect();
        codes.sort_unstable();
        codes
    }

    /// Snapshot of the cache counters, for the health probe.
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }
}
