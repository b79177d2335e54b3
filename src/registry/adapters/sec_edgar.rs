use super::traits::{AdapterError, RegistryAdapter};
use crate::config::RegistryConfig;
use crate::registry::translate::translate_type;
use crate::registry::{CompanyRecord, Jurisdiction, NOT_AVAILABLE};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use tracing::{debug, info};
use url::Url;

/// Maximum number of matches collected from the ticker index per search.
const MAX_MATCHES: usize = 10;

/// Adapter for the SEC EDGAR public ticker index.
///
/// EDGAR has no live name-search endpoint; each search fetches the full
/// `company_tickers.json` index and filters it locally. EDGAR rejects
/// clients without a descriptive `User-Agent`, so one is sent on every
/// request.
pub struct SecEdgarAdapter {
    client: Client,
    base_url: String,
}

/// One entry of `company_tickers.json`. The index is a JSON object keyed by
/// arbitrary position strings, each value carrying these three fields.
#[derive(Debug, Default, Deserialize)]
struct TickerEntry {
    cik_str: Option<u64>,
    ticker: Option<String>,
    title: Option<String>,
}

/// The full ticker index, with entries kept in document order.
///
/// The position keys are discarded; entry order is what makes the
/// first-N-matches cap deterministic across identical queries, so the index
/// must not pass through an unordered map.
#[derive(Debug, Default)]
struct TickerIndex {
    entries: Vec<TickerEntry>,
}

impl<'de> Deserialize<'de> for TickerIndex {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct IndexVisitor;

        impl<'de> Visitor<'de> for IndexVisitor {
            type Value = TickerIndex;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of position keys to ticker entries")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((_, entry)) = map.next_entry::<String, TickerEntry>()? {
                    entries.push(entry);
                }
                Ok(TickerIndex { entries })
            }
        }

        deserializer.deserialize_map(IndexVisitor)
    }
}

impl SecEdgarAdapter {
    /// Create a new SEC EDGAR adapter.
    pub fn new(config: &RegistryConfig) -> Result<Self, AdapterError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .user_agent(config.sec_user_agent.clone())
            .build()
            .map_err(|e| AdapterError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.sec_edgar_url.clone(),
        })
    }

    fn index_url(&self) -> Result<Url, AdapterError> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| AdapterError::Network(format!("Invalid base URL: {e}")))?;
        base.join("/files/company_tickers.json")
            .map_err(|e| AdapterError::Network(format!("Invalid endpoint: {e}")))
    }

    /// Select index entries whose title or ticker contains the query,
    /// case-insensitively, stopping once [`MAX_MATCHES`] are collected.
    ///
    /// Entries are scanned in index document order, so identical queries
    /// always select the same entries in the same order.
    fn filter_matches(index: TickerIndex, query: &str) -> Vec<TickerEntry> {
        let query = query.to_lowercase();
        let mut matches = Vec::new();

        for entry in index.entries {
            let title_hit = entry
                .title
                .as_deref()
                .is_some_and(|t| t.to_lowercase().contains(&query));
            let ticker_hit = entry
                .ticker
                .as_deref()
                .is_some_and(|t| t.to_lowercase().contains(&query));

            if title_hit || ticker_hit {
                matches.push(entry);
                if matches.len() >= MAX_MATCHES {
                    break;
                }
            }
        }

        matches
    }

    /// Normalize a ticker entry into the common schema.
    ///
    /// The public index carries neither status nor address nor incorporation
    /// date, so those fields are fixed descriptive placeholders. The CIK is
    /// rendered as a prefixed, zero-padded display id, never as the bare
    /// upstream number.
    fn normalize(entry: TickerEntry) -> CompanyRecord {
        let registration_number = entry
            .cik_str
            .map_or_else(|| NOT_AVAILABLE.to_string(), |cik| format!("CIK-{cik:010}"));

        CompanyRecord {
            name: entry.title.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            registration_number,
            status: "Attiva (Quotata USA)".to_string(),
            registered_address: "Sede legale USA (disponibile via filing 10-K)".to_string(),
            incorporation_date: "N/D (Vedi atti costitutivi USA)".to_string(),
            entity_type: translate_type("quotata-usa"),
            jurisdiction: "Stati Uniti".to_string(),
        }
    }
}

#[async_trait]
impl RegistryAdapter for SecEdgarAdapter {
    fn jurisdiction(&self) -> Jurisdiction {
        Jurisdiction::Us
    }

    fn description(&self) -> &str {
        "SEC EDGAR - United States public company filings index"
    }

    async fn search(&self, query: &str) -> Result<Vec<CompanyRecord>, AdapterError> {
        let url = self.index_url()?;
        debug!("SEC EDGAR index lookup for: {}", query);

        // reqwest's gzip feature advertises Accept-Encoding and transparently
        // decompresses the index, which EDGAR serves compressed.
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(AdapterError::Status(response.status().as_u16()));
        }

        let index: TickerIndex = response.json().await?;
        let records: Vec<CompanyRecord> = Self::filter_matches(index, query)
            .into_iter()
            .map(Self::normalize)
            .collect();

        info!("SEC EDGAR matched {} records", records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apple() -> TickerEntry {
        TickerEntry {
            cik_str: Some(320_193),
            ticker: Some("AAPL".to_string()),
            title: Some("Apple Inc".to_string()),
        }
    }

    fn sample_index() -> TickerIndex {
        TickerIndex {
            entries: vec![
                apple(),
                TickerEntry {
                    cik_str: Some(789_019),
                    ticker: Some("MSFT".to_string()),
                    title: Some("MICROSOFT CORP".to_string()),
                },
            ],
        }
    }

    fn crowded_index_json() -> String {
        let body: Vec<String> = (0..50)
            .map(|i| {
                format!(
                    r#""{i}": {{"cik_str": {i}, "ticker": "TST{i}", "title": "Test Company {i}"}}"#
                )
            })
            .collect();
        format!("{{{}}}", body.join(","))
    }

    #[test]
    fn cik_is_prefixed_and_zero_padded() {
        let record = SecEdgarAdapter::normalize(apple());
        assert_eq!(record.registration_number, "CIK-0000320193");
        assert_eq!(record.name, "Apple Inc");
        assert_eq!(record.status, "Attiva (Quotata USA)");
        assert_eq!(record.entity_type, "Società quotata (USA)");
        assert_eq!(record.jurisdiction, "Stati Uniti");
    }

    #[test]
    fn placeholders_cover_fields_the_index_lacks() {
        let record = SecEdgarAdapter::normalize(apple());
        assert_eq!(record.registered_address, "Sede legale USA (disponibile via filing 10-K)");
        assert_eq!(record.incorporation_date, "N/D (Vedi atti costitutivi USA)");
    }

    #[test]
    fn matches_on_title_case_insensitively() {
        let hits = SecEdgarAdapter::filter_matches(sample_index(), "microsoft");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].ticker.as_deref(), Some("MSFT"));
    }

    #[test]
    fn matches_on_ticker_case_insensitively() {
        let hits = SecEdgarAdapter::filter_matches(sample_index(), "aapl");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title.as_deref(), Some("Apple Inc"));
    }

    #[test]
    fn no_match_yields_empty() {
        assert!(SecEdgarAdapter::filter_matches(sample_index(), "ferrari").is_empty());
    }

    #[test]
    fn index_parsing_preserves_document_order() {
        let index: TickerIndex = serde_json::from_str(&crowded_index_json()).unwrap();
        let ciks: Vec<Option<u64>> = index.entries.iter().map(|e| e.cik_str).collect();
        let expected: Vec<Option<u64>> = (0..50).map(Some).collect();
        assert_eq!(ciks, expected);
    }

    #[test]
    fn collection_stops_at_the_cap_with_the_first_entries() {
        let index: TickerIndex = serde_json::from_str(&crowded_index_json()).unwrap();
        let hits = SecEdgarAdapter::filter_matches(index, "test company");

        assert_eq!(hits.len(), MAX_MATCHES);
        // The cap keeps the first matches in index order, not an arbitrary
        // subset.
        let ciks: Vec<Option<u64>> = hits.iter().map(|e| e.cik_str).collect();
        let expected: Vec<Option<u64>> = (0..MAX_MATCHES as u64).map(Some).collect();
        assert_eq!(ciks, expected);
    }

    #[test]
    fn identical_queries_select_identical_matches() {
        let first: TickerIndex = serde_json::from_str(&crowded_index_json()).unwrap();
        let second: TickerIndex = serde_json::from_str(&crowded_index_json()).unwrap();

        let first_ciks: Vec<Option<u64>> =
            SecEdgarAdapter::filter_matches(first, "test company")
                .iter()
                .map(|e| e.cik_str)
                .collect();
        let second_ciks: Vec<Option<u64>> =
            SecEdgarAdapter::filter_matches(second, "test company")
                .iter()
                .map(|e| e.cik_str)
                .collect();

        assert_eq!(first_ciks, second_ciks);
    }

    #[test]
    fn missing_cik_falls_back_to_sentinel() {
        let record = SecEdgarAdapter::normalize(TickerEntry::default());
        assert_eq!(record.registration_number, "N/D");
        assert_eq!(record.name, "N/D");
    }
}
