use super::traits::{AdapterError, RegistryAdapter};
use crate::config::RegistryConfig;
use crate::registry::translate::{format_date, translate_status, translate_type};
use crate::registry::{CompanyRecord, Jurisdiction, NOT_AVAILABLE};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

/// Fixed page size requested from the upstream search endpoint.
const PAGE_SIZE: u32 = 10;

/// Adapter for the UK Companies House public search API.
///
/// Authenticates with the API key as HTTP Basic username and an empty
/// password, which is the scheme Companies House uses.
pub struct CompaniesHouseAdapter {
    client: Client,
    base_url: String,
    api_key: String,
}

/// Search payload as returned by `/search/companies`.
///
/// Only the fields we map are declared; everything else in the raw item
/// (internal ids, self links, filing URLs) is dropped at deserialization.
#[derive(Debug, Default, Deserialize)]
struct SearchPayload {
    #[serde(default)]
    items: Vec<RawCompanyItem>,
}

#[derive(Debug, Default, Deserialize)]
struct RawCompanyItem {
    title: Option<String>,
    company_number: Option<String>,
    company_status: Option<String>,
    address_snippet: Option<String>,
    date_of_creation: Option<String>,
    company_type: Option<String>,
}

impl CompaniesHouseAdapter {
    /// Create a new Companies House adapter.
    pub fn new(config: &RegistryConfig) -> Result<Self, AdapterError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| AdapterError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.companies_house_url.clone(),
            api_key: config.uk_api_key.clone(),
        })
    }

    fn search_url(&self) -> Result<Url, AdapterError> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| AdapterError::Network(format!("Invalid base URL: {e}")))?;
        base.join("/search/companies")
            .map_err(|e| AdapterError::Network(format!("Invalid endpoint: {e}")))
    }

    /// Normalize a raw search item into the common schema.
    ///
    /// Every output field is set explicitly; the raw item is consumed and
    /// nothing unmapped survives.
    fn normalize(item: RawCompanyItem) -> CompanyRecord {
        let company_type = item
            .company_type
            .as_deref()
            .filter(|t| !t.is_empty())
            // Private limited is by far the most common form and the
            // upstream omits the field for some of them.
            .unwrap_or("ltd");

        CompanyRecord {
            name: item.title.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            registration_number: item
                .company_number
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            status: translate_status(item.company_status.as_deref().unwrap_or_default()),
            registered_address: item
                .address_snippet
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            incorporation_date: format_date(item.date_of_creation.as_deref().unwrap_or_default()),
            entity_type: translate_type(company_type),
            jurisdiction: "Regno Unito".to_string(),
        }
    }
}

#[async_trait]
impl RegistryAdapter for CompaniesHouseAdapter {
    fn jurisdiction(&self) -> Jurisdiction {
        Jurisdiction::Uk
    }

    fn description(&self) -> &str {
        "Companies House - United Kingdom company register"
    }

    async fn search(&self, query: &str) -> Result<Vec<CompanyRecord>, AdapterError> {
        let url = self.search_url()?;
        debug!("Companies House search for: {}", query);

        let response = self
            .client
            .get(url)
            .query(&[("q", query.to_string()), ("items_per_page", PAGE_SIZE.to_string())])
            .basic_auth(&self.api_key, Some(""))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AdapterError::Status(response.status().as_u16()));
        }

        let payload: SearchPayload = response.json().await?;
        let records: Vec<CompanyRecord> = payload.items.into_iter().map(Self::normalize).collect();

        info!("Companies House returned {} records", records.len());
        Ok(records)
    }
}
