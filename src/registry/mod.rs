pub mod adapters;
pub mod cache;
pub mod orchestrator;
pub mod translate;

pub use adapters::{AdapterError, RegistryAdapter};
pub use cache::{CacheStats, SearchCache};
pub use orchestrator::SearchOrchestrator;

use serde::{Deserialize, Serialize};

/// Sentinel used for any value the upstream does not carry.
pub const NOT_AVAILABLE: &str = "N/D";

/// A company record in the normalized, localized output schema.
///
/// Every field is always present and always a string; adapters substitute
/// [`NOT_AVAILABLE`] rather than omitting a value. Records are only built by
/// the per-adapter normalization functions, which set each field explicitly,
/// so nothing from a raw upstream payload (internal ids, filing links,
/// source URLs) can reach the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    /// Registered or display name.
    pub name: String,
    /// Source-specific identifier, always a display string (e.g. prefixed),
    /// never a bare upstream-only id.
    pub registration_number: String,
    /// Localized, human-readable lifecycle state.
    pub status: String,
    /// Free-text registered address, or a placeholder describing how to
    /// obtain it.
    pub registered_address: String,
    /// Localized date (DD/MM/YYYY) or a placeholder.
    pub incorporation_date: String,
    /// Localized legal form description.
    pub entity_type: String,
    /// Localized country label.
    pub jurisdiction: String,
}

/// The closed set of supported registries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Jurisdiction {
    /// United Kingdom (Companies House)
    Uk,
    /// United States (SEC EDGAR ticker index)
    Us,
}

impl Jurisdiction {
    /// All supported jurisdictions, in dispatch order.
    pub const ALL: [Self; 2] = [Self::Uk, Self::Us];

    /// Country code used in queries and cache keys.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Uk => "UK",
            Self::Us => "US",
        }
    }
}

impl std::fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Jurisdiction {
    type Err = UnknownJurisdiction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "UK" | "GB" => Ok(Self::Uk),
            "US" => Ok(Self::Us),
            _ => Err(UnknownJurisdiction(s.to_string())),
        }
    }
}

/// Country code outside the supported set.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unsupported jurisdiction code: {0}")]
pub struct UnknownJurisdiction(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jurisdiction_parses_case_insensitively() {
        assert_eq!("uk".parse::<Jurisdiction>().unwrap(), Jurisdiction::Uk);
        assert_eq!("US".parse::<Jurisdiction>().unwrap(), Jurisdiction::Us);
        assert_eq!("gb".parse::<Jurisdiction>().unwrap(), Jurisdiction::Uk);
        assert!("IT".parse::<Jurisdiction>().is_err());
    }

    #[test]
    fn record_serializes_with_schema_field_names() {
        let record = CompanyRecord {
            name: "ACME LTD".into(),
            registration_number: "01234567".into(),
            status: "Attiva".into(),
            registered_address: NOT_AVAILABLE.into(),
            incorporation_date: "01/01/2010".into(),
            entity_type: "Società a responsabilità limitata (LTD)".into(),
            jurisdiction: "Regno Unito".into(),
        };

        let json = serde_json::to_value(&record).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 7);
        for field in [
            "name",
            "registration_number",
            "status",
            "registered_address",
            "incorporation_date",
            "entity_type",
            "jurisdiction",
        ] {
            assert!(object[field].is_string(), "missing field {field}");
        }
    }
}
