//! Localization lookups shared by the adapters.
//!
//! Raw upstream codes are mapped to Italian labels; unknown codes resolve to
//! a fallback that embeds the original code so a result is never dropped for
//! carrying a state we have not catalogued yet.

use chrono::NaiveDate;

use super::NOT_AVAILABLE;

/// Map a raw company-status code to its Italian label.
///
/// Matching is case-insensitive. Empty input yields `"N/D"`, unknown codes
/// yield `"Altro (<code>)"`.
#[must_use]
pub fn translate_status(status: &str) -> String {
    if status.is_empty() {
        return NOT_AVAILABLE.to_string();
    }
    match status.to_ascii_lowercase().as_str() {
        "active" => "Attiva".to_string(),
        "dissolved" => "Sciolta".to_string(),
        "liquidation" => "In liquidazione".to_string(),
        "receivership" => "In fallimento".to_string(),
        "administration" => "In amministrazione controllata".to_string(),
        "voluntary-arrangement" => "Accordo volontario".to_string(),
        "converted-closed" => "Chiusa (convertita)".to_string(),
        "insolvency-proceedings" => "Procedura di insolvenza".to_string(),
        "removed" => "Rimossa".to_string(),
        "registered" => "Registrata".to_string(),
        "removed-from-the-register" => "Rimossa dal registro".to_string(),
        "archived" => "Archiviata".to_string(),
        _ => format!("Altro ({status})"),
    }
}

/// Map a raw legal-form code to its Italian label.
///
/// Same fallback policy as [`translate_status`]; empty input yields `"Altro"`.
#[must_use]
pub fn translate_type(company_type: &str) -> String {
    if company_type.is_empty() {
        return "Altro".to_string();
    }
    match company_type.to_ascii_lowercase().as_str() {
        "ltd" => "Società a responsabilità limitata (LTD)".to_string(),
        "plc" => "Società per azioni (PLC)".to_string(),
        "llp" => "Società a responsabilità limitata (LLP)".to_string(),
        "private-limited-guarant-nsc-limited-exemption" | "private-limited-guarant-nsc" => {
            "Società limitata da garanzia".to_string()
        }
        "industrial-and-provident-society" => {
            "Società industriale e di previdenza".to_string()
        }
        "private-unlimited" => "Società privata illimitata".to_string(),
        "charity" => "Ente di beneficenza".to_string(),
        "community-interest-company" => "Società di interesse comunitario".to_string(),
        "quotata-usa" => "Società quotata (USA)".to_string(),
        "corp" => "Corporation (USA)".to_string(),
        "inc" => "Incorporated (USA)".to_string(),
        _ => format!("Altro ({company_type})"),
    }
}

/// Reformat an upstream `YYYY-MM-DD` date (or the date prefix of a longer
/// timestamp) as `DD/MM/YYYY`.
///
/// Empty input yields `"N/D"`; anything unparseable is returned unchanged.
/// This function never fails.
#[must_use]
pub fn format_date(raw: &str) -> String {
    if raw.is_empty() {
        return NOT_AVAILABLE.to_string();
    }
    if !raw.contains('-') {
        return raw.to_string();
    }

    // Timestamps like 2023-05-17T00:00:00Z carry the date in the first
    // 10 characters.
    let prefix: String = raw.chars().take(10).collect();
    match NaiveDate::parse_from_str(&prefix, "%Y-%m-%d") {
        Ok(date) => date.format("%d/%m/%Y").to_string(),
        Err(_) => raw.to_string(),
    }
}
