//! Country / SIM catalog
//!
//! Immutable reference data binding a `(country, sim type)` pair to a
//! marketing base URL and product id. Built once at startup (see
//! [`loader::CatalogLoader`]) and shared by `Arc`; nothing mutates it
//! afterwards.

pub mod defaults;
pub mod keywords;
pub mod loader;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::errors::{OutreachError, Result};

pub use loader::{CatalogLoader, CatalogSource};

/// Country every unresolvable lookup falls back to.
pub const FALLBACK_COUNTRY_CODE: &str = "EU";
pub const FALLBACK_SIM_TYPE: SimType = SimType::Esim;

/// 物理 USIM / 嵌入式 eSIM
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    AsRefStr,
    Display,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SimType {
    Usim,
    Esim,
}

impl SimType {
    /// Single-letter code used in the tracking medium.
    pub fn code(&self) -> char {
        match self {
            SimType::Usim => 'u',
            SimType::Esim => 'e',
        }
    }

    /// Parses `usim` / `esim` (any case); anything else is a validation error.
    pub fn parse(raw: &str) -> Result<Self> {
        raw.trim().parse::<SimType>().map_err(|_| {
            OutreachError::validation(format!(
                "Invalid sim type: '{}'. Valid: usim, esim",
                raw
            ))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub country_code: String,
    pub country_name: String,
    pub sim_type: SimType,
    pub product_name: String,
    pub base_url: String,
    pub product_id: String,
}

/// Country code with the SIM types the catalog offers for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountrySummary {
    pub country_code: String,
    pub country_name: String,
    pub sim_types: Vec<SimType>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    source: CatalogSource,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>, source: CatalogSource) -> Self {
        Self { entries, source }
    }

    /// Built-in catalog used when no source file is usable.
    pub fn default_catalog() -> Self {
        Self::new(defaults::default_entries(), CatalogSource::Default)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find_exact(&self, country_code: &str, sim_type: SimType) -> Option<&CatalogEntry> {
        self.entries
            .iter()
            .find(|e| e.country_code == country_code && e.sim_type == sim_type)
    }

    pub fn find_by_country(&self, country_code: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.country_code == country_code)
    }

    pub fn entries_for(&self, country_code: &str) -> Vec<&CatalogEntry> {
        self.entries
            .iter()
            .filter(|e| e.country_code == country_code)
            .collect()
    }

    /// Exact match, then any entry of the country, then the EU/esim fallback.
    pub fn resolve(&self, country_code: &str, sim_type: SimType) -> Result<&CatalogEntry> {
        self.find_exact(country_code, sim_type)
            .or_else(|| self.find_by_country(country_code))
            .or_else(|| self.find_exact(FALLBACK_COUNTRY_CODE, FALLBACK_SIM_TYPE))
            .ok_or_else(|| {
                OutreachError::not_found(format!(
                    "No marketing link found for country: {}, simType: {}",
                    country_code, sim_type
                ))
            })
    }

    /// The fallback entry must exist or every unknown-country link fails.
    pub fn verify_integrity(&self) -> Result<()> {
        if self
            .find_exact(FALLBACK_COUNTRY_CODE, FALLBACK_SIM_TYPE)
            .is_none()
        {
            return Err(OutreachError::configuration_integrity(format!(
                "catalog ({}) has no {}/{} fallback entry",
                self.source, FALLBACK_COUNTRY_CODE, FALLBACK_SIM_TYPE
            )));
        }
        Ok(())
    }

    /// Distinct country codes in first-seen order.
    pub fn country_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !codes.contains(&entry.country_code.as_str()) {
                codes.push(&entry.country_code);
            }
        }
        codes
    }

    pub fn sim_types_for(&self, country_code: &str) -> Vec<SimType> {
        let mut sims = Vec::new();
        for entry in self.entries_for(country_code) {
            if !sims.contains(&entry.sim_type) {
                sims.push(entry.sim_type);
            }
        }
        sims
    }

    pub fn summaries(&self) -> Vec<CountrySummary> {
        self.country_codes()
            .into_iter()
            .map(|code| CountrySummary {
                country_code: code.to_string(),
                country_name: self
                    .find_by_country(code)
                    .map(|e| e.country_name.clone())
                    .unwrap_or_default(),
                sim_types: self.sim_types_for(code),
            })
            .collect()
    }
}
