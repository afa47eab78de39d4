//! Referral tracking links
//!
//! `{baseUrl}{?|&}nt_source={subject}&nt_medium={country}{u|e}{count}`
//!
//! The medium is built from the *requested* country and SIM type even when
//! the catalog resolved a fallback entry, so attribution keeps the blogger's
//! real destination.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, SimType};
use crate::errors::{OutreachError, Result};

pub const SOURCE_PARAM: &str = "nt_source";
pub const MEDIUM_PARAM: &str = "nt_medium";

/// Dispatch count used when a submission is first stored.
pub const INITIAL_DISPATCH_COUNT: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingLinkRequest {
    pub subject_id: String,
    pub country_code: String,
    pub sim_type: SimType,
    pub dispatch_count: u32,
}

impl TrackingLinkRequest {
    pub fn new(
        subject_id: impl Into<String>,
        country_code: impl Into<String>,
        sim_type: SimType,
        dispatch_count: u32,
    ) -> Self {
        Self {
            subject_id: subject_id.into(),
            country_code: country_code.into(),
            sim_type,
            dispatch_count,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.subject_id.trim().is_empty() {
            return Err(OutreachError::validation("subject id must not be empty"));
        }
        if self.country_code.trim().is_empty() {
            return Err(OutreachError::validation("country code must not be empty"));
        }
        if self.dispatch_count == 0 {
            return Err(OutreachError::validation(
                "dispatch count must be a positive integer",
            ));
        }
        Ok(())
    }

    /// `JPe1`, `VNu3`, ...
    pub fn medium(&self) -> String {
        format!(
            "{}{}{}",
            self.country_code,
            self.sim_type.code(),
            self.dispatch_count
        )
    }
}

/// Resolves a catalog entry for the request and composes the tracking URL.
pub fn generate_tracking_link(catalog: &Catalog, request: &TrackingLinkRequest) -> Result<String> {
    request.validate()?;

    let entry = catalog.resolve(&request.country_code, request.sim_type)?;
    let separator = if entry.base_url.contains('?') { '&' } else { '?' };

    Ok(format!(
        "{}{}{}={}&{}={}",
        entry.base_url,
        separator,
        SOURCE_PARAM,
        urlencoding::encode(request.subject_id.trim()),
        MEDIUM_PARAM,
        request.medium()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogEntry, CatalogSource};

    fn catalog_with(entries: &[(&str, SimType, &str)]) -> Catalog {
        Catalog::new(
            entries
                .iter()
                .map(|(country, sim, url)| CatalogEntry {
                    country_code: country.to_string(),
                    country_name: country.to_string(),
                    sim_type: *sim,
                    product_name: String::new(),
                    base_url: url.to_string(),
                    product_id: String::new(),
                })
                .collect(),
            CatalogSource::Default,
        )
    }

    #[test]
    fn test_canonical_link() {
        let catalog = catalog_with(&[("JP", SimType::Esim, "https://x.example/p")]);
        let req = TrackingLinkRequest::new("jdh11830", "JP", SimType::Esim, 1);
        assert_eq!(
            generate_tracking_link(&catalog, &req).unwrap(),
            "https://x.example/p?nt_source=jdh11830&nt_medium=JPe1"
        );
    }

    #[test]
    fn test_existing_query_uses_ampersand() {
        let catalog = catalog_with(&[("VN", SimType::Usim, "https://x.example/p?ref=store")]);
        let req = TrackingLinkRequest::new("blogger", "VN", SimType::Usim, 3);
        assert_eq!(
            generate_tracking_link(&catalog, &req).unwrap(),
            "https://x.example/p?ref=store&nt_source=blogger&nt_medium=VNu3"
        );
    }

    #[test]
    fn test_medium_keeps_requested_country() {
        let catalog = catalog_with(&[("EU", SimType::Esim, "https://eu.example")]);
        let req = TrackingLinkRequest::new("abc", "BR", SimType::Usim, 1);
        assert_eq!(
            generate_tracking_link(&catalog, &req).unwrap(),
            "https://eu.example?nt_source=abc&nt_medium=BRu1"
        );
    }

    #[test]
    fn test_subject_is_percent_encoded() {
        let catalog = catalog_with(&[("EU", SimType::Esim, "https://eu.example")]);
        let req = TrackingLinkRequest::new("a b&c", "EU", SimType::Esim, 1);
        let link = generate_tracking_link(&catalog, &req).unwrap();
        assert!(link.contains("nt_source=a%20b%26c&"));
    }

    #[test]
    fn test_invalid_requests() {
        let catalog = Catalog::default_catalog();
        for req in [
            TrackingLinkRequest::new("  ", "JP", SimType::Esim, 1),
            TrackingLinkRequest::new("abc", "", SimType::Esim, 1),
            TrackingLinkRequest::new("abc", "JP", SimType::Esim, 0),
        ] {
            assert!(matches!(
                generate_tracking_link(&catalog, &req),
                Err(OutreachError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_missing_fallback_is_not_found() {
        let catalog = catalog_with(&[("JP", SimType::Esim, "https://x.example/p")]);
        let req = TrackingLinkRequest::new("abc", "US", SimType::Esim, 1);
        assert!(matches!(
            generate_tracking_link(&catalog, &req),
            Err(OutreachError::NotFound(_))
        ));
    }
}
