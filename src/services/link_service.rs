//! Tracking link service
//!
//! String-typed front of the tracking-link generator, shared between the
//! HTTP handlers, the CLI and submission creation.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::catalog::{Catalog, CatalogEntry, CountrySummary, SimType};
use crate::errors::{OutreachError, Result};
use crate::tracking::{TrackingLinkRequest, generate_tracking_link};

pub struct LinkService {
    catalog: Arc<Catalog>,
}

impl LinkService {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Generates a link from raw inputs; `sim_type` is parsed case-insensitively.
    pub fn generate(
        &self,
        subject_id: &str,
        country_code: &str,
        sim_type: &str,
        dispatch_count: u32,
    ) -> Result<String> {
        let sim_type = SimType::parse(sim_type)?;
        self.generate_typed(&TrackingLinkRequest::new(
            subject_id,
            country_code,
            sim_type,
            dispatch_count,
        ))
    }

    pub fn generate_typed(&self, request: &TrackingLinkRequest) -> Result<String> {
        if self
            .catalog
            .find_by_country(&request.country_code)
            .is_none()
        {
            warn!(
                "Country {} not in catalog, falling back to default entry",
                request.country_code
            );
        }
        let link = generate_tracking_link(&self.catalog, request)?;
        debug!("Generated tracking link for {}: {}", request.subject_id, link);
        Ok(link)
    }

    pub fn countries(&self) -> Vec<CountrySummary> {
        self.catalog.summaries()
    }

    pub fn entries_for(&self, country_code: &str) -> Result<Vec<CatalogEntry>> {
        let entries: Vec<CatalogEntry> = self
            .catalog
            .entries_for(country_code)
            .into_iter()
            .cloned()
            .collect();
        if entries.is_empty() {
            return Err(OutreachError::not_found(format!(
                "Country not in catalog: {}",
                country_code
            )));
        }
        Ok(entries)
    }
}
