//! Product mapping CRUD

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::{OutreachError, Result};
use crate::mapping::{MappingSimType, ProductMapping};
use crate::storage::Repository;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMapping {
    pub country: String,
    pub sim_type: MappingSimType,
    pub plan_name: String,
    pub days: u32,
    pub seller_product_code: String,
}

pub struct MappingService {
    repository: Arc<dyn Repository>,
}

impl MappingService {
    pub fn new(repository: Arc<dyn Repository>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, input: NewMapping) -> Result<ProductMapping> {
        let country = input.country.trim();
        let plan_name = input.plan_name.trim();
        let code = input.seller_product_code.trim();
        if country.is_empty() || plan_name.is_empty() || code.is_empty() {
            return Err(OutreachError::validation(
                "country, planName and sellerProductCode are required",
            ));
        }
        if input.days == 0 {
            return Err(OutreachError::validation("days must be a positive integer"));
        }

        let existing = self.repository.list_mappings().await?;
        if existing
            .iter()
            .any(|m| m.country == country && m.days == input.days)
        {
            // 不阻止，但解析时只会命中第一条
            warn!(
                "Mapping for {} / {} days already exists; the earlier one wins",
                country,
                input.days
            );
        }

        let mapping = ProductMapping {
            id: uuid::Uuid::new_v4().to_string(),
            country: country.to_string(),
            sim_type: input.sim_type,
            plan_name: plan_name.to_string(),
            days: input.days,
            seller_product_code: code.to_string(),
        };
        self.repository.insert_mapping(mapping.clone()).await?;
        info!(
            "Created product mapping {} ({} / {} days → {})",
            mapping.id, mapping.country, mapping.days, mapping.seller_product_code
        );
        Ok(mapping)
    }

    /// Table order, which is also resolution order.
    pub async fn list(&self) -> Result<Vec<ProductMapping>> {
        self.repository.list_mappings().await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        if !self.repository.delete_mapping(id).await? {
            return Err(OutreachError::not_found(format!("Mapping not found: {}", id)));
        }
        info!("Deleted product mapping {}", id);
        Ok(())
    }
}
