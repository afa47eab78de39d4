//! 商品映射：(country, days) → 卖家商品编码 / 套餐名

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// 映射表使用的 SIM 类型（`sim` 指实体卡）
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MappingSimType {
    Sim,
    Esim,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMapping {
    pub id: String,
    pub country: String,
    pub sim_type: MappingSimType,
    pub plan_name: String,
    pub days: u32,
    pub seller_product_code: String,
}

/// First mapping (in slice order) whose country and days both match.
///
/// No partial matching: a miss is `None` and the dispatch sheet renders blank
/// product cells for that row.
pub fn resolve_mapping<'a>(
    mappings: &'a [ProductMapping],
    country: &str,
    days: u32,
) -> Option<&'a ProductMapping> {
    mappings
        .iter()
        .find(|m| m.country == country && m.days == days)
}
