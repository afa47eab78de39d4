//! 博主名册与邮件模板

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::errors::{OutreachError, Result};

/// 目前只收录 Naver 博客
pub const DEFAULT_PLATFORM: &str = "naver";

/// 退订 / 退信标记，发送方据此跳过收件人
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suppression {
    #[serde(default)]
    pub unsub: bool,
    #[serde(default)]
    pub bounce: bool,
}

impl Suppression {
    pub fn is_suppressed(&self) -> bool {
        self.unsub || self.bounce
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Influencer {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Unique across the registry.
    pub email: String,
    pub blog_url: String,
    pub platform: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_contacted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub suppression: Suppression,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TemplateType {
    Proposal,
    Link,
}

impl TemplateType {
    pub fn parse(raw: &str) -> Result<Self> {
        raw.parse::<TemplateType>().map_err(|_| {
            OutreachError::validation(format!(
                "Invalid template type: '{}'. Valid: proposal, link",
                raw
            ))
        })
    }
}

/// 邮件模板；`subject` 与 `body` 中的 `{var}` 在渲染时替换
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailTemplate {
    pub id: String,
    pub name: String,
    pub subject: String,
    pub body: String,
    #[serde(rename = "type")]
    pub template_type: TemplateType,
    #[serde(default)]
    pub variables: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
