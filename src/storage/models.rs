use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::SimType;
use crate::dispatch::DispatchBatch;
use crate::errors::{OutreachError, Result};
use crate::mapping::ProductMapping;
use crate::outreach::{EmailTemplate, Influencer};

/// 博主问卷提交记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveySubmission {
    pub id: String,
    pub influencer_email: String,
    /// 博客 ID，作为追踪链接的 source
    pub naver_id: String,
    pub name: String,
    pub country: String,
    pub days: u32,
    pub desired_start_date: NaiveDate,
    pub expected_post_date: NaiveDate,
    #[serde(default)]
    pub ad_disclosure_agree: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sim_type: Option<SimType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_link: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sns_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f4_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_memo: Option<String>,
}

impl SurveySubmission {
    /// Example submission used by the sample sheet.
    pub fn sample() -> Self {
        let created = DateTime::<Utc>::default();
        Self {
            id: "sample".to_string(),
            influencer_email: "example@naver.com".to_string(),
            naver_id: "example".to_string(),
            name: "홍길동".to_string(),
            country: "JP".to_string(),
            days: 7,
            desired_start_date: NaiveDate::from_ymd_opt(2024, 1, 20).unwrap_or_default(),
            expected_post_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap_or_default(),
            ad_disclosure_agree: true,
            sim_type: Some(SimType::Esim),
            tracking_link: None,
            created_at: created,
            updated_at: created,
            phone: None,
            phone_model: None,
            sns_link: None,
            address: None,
            detail_address: None,
            postal_code: None,
            departure_date: None,
            arrival_date: None,
            f4_code: None,
            admin_memo: None,
        }
    }
}

/// Whole-store snapshot; the file backend persists exactly this.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collections {
    #[serde(default)]
    pub survey_submissions: Vec<SurveySubmission>,
    #[serde(default)]
    pub product_mappings: Vec<ProductMapping>,
    #[serde(default)]
    pub dispatch_batches: Vec<DispatchBatch>,
    #[serde(default)]
    pub influencers: Vec<Influencer>,
    #[serde(default)]
    pub email_templates: Vec<EmailTemplate>,
}

fn duplicate(kind: &str, id: &str) -> OutreachError {
    OutreachError::storage(format!("{} {} already exists", kind, id))
}

/// 写操作：两个后端共用，文件后端在副本上执行后再落盘
impl Collections {
    pub fn insert_submission(&mut self, submission: SurveySubmission) -> Result<()> {
        if self.survey_submissions.iter().any(|s| s.id == submission.id) {
            return Err(duplicate("submission", &submission.id));
        }
        self.survey_submissions.push(submission);
        Ok(())
    }

    pub fn insert_mapping(&mut self, mapping: ProductMapping) -> Result<()> {
        if self.product_mappings.iter().any(|m| m.id == mapping.id) {
            return Err(duplicate("mapping", &mapping.id));
        }
        self.product_mappings.push(mapping);
        Ok(())
    }

    /// `false` when no mapping had that id; remaining order is kept.
    pub fn delete_mapping(&mut self, id: &str) -> bool {
        let before = self.product_mappings.len();
        self.product_mappings.retain(|m| m.id != id);
        self.product_mappings.len() != before
    }

    pub fn insert_batch(&mut self, batch: DispatchBatch) -> Result<()> {
        if self.dispatch_batches.iter().any(|b| b.id == batch.id) {
            return Err(duplicate("batch", &batch.id));
        }
        self.dispatch_batches.push(batch);
        Ok(())
    }

    pub fn update_batch(&mut self, batch: DispatchBatch) -> Result<()> {
        match self.dispatch_batches.iter_mut().find(|b| b.id == batch.id) {
            Some(slot) => {
                *slot = batch;
                Ok(())
            }
            None => Err(OutreachError::not_found(format!(
                "Batch not found: {}",
                batch.id
            ))),
        }
    }

    /// Emails are unique; a second influencer with the same email is a `Conflict`.
    pub fn insert_influencer(&mut self, influencer: Influencer) -> Result<()> {
        if self.influencers.iter().any(|i| i.id == influencer.id) {
            return Err(duplicate("influencer", &influencer.id));
        }
        if self.influencers.iter().any(|i| i.email == influencer.email) {
            return Err(OutreachError::conflict(format!(
                "Influencer with email {} already exists",
                influencer.email
            )));
        }
        self.influencers.push(influencer);
        Ok(())
    }

    pub fn insert_template(&mut self, template: EmailTemplate) -> Result<()> {
        if self.email_templates.iter().any(|t| t.id == template.id) {
            return Err(duplicate("template", &template.id));
        }
        self.email_templates.push(template);
        Ok(())
    }

    pub fn counts(&self) -> CollectionCounts {
        CollectionCounts {
            submissions: self.survey_submissions.len(),
            mappings: self.product_mappings.len(),
            batches: self.dispatch_batches.len(),
            influencers: self.influencers.len(),
            templates: self.email_templates.len(),
        }
    }
}

/// Document counts reported by the health endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionCounts {
    pub submissions: usize,
    pub mappings: usize,
    pub batches: usize,
    pub influencers: usize,
    pub templates: usize,
}
