//! Survey submission service

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::catalog::SimType;
use crate::errors::{OutreachError, Result};
use crate::storage::{Repository, SurveySubmission};
use crate::tracking::{INITIAL_DISPATCH_COUNT, TrackingLinkRequest};

use super::LinkService;

/// 问卷表单提交内容（id / 时间戳 / 追踪链接由服务端生成）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubmission {
    pub influencer_email: String,
    pub naver_id: String,
    pub name: String,
    pub country: String,
    pub days: u32,
    pub desired_start_date: NaiveDate,
    pub expected_post_date: NaiveDate,
    #[serde(default)]
    pub ad_disclosure_agree: bool,
    #[serde(default)]
    pub sim_type: Option<SimType>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub phone_model: Option<String>,
    #[serde(default)]
    pub sns_link: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub detail_address: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub departure_date: Option<String>,
    #[serde(default)]
    pub arrival_date: Option<String>,
    #[serde(default)]
    pub f4_code: Option<String>,
    #[serde(default)]
    pub admin_memo: Option<String>,
}

impl NewSubmission {
    fn validate(&self) -> Result<()> {
        if self.naver_id.trim().is_empty() {
            return Err(OutreachError::validation("naverId is required"));
        }
        if !self.influencer_email.contains('@') {
            return Err(OutreachError::validation(format!(
                "Invalid influencer email: '{}'",
                self.influencer_email
            )));
        }
        if self.name.trim().is_empty() {
            return Err(OutreachError::validation("name is required"));
        }
        if self.country.trim().is_empty() {
            return Err(OutreachError::validation("country is required"));
        }
        if self.days == 0 {
            return Err(OutreachError::validation("days must be a positive integer"));
        }
        Ok(())
    }
}

pub struct SubmissionService {
    repository: Arc<dyn Repository>,
    links: Arc<LinkService>,
}

impl SubmissionService {
    pub fn new(repository: Arc<dyn Repository>, links: Arc<LinkService>) -> Self {
        Self { repository, links }
    }

    pub async fn create(&self, input: NewSubmission) -> Result<SurveySubmission> {
        self.create_at(input, Utc::now()).await
    }

    /// Stores the submission with its first tracking link.
    ///
    /// A link generation failure is logged and the submission is stored
    /// without a link.
    pub async fn create_at(
        &self,
        input: NewSubmission,
        now: DateTime<Utc>,
    ) -> Result<SurveySubmission> {
        input.validate()?;

        let naver_id = input.naver_id.trim().to_string();
        let country = input.country.trim().to_string();
        let sim_type = input.sim_type.unwrap_or(SimType::Esim);

        let tracking_link = match self.links.generate_typed(&TrackingLinkRequest::new(
            naver_id.clone(),
            country.clone(),
            sim_type,
            INITIAL_DISPATCH_COUNT,
        )) {
            Ok(link) => Some(link),
            Err(e) => {
                warn!(
                    "Failed to generate tracking link for {} ({}): {}",
                    naver_id, country, e
                );
                None
            }
        };

        let submission = SurveySubmission {
            id: uuid::Uuid::new_v4().to_string(),
            influencer_email: input.influencer_email.trim().to_string(),
            naver_id,
            name: input.name.trim().to_string(),
            country,
            days: input.days,
            desired_start_date: input.desired_start_date,
            expected_post_date: input.expected_post_date,
            ad_disclosure_agree: input.ad_disclosure_agree,
            sim_type: input.sim_type,
            tracking_link,
            created_at: now,
            updated_at: now,
            phone: input.phone,
            phone_model: input.phone_model,
            sns_link: input.sns_link,
            address: input.address,
            detail_address: input.detail_address,
            postal_code: input.postal_code,
            departure_date: input.departure_date,
            arrival_date: input.arrival_date,
            f4_code: input.f4_code,
            admin_memo: input.admin_memo,
        };

        self.repository.insert_submission(submission.clone()).await?;
        info!(
            "Stored submission {} for {}",
            submission.id, submission.naver_id
        );
        Ok(submission)
    }

    /// Newest first.
    pub async fn list(&self) -> Result<Vec<SurveySubmission>> {
        let mut submissions = self.repository.list_submissions().await?;
        submissions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(submissions)
    }

    pub async fn get(&self, id: &str) -> Result<SurveySubmission> {
        self.repository
            .get_submission(id)
            .await?
            .ok_or_else(|| OutreachError::not_found(format!("Submission not found: {}", id)))
    }
}
