//! Email template service

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{OutreachError, Result};
use crate::outreach::{EmailTemplate, TemplateType};
use crate::storage::Repository;

use super::{RenderedNotice, render_template};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEmailTemplate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
    #[serde(default, rename = "type")]
    pub template_type: String,
    #[serde(default)]
    pub variables: Vec<String>,
}

pub struct TemplateService {
    repository: Arc<dyn Repository>,
}

impl TemplateService {
    pub fn new(repository: Arc<dyn Repository>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, input: NewEmailTemplate) -> Result<EmailTemplate> {
        self.create_at(input, Utc::now()).await
    }

    /// New templates are always active.
    pub async fn create_at(
        &self,
        input: NewEmailTemplate,
        now: DateTime<Utc>,
    ) -> Result<EmailTemplate> {
        if input.name.trim().is_empty()
            || input.subject.trim().is_empty()
            || input.body.trim().is_empty()
            || input.template_type.trim().is_empty()
        {
            return Err(OutreachError::validation(
                "Name, subject, body, and type are required",
            ));
        }
        let template_type = TemplateType::parse(input.template_type.trim())?;

        let template = EmailTemplate {
            id: uuid::Uuid::new_v4().to_string(),
            name: input.name.trim().to_string(),
            subject: input.subject,
            body: input.body,
            template_type,
            variables: input.variables,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.repository.insert_template(template.clone()).await?;
        info!(
            "Created {} email template {} ({})",
            template.template_type, template.id, template.name
        );
        Ok(template)
    }

    /// Active templates in creation order.
    pub async fn list_active(&self) -> Result<Vec<EmailTemplate>> {
        Ok(self
            .repository
            .list_templates()
            .await?
            .into_iter()
            .filter(|t| t.is_active)
            .collect())
    }

    pub async fn get(&self, id: &str) -> Result<EmailTemplate> {
        self.repository
            .get_template(id)
            .await?
            .ok_or_else(|| OutreachError::not_found(format!("Template not found: {}", id)))
    }

    /// Renders a stored template with one recipient's variables.
    pub async fn render(
        &self,
        id: &str,
        variables: &HashMap<String, String>,
    ) -> Result<RenderedNotice> {
        let template = self.get(id).await?;
        Ok(render_template(&template, variables))
    }
}
