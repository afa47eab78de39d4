//! Admin API 邮件模板端点

use actix_web::{HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::services::{NewEmailTemplate, TemplateService};

use super::helpers::{api_result, created_response, error_from_outreach};
use super::types::RenderTemplateRequest;

/// GET /email/templates - 仅返回启用中的模板
pub async fn list_templates(
    service: web::Data<Arc<TemplateService>>,
) -> ActixResult<HttpResponse> {
    Ok(api_result(service.list_active().await))
}

/// POST /email/templates
pub async fn create_template(
    body: web::Json<NewEmailTemplate>,
    service: web::Data<Arc<TemplateService>>,
) -> ActixResult<HttpResponse> {
    Ok(match service.create(body.into_inner()).await {
        Ok(template) => created_response(template),
        Err(e) => error_from_outreach(&e),
    })
}

/// POST /email/templates/{id}/render
pub async fn render_template(
    path: web::Path<String>,
    body: web::Json<RenderTemplateRequest>,
    service: web::Data<Arc<TemplateService>>,
) -> ActixResult<HttpResponse> {
    Ok(api_result(
        service.render(&path.into_inner(), &body.variables).await,
    ))
}
