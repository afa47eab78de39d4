//! Admin API 追踪链接与目录端点

use actix_web::{HttpResponse, Result as ActixResult, web};
use std::sync::Arc;
use tracing::{debug, info};

use crate::services::LinkService;
use crate::tracking::INITIAL_DISPATCH_COUNT;

use super::helpers::{api_result, error_from_outreach, success_response};
use super::types::{GenerateLinkRequest, GenerateLinkResponse};

/// POST /links/generate
pub async fn generate_link(
    body: web::Json<GenerateLinkRequest>,
    service: web::Data<Arc<LinkService>>,
) -> ActixResult<HttpResponse> {
    let request = body.into_inner();
    debug!(
        "Admin API: generate link for {} ({}/{})",
        request.subject_id, request.country_code, request.sim_type
    );

    let result = service.generate(
        &request.subject_id,
        &request.country_code,
        &request.sim_type,
        request.dispatch_count.unwrap_or(INITIAL_DISPATCH_COUNT),
    );

    Ok(match result {
        Ok(tracking_link) => {
            info!("Admin API: tracking link generated for {}", request.subject_id);
            success_response(GenerateLinkResponse { tracking_link })
        }
        Err(e) => error_from_outreach(&e),
    })
}

/// GET /catalog
pub async fn list_countries(service: web::Data<Arc<LinkService>>) -> ActixResult<HttpResponse> {
    Ok(success_response(service.countries()))
}

/// GET /catalog/{country}
pub async fn get_country_entries(
    path: web::Path<String>,
    service: web::Data<Arc<LinkService>>,
) -> ActixResult<HttpResponse> {
    let country = path.into_inner();
    Ok(api_result(service.entries_for(&country)))
}
