//! Admin API 商品映射端点

use actix_web::{HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::services::{MappingService, NewMapping};

use super::helpers::{api_result, created_response, error_from_outreach, success_response};
use super::types::MessageResponse;

/// GET /mappings
pub async fn list_mappings(
    service: web::Data<Arc<MappingService>>,
) -> ActixResult<HttpResponse> {
    Ok(api_result(service.list().await))
}

/// POST /mappings
pub async fn create_mapping(
    body: web::Json<NewMapping>,
    service: web::Data<Arc<MappingService>>,
) -> ActixResult<HttpResponse> {
    Ok(match service.create(body.into_inner()).await {
        Ok(mapping) => created_response(mapping),
        Err(e) => error_from_outreach(&e),
    })
}

/// DELETE /mappings/{id}
pub async fn delete_mapping(
    path: web::Path<String>,
    service: web::Data<Arc<MappingService>>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();
    Ok(match service.delete(&id).await {
        Ok(()) => success_response(MessageResponse {
            message: format!("Mapping {} deleted", id),
        }),
        Err(e) => error_from_outreach(&e),
    })
}
