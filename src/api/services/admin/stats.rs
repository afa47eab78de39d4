use actix_web::{HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::services::StatsService;

use super::helpers::api_result;

/// GET /stats
pub async fn get_stats(service: web::Data<Arc<StatsService>>) -> ActixResult<HttpResponse> {
    Ok(api_result(service.stats().await))
}
