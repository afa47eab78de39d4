//! Admin API 问卷提交端点

use actix_web::{HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::services::{NewSubmission, NoticeRenderer, SubmissionService};

use super::helpers::{api_result, created_response, error_from_outreach};

/// GET /submissions
pub async fn list_submissions(
    service: web::Data<Arc<SubmissionService>>,
) -> ActixResult<HttpResponse> {
    Ok(api_result(service.list().await))
}

/// POST /submissions
pub async fn create_submission(
    body: web::Json<NewSubmission>,
    service: web::Data<Arc<SubmissionService>>,
) -> ActixResult<HttpResponse> {
    Ok(match service.create(body.into_inner()).await {
        Ok(submission) => created_response(submission),
        Err(e) => error_from_outreach(&e),
    })
}

/// GET /submissions/{id}
pub async fn get_submission(
    path: web::Path<String>,
    service: web::Data<Arc<SubmissionService>>,
) -> ActixResult<HttpResponse> {
    Ok(api_result(service.get(&path.into_inner()).await))
}

/// GET /submissions/{id}/notice
pub async fn get_submission_notice(
    path: web::Path<String>,
    service: web::Data<Arc<SubmissionService>>,
    renderer: web::Data<Arc<NoticeRenderer>>,
) -> ActixResult<HttpResponse> {
    let result = match service.get(&path.into_inner()).await {
        Ok(submission) => renderer.render_link_notice(&submission),
        Err(e) => Err(e),
    };
    Ok(api_result(result))
}
