//! Admin API 发货表格与批次端点

use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{HttpResponse, Result as ActixResult, web};
use std::sync::Arc;
use tracing::{info, warn};

use crate::dispatch::{DispatchSheet, read_rows, validate_headers};
use crate::errors::OutreachError;
use crate::services::{DispatchService, DispatchSummary};

use super::helpers::{api_result, error_from_outreach, success_response, xlsx_response};
use super::types::{
    CreateDispatchRequest, CreateSheetQuery, UpdateBatchStatusRequest, ValidateSheetResponse,
};

const SAMPLE_FILE_NAME: &str = "dispatch_sample.xlsx";
const BATCH_ID_HEADER: &str = "x-batch-id";

/// POST /dispatch/sheets[?format=xlsx]
///
/// 默认返回批次摘要；`format=xlsx` 直接返回刚生成的表格文件，
/// 批次 ID 放在 `X-Batch-Id` 响应头
pub async fn create_sheet(
    query: web::Query<CreateSheetQuery>,
    body: web::Json<CreateDispatchRequest>,
    service: web::Data<Arc<DispatchService>>,
) -> ActixResult<HttpResponse> {
    let as_file = match query.format.as_deref() {
        None | Some("json") => false,
        Some("xlsx") => true,
        Some(other) => {
            return Ok(error_from_outreach(&OutreachError::validation(format!(
                "Invalid format: '{}'. Valid: json, xlsx",
                other
            ))));
        }
    };

    let request = body.into_inner();
    Ok(match service.generate(&request.submission_ids).await {
        Ok(generated) => {
            info!(
                "Admin API: dispatch batch {} created ({} bytes)",
                generated.batch.id,
                generated.bytes.len()
            );
            if as_file {
                let summary = DispatchSummary::from(&generated);
                let mut response = xlsx_response(&summary.file_name, generated.bytes);
                if let Ok(value) = HeaderValue::from_str(&summary.batch_id) {
                    response
                        .headers_mut()
                        .insert(HeaderName::from_static(BATCH_ID_HEADER), value);
                }
                response
            } else {
                success_response(DispatchSummary::from(&generated))
            }
        }
        Err(e) => error_from_outreach(&e),
    })
}

/// POST /dispatch/validate
///
/// 请求体为原始 XLSX 字节
pub async fn validate_sheet(body: web::Bytes) -> ActixResult<HttpResponse> {
    let valid = validate_headers(&body);
    let row_count = if valid {
        match read_rows(&body) {
            Ok(rows) => rows.len(),
            Err(e) => {
                warn!("Admin API: sheet headers valid but rows unreadable: {}", e);
                0
            }
        }
    } else {
        0
    };

    Ok(success_response(ValidateSheetResponse { valid, row_count }))
}

/// GET /dispatch/sample
pub async fn sample_sheet() -> ActixResult<HttpResponse> {
    Ok(match DispatchSheet::sample().to_xlsx() {
        Ok(bytes) => xlsx_response(SAMPLE_FILE_NAME, bytes),
        Err(e) => error_from_outreach(&e),
    })
}

/// GET /dispatch/batches
pub async fn list_batches(
    service: web::Data<Arc<DispatchService>>,
) -> ActixResult<HttpResponse> {
    Ok(api_result(service.list_batches().await))
}

/// GET /dispatch/batches/{id}/sheet
pub async fn download_batch_sheet(
    path: web::Path<String>,
    service: web::Data<Arc<DispatchService>>,
) -> ActixResult<HttpResponse> {
    Ok(match service.render_sheet(&path.into_inner()).await {
        Ok((batch, bytes)) => xlsx_response(&batch.file_name, bytes),
        Err(e) => error_from_outreach(&e),
    })
}

/// PATCH /dispatch/batches/{id}
pub async fn update_batch_status(
    path: web::Path<String>,
    body: web::Json<UpdateBatchStatusRequest>,
    service: web::Data<Arc<DispatchService>>,
) -> ActixResult<HttpResponse> {
    let batch_id = path.into_inner();
    Ok(api_result(
        service.update_status(&batch_id, &body.status).await,
    ))
}
