//! Admin API integration tests
//!
//! Runs the full route table (auth middleware included) against an
//! in-memory repository.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use serde_json::{Value, json};

use outreachdesk::api::services::AppStartTime;
use outreachdesk::catalog::Catalog;
use outreachdesk::config::{ApiConfig, StaticConfig};
use outreachdesk::dispatch::{DispatchSheet, XLSX_CONTENT_TYPE};
use outreachdesk::runtime::lifetime::startup::StartupContext;
use outreachdesk::runtime::modes::server::configure_services;
use outreachdesk::storage::{MemoryStorage, Repository};

const TOKEN: &str = "test-admin-token";

fn context_with_token(token: &str) -> StartupContext {
    let config = StaticConfig {
        api: ApiConfig {
            admin_token: token.to_string(),
            ..ApiConfig::default()
        },
        ..StaticConfig::default()
    };
    let repository: Arc<dyn Repository> = Arc::new(MemoryStorage::new());
    StartupContext::assemble(&config, Catalog::default_catalog(), repository)
}

fn start_time() -> AppStartTime {
    AppStartTime {
        start_datetime: chrono::Utc::now(),
    }
}

macro_rules! app {
    ($ctx:expr) => {{
        let ctx = $ctx;
        let started = start_time();
        test::init_service(App::new().configure(move |cfg: &mut web::ServiceConfig| {
            configure_services(cfg, &ctx, &started)
        }))
        .await
    }};
}

fn authed(req: TestRequest) -> TestRequest {
    req.insert_header(("Authorization", format!("Bearer {}", TOKEN)))
}

fn submission_body(naver_id: &str, country: &str, days: u32) -> Value {
    json!({
        "influencerEmail": format!("{}@example.com", naver_id),
        "naverId": naver_id,
        "name": "김철수",
        "country": country,
        "days": days,
        "desiredStartDate": "2024-02-01",
        "expectedPostDate": "2024-02-10",
        "adDisclosureAgree": true,
        "simType": "esim"
    })
}

// =============================================================================
// Auth
// =============================================================================

#[actix_rt::test]
async fn test_missing_or_wrong_token_is_unauthorized() {
    let app = app!(context_with_token(TOKEN));

    let req = TestRequest::get().uri("/admin/v1/stats").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1001);

    let req = TestRequest::get()
        .uri("/admin/v1/stats")
        .insert_header(("Authorization", "Bearer wrong"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_empty_token_disables_admin_api() {
    let app = app!(context_with_token(""));
    let req = authed(TestRequest::get().uri("/admin/v1/stats")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_health_is_unauthenticated() {
    let app = app!(context_with_token(TOKEN));
    let req = TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "healthy");
    assert_eq!(body["data"]["checks"]["storage"]["backend"], "memory");
    assert_eq!(body["data"]["checks"]["catalog"]["source"], "built-in defaults");

    let req = TestRequest::get().uri("/health/live").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

// =============================================================================
// Links & catalog
// =============================================================================

#[actix_rt::test]
async fn test_generate_link() {
    let app = app!(context_with_token(TOKEN));

    let req = authed(TestRequest::post().uri("/admin/v1/links/generate"))
        .set_json(json!({"subjectId": "jdh11830", "countryCode": "JP", "simType": "esim"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 0);
    let link = body["data"]["trackingLink"].as_str().unwrap();
    assert!(link.ends_with("nt_source=jdh11830&nt_medium=JPe1"));

    let req = authed(TestRequest::post().uri("/admin/v1/links/generate"))
        .set_json(json!({"subjectId": "x", "countryCode": "JP", "simType": "nano"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_catalog_routes() {
    let app = app!(context_with_token(TOKEN));

    let req = authed(TestRequest::get().uri("/admin/v1/catalog")).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let countries = body["data"].as_array().unwrap();
    assert!(countries.iter().any(|c| c["countryCode"] == "EU"));

    let req = authed(TestRequest::get().uri("/admin/v1/catalog/JP")).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let req = authed(TestRequest::get().uri("/admin/v1/catalog/ZZ")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Mappings & submissions
// =============================================================================

#[actix_rt::test]
async fn test_mapping_crud() {
    let app = app!(context_with_token(TOKEN));

    let req = authed(TestRequest::post().uri("/admin/v1/mappings"))
        .set_json(json!({
            "country": "JP",
            "simType": "esim",
            "planName": "KDDI 7일",
            "days": 7,
            "sellerProductCode": "ESAZB-JPKD007D_003GD"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let req = authed(TestRequest::get().uri("/admin/v1/mappings")).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let req = authed(TestRequest::delete().uri(&format!("/admin/v1/mappings/{}", id))).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = authed(TestRequest::delete().uri(&format!("/admin/v1/mappings/{}", id))).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_submission_gets_tracking_link_and_notice() {
    let app = app!(context_with_token(TOKEN));

    let req = authed(TestRequest::post().uri("/admin/v1/submissions"))
        .set_json(submission_body("blogger7", "VN", 5))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();
    let link = body["data"]["trackingLink"].as_str().unwrap();
    assert!(link.ends_with("nt_source=blogger7&nt_medium=VNe1"));

    let req = authed(TestRequest::get().uri(&format!("/admin/v1/submissions/{}", id))).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["naverId"], "blogger7");

    let req = authed(TestRequest::get().uri(&format!("/admin/v1/submissions/{}/notice", id)))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["data"]["subject"].as_str().unwrap().contains("김철수"));
    assert!(body["data"]["html"].as_str().unwrap().contains("nt_medium=VNe1"));

    let req = authed(TestRequest::get().uri("/admin/v1/submissions/unknown")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Dispatch
// =============================================================================

#[actix_rt::test]
async fn test_dispatch_flow() {
    let app = app!(context_with_token(TOKEN));

    let mut ids = Vec::new();
    for naver_id in ["a1", "a2"] {
        let req = authed(TestRequest::post().uri("/admin/v1/submissions"))
            .set_json(submission_body(naver_id, "JP", 7))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        ids.push(body["data"]["id"].as_str().unwrap().to_string());
    }

    // 空列表
    let req = authed(TestRequest::post().uri("/admin/v1/dispatch/sheets"))
        .set_json(json!({"submissionIds": []}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = authed(TestRequest::post().uri("/admin/v1/dispatch/sheets"))
        .set_json(json!({"submissionIds": ids}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["submissionCount"], 2);
    let batch_id = body["data"]["batchId"].as_str().unwrap().to_string();
    let file_name = body["data"]["fileName"].as_str().unwrap().to_string();

    // 下载
    let req = authed(TestRequest::get().uri(&format!(
        "/admin/v1/dispatch/batches/{}/sheet",
        batch_id
    )))
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap(),
        XLSX_CONTENT_TYPE
    );
    let disposition = resp
        .headers()
        .get("Content-Disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains(&file_name));
    let bytes = test::read_body(resp).await;
    assert_eq!(outreachdesk::dispatch::read_rows(&bytes).unwrap().len(), 2);

    // 状态
    let req = authed(TestRequest::patch().uri(&format!("/admin/v1/dispatch/batches/{}", batch_id)))
        .set_json(json!({"status": "downloaded"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["status"], "downloaded");

    let req = authed(TestRequest::patch().uri(&format!("/admin/v1/dispatch/batches/{}", batch_id)))
        .set_json(json!({"status": "bogus"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = authed(TestRequest::patch().uri(&format!("/admin/v1/dispatch/batches/{}", batch_id)))
        .set_json(json!({"status": "ready"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = authed(TestRequest::get().uri("/admin/v1/dispatch/batches")).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let batches = body["data"].as_array().unwrap();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0]["status"], "downloaded");

    let req = authed(TestRequest::get().uri("/admin/v1/stats")).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["newSubmissions"], 2);
    assert_eq!(body["data"]["pendingDispatches"], 1);
}

#[actix_rt::test]
async fn test_validate_and_sample_sheets() {
    let app = app!(context_with_token(TOKEN));

    let req = authed(TestRequest::get().uri("/admin/v1/dispatch/sample")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let sample = test::read_body(resp).await;
    assert!(!sample.is_empty());

    let req = authed(TestRequest::post().uri("/admin/v1/dispatch/validate"))
        .set_payload(DispatchSheet::sample().to_xlsx().unwrap())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["valid"], true);
    assert_eq!(body["data"]["rowCount"], 1);

    let req = authed(TestRequest::post().uri("/admin/v1/dispatch/validate"))
        .set_payload("plain text".as_bytes().to_vec())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["valid"], false);
    assert_eq!(body["data"]["rowCount"], 0);
}

#[actix_rt::test]
async fn test_create_sheet_can_return_the_file() {
    let app = app!(context_with_token(TOKEN));

    let req = authed(TestRequest::post().uri("/admin/v1/submissions"))
        .set_json(submission_body("f1", "TH", 3))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let req = authed(TestRequest::post().uri("/admin/v1/dispatch/sheets?format=xlsx"))
        .set_json(json!({"submissionIds": [id]}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap(),
        XLSX_CONTENT_TYPE
    );
    let batch_id = resp
        .headers()
        .get("X-Batch-Id")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let bytes = test::read_body(resp).await;
    assert_eq!(outreachdesk::dispatch::read_rows(&bytes).unwrap().len(), 1);

    let req = authed(TestRequest::get().uri(&format!(
        "/admin/v1/dispatch/batches/{}/sheet",
        batch_id
    )))
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = authed(TestRequest::post().uri("/admin/v1/dispatch/sheets?format=csv"))
        .set_json(json!({"submissionIds": ["x"]}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Influencers & email templates
// =============================================================================

#[actix_rt::test]
async fn test_influencer_registry() {
    let app = app!(context_with_token(TOKEN));

    let mut first_id = String::new();
    for email in ["one@naver.com", "two@naver.com"] {
        let req = authed(TestRequest::post().uri("/admin/v1/influencers"))
            .set_json(json!({
                "name": "최유나",
                "email": email,
                "blogUrl": "https://blog.naver.com/yuna",
                "tags": ["여행"]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["platform"], "naver");
        if first_id.is_empty() {
            first_id = body["data"]["id"].as_str().unwrap().to_string();
        }
    }

    let req = authed(TestRequest::post().uri("/admin/v1/influencers"))
        .set_json(json!({"email": "one@naver.com", "blogUrl": "https://blog.naver.com/x"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1009);

    let req = authed(TestRequest::post().uri("/admin/v1/influencers"))
        .set_json(json!({"email": "three@naver.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = authed(TestRequest::get().uri("/admin/v1/influencers?limit=1")).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let req = authed(TestRequest::get().uri(&format!(
        "/admin/v1/influencers/{}/proposal?blogName=Yuna%20Travel&surveyUrl=https%3A%2F%2Fforms.example.com%2Fs",
        first_id
    )))
    .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["data"]["subject"].as_str().unwrap().contains("최유나"));
    let html = body["data"]["html"].as_str().unwrap();
    assert!(html.contains("Yuna Travel"));
    assert!(html.contains("https://forms.example.com/s"));

    // 未配置问卷链接且未传入
    let req = authed(TestRequest::get().uri(&format!(
        "/admin/v1/influencers/{}/proposal",
        first_id
    )))
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = authed(TestRequest::get().uri("/admin/v1/influencers/unknown/proposal")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_email_templates() {
    let app = app!(context_with_token(TOKEN));

    let req = authed(TestRequest::post().uri("/admin/v1/email/templates"))
        .set_json(json!({
            "name": "link-follow-up",
            "subject": "{name}님 링크 안내",
            "body": "<a href=\"{link}\">{name}</a>",
            "type": "link",
            "variables": ["name", "link"]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["isActive"], true);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let req = authed(TestRequest::post().uri("/admin/v1/email/templates"))
        .set_json(json!({"name": "x", "subject": "s", "body": "b", "type": "newsletter"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = authed(TestRequest::get().uri("/admin/v1/email/templates")).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["type"], "link");

    let req = authed(TestRequest::post().uri(&format!(
        "/admin/v1/email/templates/{}/render",
        id
    )))
    .set_json(json!({"variables": {"name": "한솔", "link": "https://x.example/?a=1&b=2"}}))
    .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["subject"], "한솔님 링크 안내");
    assert_eq!(
        body["data"]["html"],
        "<a href=\"https://x.example/?a=1&amp;b=2\">한솔</a>"
    );

    let req = authed(TestRequest::post().uri("/admin/v1/email/templates/unknown/render"))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
