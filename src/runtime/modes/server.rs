//! Server mode
//!
//! This module contains the HTTP server startup logic.
//! It configures and starts the HTTP server with all necessary routes.

use actix_cors::Cors;
use actix_web::{
    App, HttpServer,
    http::Method,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::Result;
use tracing::warn;

use crate::api::middleware::AdminAuth;
use crate::api::services::{AppStartTime, admin_v1_routes, health_routes};
use crate::config::StaticConfig;
use crate::runtime::lifetime::startup::{StartupContext, prepare_server_startup};

/// 上传的 XLSX 可能较大，默认 10 MiB
const MAX_PAYLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Build CORS middleware from configuration
///
/// 空列表保持浏览器同源策略；`"*"` 允许任意来源（不带 credentials）。
fn build_cors_middleware(allowed_origins: &[String]) -> Cors {
    if allowed_origins.is_empty() {
        return Cors::default();
    }

    let mut cors = Cors::default();
    if allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors.allowed_methods(vec![
        Method::GET,
        Method::POST,
        Method::PATCH,
        Method::DELETE,
        Method::HEAD,
    ])
    .allowed_header("Content-Type")
    .allowed_header("Authorization")
    .allowed_header("Accept")
    .max_age(3600)
}

/// 注册共享数据与路由
///
/// admin scope 包在 `AdminAuth` 里，health scope 不鉴权。
pub fn configure_services(
    cfg: &mut web::ServiceConfig,
    startup: &StartupContext,
    app_start_time: &AppStartTime,
) {
    let route = &startup.route_config;

    cfg.app_data(web::Data::new(startup.catalog.clone()))
        .app_data(web::Data::new(startup.repository.clone()))
        .app_data(web::Data::new(startup.link_service.clone()))
        .app_data(web::Data::new(startup.submission_service.clone()))
        .app_data(web::Data::new(startup.mapping_service.clone()))
        .app_data(web::Data::new(startup.dispatch_service.clone()))
        .app_data(web::Data::new(startup.stats_service.clone()))
        .app_data(web::Data::new(startup.influencer_service.clone()))
        .app_data(web::Data::new(startup.template_service.clone()))
        .app_data(web::Data::new(startup.notice_renderer.clone()))
        .app_data(web::Data::new(app_start_time.clone()))
        .app_data(web::PayloadConfig::new(MAX_PAYLOAD_BYTES))
        .service(
            web::scope(&route.admin_prefix)
                .wrap(AdminAuth::new(route.admin_token.clone()))
                .service(admin_v1_routes()),
        )
        .service(web::scope(&route.health_prefix).service(health_routes()));
}

/// Run the HTTP server
///
/// This function:
/// 1. Records startup time
/// 2. Prepares server components (catalog, storage, services)
/// 3. Configures and starts the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server(config: &StaticConfig) -> Result<()> {
    // Record application start time
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    let startup = prepare_server_startup(config).await.map_err(|e| {
        tracing::error!("Server startup failed: {}", e);
        e
    })?;

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    let cors_origins = config.api.cors_allowed_origins.clone();
    if cors_origins.is_empty() {
        warn!("CORS allowed_origins is empty, cross-origin requests will be rejected");
    }

    let server = HttpServer::new(move || {
        let cors = build_cors_middleware(&cors_origins);

        App::new()
            .wrap(cors)
            .wrap(Compress::default())
            .wrap(
                DefaultHeaders::new()
                    .add(("Connection", "keep-alive"))
                    .add(("Keep-Alive", "timeout=30, max=1000"))
                    .add(("Cache-Control", "no-cache, no-store, must-revalidate")),
            )
            .configure(|cfg| configure_services(cfg, &startup, &app_start_time))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .client_disconnect_timeout(std::time::Duration::from_millis(1000))
    .workers(cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);

    // actix 自带 SIGINT/SIGTERM 处理，文件后端每次写入即落盘
    server.bind(bind_address)?.run().await?;

    warn!("Server stopped");
    Ok(())
}
