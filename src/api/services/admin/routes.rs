//! Admin API 路由配置
//!
//! 将 /v1 下的路由按功能模块拆分。

use actix_web::web;

use super::dispatch::{
    create_sheet, download_batch_sheet, list_batches, sample_sheet, update_batch_status,
    validate_sheet,
};
use super::influencers::{
    create_influencer, get_influencer, get_proposal_notice, list_influencers,
};
use super::links::{generate_link, get_country_entries, list_countries};
use super::mappings::{create_mapping, delete_mapping, list_mappings};
use super::stats::get_stats;
use super::submissions::{
    create_submission, get_submission, get_submission_notice, list_submissions,
};
use super::templates::{create_template, list_templates, render_template};

/// 追踪链接路由 `/links`
pub fn links_routes() -> actix_web::Scope {
    web::scope("/links").route("/generate", web::post().to(generate_link))
}

/// 目录路由 `/catalog`
///
/// 包含：
/// - GET /catalog - 国家代码及其 SIM 类型
/// - GET /catalog/{country} - 单个国家的商品条目
pub fn catalog_routes() -> actix_web::Scope {
    web::scope("/catalog")
        .route("", web::get().to(list_countries))
        .route("/{country}", web::get().to(get_country_entries))
}

/// 商品映射路由 `/mappings`
pub fn mappings_routes() -> actix_web::Scope {
    web::scope("/mappings")
        .route("", web::get().to(list_mappings))
        .route("", web::post().to(create_mapping))
        .route("/{id}", web::delete().to(delete_mapping))
}

/// 问卷提交路由 `/submissions`
///
/// 包含：
/// - GET/POST /submissions
/// - GET /submissions/{id}
/// - GET /submissions/{id}/notice - 链接通知邮件预览
pub fn submissions_routes() -> actix_web::Scope {
    web::scope("/submissions")
        .route("", web::get().to(list_submissions))
        .route("", web::post().to(create_submission))
        .route("/{id}/notice", web::get().to(get_submission_notice))
        .route("/{id}", web::get().to(get_submission))
}

/// 发货路由 `/dispatch`
///
/// 包含：
/// - POST /dispatch/sheets - 生成发货表格并创建批次
/// - POST /dispatch/validate - 校验上传的 XLSX
/// - GET /dispatch/sample - 样例表格
/// - GET /dispatch/batches - 批次列表
/// - GET /dispatch/batches/{id}/sheet - 下载批次表格
/// - PATCH /dispatch/batches/{id} - 更新批次状态
pub fn dispatch_routes() -> actix_web::Scope {
    web::scope("/dispatch")
        .route("/sheets", web::post().to(create_sheet))
        .route("/validate", web::post().to(validate_sheet))
        .route("/sample", web::get().to(sample_sheet))
        .route("/batches", web::get().to(list_batches))
        .route("/batches/{id}/sheet", web::get().to(download_batch_sheet))
        .route("/batches/{id}", web::patch().to(update_batch_status))
}

/// 博主名册路由 `/influencers`
///
/// 包含：
/// - GET/POST /influencers
/// - GET /influencers/{id}
/// - GET /influencers/{id}/proposal - 合作提案邮件预览
pub fn influencers_routes() -> actix_web::Scope {
    web::scope("/influencers")
        .route("", web::get().to(list_influencers))
        .route("", web::post().to(create_influencer))
        .route("/{id}/proposal", web::get().to(get_proposal_notice))
        .route("/{id}", web::get().to(get_influencer))
}

/// 邮件模板路由 `/email/templates`
pub fn email_routes() -> actix_web::Scope {
    web::scope("/email/templates")
        .route("", web::get().to(list_templates))
        .route("", web::post().to(create_template))
        .route("/{id}/render", web::post().to(render_template))
}

/// 统计路由 `/stats`
pub fn stats_routes() -> actix_web::Scope {
    web::scope("/stats")
        .route("", web::get().to(get_stats))
        .route("", web::head().to(get_stats))
}

/// Admin API v1 路由
///
/// 组合所有子模块路由
pub fn admin_v1_routes() -> actix_web::Scope {
    web::scope("/v1")
        .service(links_routes())
        .service(catalog_routes())
        .service(mappings_routes())
        .service(submissions_routes())
        .service(dispatch_routes())
        .service(influencers_routes())
        .service(email_routes())
        .service(stats_routes())
}
