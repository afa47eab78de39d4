//! Admin API 服务模块
//!
//! 该模块包含管理 API 的所有端点：
//! - 追踪链接生成与目录查询
//! - 商品映射 CRUD
//! - 问卷提交与链接通知预览
//! - 发货表格、批次状态
//! - 博主名册、提案邮件与邮件模板
//! - 仪表盘统计

mod dispatch;
pub mod error_code;
mod helpers;
mod influencers;
mod links;
mod mappings;
pub mod routes;
mod stats;
mod submissions;
mod templates;
mod types;

// 重新导出类型
pub use types::*;

// 重新导出帮助函数
pub use helpers::{
    api_result, created_response, error_from_outreach, error_response, json_response,
    success_response, xlsx_response,
};

// 重新导出错误码
pub use error_code::ErrorCode;

pub use routes::admin_v1_routes;
