//! HTTP 接口：admin API 与健康检查

pub mod middleware;
pub mod services;
