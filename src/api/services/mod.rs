pub mod admin;
pub mod health;

pub use admin::admin_v1_routes;
pub use health::{AppStartTime, HealthService, health_routes};
