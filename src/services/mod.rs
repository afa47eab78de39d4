//! Service layer for business logic
//!
//! Shared between the HTTP API and the CLI; the core modules stay free of
//! I/O and these services wire them to the repository.

mod dispatch_service;
mod influencer_service;
mod link_service;
mod mapping_service;
mod notice;
mod stats_service;
mod submission_service;
mod template_service;

pub use dispatch_service::*;
pub use influencer_service::*;
pub use link_service::*;
pub use mapping_service::*;
pub use notice::*;
pub use stats_service::*;
pub use submission_service::*;
pub use template_service::*;
