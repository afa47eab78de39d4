//! CLI command implementations
//!
//! This module re-exports all CLI command functions.

mod catalog;
mod config_gen;
mod link;
mod sheet;

pub use catalog::*;
pub use config_gen::*;
pub use link::*;
pub use sheet::*;
