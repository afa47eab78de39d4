//! outreachdesk - admin core for influencer outreach campaigns
//!
//! Maps a country and SIM type to a marketing product URL, builds tracking
//! links, turns survey submissions into the 32-column dispatch spreadsheet
//! and tracks each generated sheet as a batch (`ready → downloaded → done`).
//!
//! # Architecture
//! - `catalog`: country/SIM catalog, CSV loader and keyword classifier
//! - `tracking`: tracking-link generation
//! - `mapping`: (country, days) → product mapping resolution
//! - `outreach`: influencer registry and email template records
//! - `dispatch`: dispatch rows, XLSX sheet builder/reader, batch lifecycle
//! - `storage`: repository trait with memory and JSON file backends
//! - `services`: business services shared by the API and the CLI
//! - `api`: HTTP admin API and health endpoints
//! - `interfaces`: CLI command implementations
//! - `config`: configuration loading (TOML + env)
//! - `runtime`: startup wiring and execution modes
//! - `system`: logging

pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod interfaces;
pub mod mapping;
pub mod outreach;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod tracking;
