//! User interfaces (CLI)

pub mod cli;
