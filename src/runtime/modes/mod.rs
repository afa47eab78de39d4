//! Mode routing
//!
//! - Server mode (HTTP server)
//! - CLI mode (one-shot commands)
//!
//! The mode selection is based on the parsed subcommand.

pub mod cli;
pub mod server;

pub use cli::run_cli;
pub use server::run_server;
