//! CLI interface module
//!
//! One-shot commands that work on the catalog and sheet core without the
//! HTTP server or the repository.

pub mod commands;

use crate::cli::{Commands, ConfigCommands, SheetCommands};
use crate::config::StaticConfig;
use crate::runtime::lifetime::startup::load_catalog;
use commands::{config_generate, generate_link, show_catalog, sheet_sample, sheet_validate};
use std::fmt;

#[derive(Debug)]
pub enum CliError {
    CatalogError(String),
    ParseError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::CatalogError(msg) => format!("Catalog error: {}", msg),
            CliError::ParseError(msg) => format!("Parse error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::CatalogError(msg) => {
                format!("{} {}", "Catalog error:".red().bold(), msg.white())
            }
            CliError::ParseError(msg) => {
                format!("{} {}", "Parse error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<crate::errors::OutreachError> for CliError {
    fn from(err: crate::errors::OutreachError) -> Self {
        match err {
            crate::errors::OutreachError::Validation(msg) => CliError::ParseError(msg),
            other => CliError::CommandError(other.to_string()),
        }
    }
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(cmd: Commands, config: &StaticConfig) -> Result<(), CliError> {
    match cmd {
        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => config_generate(output_path, force).await,

        Commands::Sheet { action } => match action {
            SheetCommands::Sample { output_path } => sheet_sample(output_path).await,
            SheetCommands::Validate { file_path } => sheet_validate(file_path).await,
        },

        Commands::Link {
            subject_id,
            country_code,
            sim_type,
            count,
        } => {
            let catalog = load_catalog(&config.catalog)
                .map_err(|e| CliError::CatalogError(format!("{:#}", e)))?;
            generate_link(&catalog, &subject_id, &country_code, &sim_type, count)
        }

        Commands::Catalog { country, json } => {
            let catalog = load_catalog(&config.catalog)
                .map_err(|e| CliError::CatalogError(format!("{:#}", e)))?;
            show_catalog(&catalog, country.as_deref(), json)
        }

        Commands::Serve => Err(CliError::CommandError(
            "serve is not a one-shot command".to_string(),
        )),
    }
}
