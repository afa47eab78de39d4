//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for outreachdesk using clap's derive macros.

use clap::{Parser, Subcommand};

/// outreachdesk - influencer outreach admin service
#[derive(Parser)]
#[command(name = "outreachdesk")]
#[command(version)]
#[command(about = "Tracking links, dispatch sheets and batch tracking for influencer outreach", long_about = None)]
pub struct Cli {
    /// Configuration file path (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Generate a tracking link
    Link {
        /// Subject (influencer) id, used as nt_source
        subject_id: String,

        /// Country code, e.g. JP
        country_code: String,

        /// SIM type: esim or usim
        #[arg(default_value = "esim")]
        sim_type: String,

        /// Dispatch count encoded in nt_medium
        #[arg(long, default_value_t = 1)]
        count: u32,
    },

    /// Show the country/SIM catalog
    Catalog {
        /// Only show entries of this country
        country: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Dispatch sheet utilities
    Sheet {
        #[command(subcommand)]
        action: SheetCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Dispatch sheet commands
#[derive(Subcommand)]
pub enum SheetCommands {
    /// Write the sample dispatch sheet
    Sample {
        /// Output path (default: dispatch_sample.xlsx)
        output_path: Option<String>,
    },

    /// Check that an XLSX file carries the required dispatch headers
    Validate {
        /// Input file path
        file_path: String,
    },
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Force overwrite without confirmation
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_server() {
        let cli = Cli::try_parse_from(["outreachdesk"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_link_defaults() {
        let cli = Cli::try_parse_from(["outreachdesk", "-c", "od.toml", "link", "kim", "JP"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some("od.toml"));
        match cli.command {
            Some(Commands::Link {
                subject_id,
                country_code,
                sim_type,
                count,
            }) => {
                assert_eq!(subject_id, "kim");
                assert_eq!(country_code, "JP");
                assert_eq!(sim_type, "esim");
                assert_eq!(count, 1);
            }
            _ => panic!("expected link command"),
        }
    }

    #[test]
    fn test_sheet_validate() {
        let cli =
            Cli::try_parse_from(["outreachdesk", "sheet", "validate", "in.xlsx"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Sheet {
                action: SheetCommands::Validate { .. }
            })
        ));
    }
}
