//! Show catalog command

use colored::Colorize;

use crate::catalog::Catalog;
use crate::interfaces::cli::CliError;

pub fn show_catalog(catalog: &Catalog, country: Option<&str>, json: bool) -> Result<(), CliError> {
    if let Some(country) = country {
        let entries = catalog.entries_for(country);
        if entries.is_empty() {
            return Err(CliError::CommandError(format!(
                "No catalog entries for country '{}'",
                country
            )));
        }

        if json {
            let out = serde_json::to_string_pretty(&entries)
                .map_err(|e| CliError::CommandError(e.to_string()))?;
            println!("{}", out);
            return Ok(());
        }

        println!("{}", format!("Catalog entries for {}:", country).bold().green());
        for entry in entries {
            println!(
                "  {} {} {} {}",
                entry.sim_type.to_string().cyan(),
                entry.product_name,
                "->".dimmed(),
                entry.base_url.blue().underline()
            );
        }
        return Ok(());
    }

    let summaries = catalog.summaries();
    if json {
        let out = serde_json::to_string_pretty(&summaries)
            .map_err(|e| CliError::CommandError(e.to_string()))?;
        println!("{}", out);
        return Ok(());
    }

    println!("{}", format!("Catalog ({})", catalog.source()).bold().green());
    println!();
    for summary in &summaries {
        let sims: Vec<String> = summary.sim_types.iter().map(|s| s.to_string()).collect();
        println!(
            "  {} {} {}",
            summary.country_code.cyan(),
            summary.country_name,
            format!("[{}]", sims.join(", ")).dimmed()
        );
    }
    println!();
    println!(
        "{} Total {} countries, {} entries",
        "ℹ".bold().blue(),
        summaries.len().to_string().green(),
        catalog.len().to_string().green()
    );
    Ok(())
}
