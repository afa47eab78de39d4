//! Dispatch sheet commands

use colored::Colorize;

use crate::dispatch::{DispatchSheet, read_rows, validate_headers};
use crate::interfaces::cli::CliError;

/// Write the sample sheet to disk
pub async fn sheet_sample(output_path: Option<String>) -> Result<(), CliError> {
    let path = output_path.unwrap_or_else(|| "dispatch_sample.xlsx".to_string());
    let bytes = DispatchSheet::sample().to_xlsx()?;

    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|e| CliError::CommandError(format!("Failed to write {}: {}", path, e)))?;

    println!(
        "{} {} {}",
        "✓".bold().green(),
        "Sample dispatch sheet written to".green(),
        path.blue()
    );
    Ok(())
}

/// Check required headers and count data rows
pub async fn sheet_validate(file_path: String) -> Result<(), CliError> {
    let bytes = tokio::fs::read(&file_path)
        .await
        .map_err(|e| CliError::CommandError(format!("Failed to read {}: {}", file_path, e)))?;

    if !validate_headers(&bytes) {
        return Err(CliError::ParseError(format!(
            "{} is not a valid dispatch sheet (missing required headers)",
            file_path
        )));
    }

    let rows = read_rows(&bytes)?;
    println!(
        "{} {} {}",
        "✓".bold().green(),
        file_path.blue(),
        format!("is valid ({} rows)", rows.len()).green()
    );
    Ok(())
}
