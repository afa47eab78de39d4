//! Generate tracking link command

use colored::Colorize;

use crate::catalog::{Catalog, SimType};
use crate::interfaces::cli::CliError;
use crate::tracking::{TrackingLinkRequest, generate_tracking_link};

pub fn generate_link(
    catalog: &Catalog,
    subject_id: &str,
    country_code: &str,
    sim_type: &str,
    count: u32,
) -> Result<(), CliError> {
    let sim_type = SimType::parse(sim_type)?;
    let request = TrackingLinkRequest::new(subject_id, country_code, sim_type, count);
    let link = generate_tracking_link(catalog, &request)?;

    println!(
        "{} {} {}",
        "✓".bold().green(),
        format!("{} ({})", request.subject_id, request.medium()).cyan(),
        "->".dimmed()
    );
    println!("  {}", link.blue().underline());
    Ok(())
}
