//! Scores command implementation.

use anyhow::Result;
use findex_traits::ScoredStock;

use super::{OutputFormat, ScreenArgs, describe, print_rule};
use crate::settings::Settings;

/// Print the catalog rows meeting the thresholds. No prices are fetched.
pub(crate) fn show_scores(settings: &Settings, screen: &ScreenArgs, format: OutputFormat) -> Result<()> {
    let catalog = settings.catalog()?;
    let criteria = screen.criteria();
    let rows: Vec<&ScoredStock> = catalog
        .stocks()
        .iter()
        .filter(|s| criteria.matches(s))
        .collect();

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!();
    print_rule(&format!("CATALOG ({})", describe(screen)));
    println!(
        "{:<8} {:<28} {:>5} {:>7}  {}",
        "Symbol", "Name", "Score", "Founder", "Sector"
    );
    println!("{}", "─".repeat(76));
    for stock in &rows {
        let name: String = stock.name.chars().take(28).collect();
        println!(
            "{:<8} {:<28} {:>5} {:>7}  {}",
            stock.symbol,
            name,
            stock.network_score,
            if stock.founder_led { "yes" } else { "no" },
            stock.sector
        );
    }
    println!();
    println!("{} of {} stocks", rows.len(), catalog.len());
    println!();
    Ok(())
}
