//! Quotes command implementation.

use anyhow::Result;

use super::{OutputFormat, ScreenArgs, describe, print_rule};
use crate::settings::Settings;

/// Print latest prices and trailing returns of the screened stocks.
pub(crate) async fn show_quotes(
    settings: &Settings,
    screen: &ScreenArgs,
    format: OutputFormat,
) -> Result<()> {
    let state = settings.app_state(settings.report_config())?;
    let quotes = state.quotes(&screen.criteria()).await;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&quotes)?);
        return Ok(());
    }

    println!();
    print_rule(&format!("QUOTES ({})", describe(screen)));
    println!(
        "{:<8} {:<28} {:>5} {:>7} {:>10} {:>9} {:>9}",
        "Symbol", "Name", "Score", "Founder", "Price", "1Y %", "5Y %"
    );
    println!("{}", "─".repeat(82));
    for quote in &quotes {
        let name: String = quote.name.chars().take(28).collect();
        println!(
            "{:<8} {:<28} {:>5} {:>7} {:>10.2} {:>9.2} {:>9.2}",
            quote.symbol,
            name,
            quote.network_score,
            if quote.founder_led { "yes" } else { "no" },
            quote.price,
            quote.return_1y,
            quote.return_5y
        );
    }
    println!();
    println!("{} stocks priced", quotes.len());
    println!();
    Ok(())
}
