//! Backtest command implementation.

use anyhow::Result;
use findex_eval::BacktestResult;

use super::{OutputFormat, ScreenArgs, describe, print_rule};
use crate::settings::Settings;

/// Backtest the screened portfolio against the benchmark and print it.
pub(crate) async fn run_backtest(
    settings: &Settings,
    screen: &ScreenArgs,
    years: u32,
    format: OutputFormat,
) -> Result<()> {
    let state = settings.app_state(settings.report_config())?;
    let result = state.backtest(&screen.criteria(), years).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => print_report(&result, screen, state.benchmark()),
    }
    Ok(())
}

fn print_report(result: &BacktestResult, screen: &ScreenArgs, benchmark: &str) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                  Equal-Weight Backtest                       ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("Screen:    {}", describe(screen));
    println!("Benchmark: {benchmark}");
    match (result.points.first(), result.points.last()) {
        (Some(first), Some(last)) => println!("Period:    {} to {}", first.date, last.date),
        _ => println!("Period:    n/a"),
    }
    println!("Stocks:    {}", result.stock_count);
    println!();

    if result.points.is_empty() {
        println!("No qualifying stocks with price history.");
        println!();
        return;
    }

    print_rule("BACKTEST RESULTS");
    println!("{:<22} {:>12} {:>12}", "", "Portfolio", benchmark);
    println!("{}", "─".repeat(48));
    println!(
        "{:<22} {:>11.2}% {:>11.2}%",
        "Total Return:", result.portfolio_return, result.benchmark_return
    );
    println!(
        "{:<22} {:>11.2}% {:>11.2}%",
        "CAGR:", result.portfolio_cagr, result.benchmark_cagr
    );
    println!();

    println!("{:<10} {:>12} {:>12}", "Month", "Portfolio", benchmark);
    println!("{}", "─".repeat(36));
    // one row per year, ending at the latest month
    let yearly: Vec<_> = result.points.iter().rev().step_by(12).collect();
    for point in yearly.into_iter().rev() {
        println!(
            "{:<10} {:>12.2} {:>12.2}",
            point.date.to_string(),
            point.portfolio_value,
            point.benchmark_value
        );
    }
    println!();

    println!("Symbols: {}", result.symbols.join(", "));
    println!();
}
