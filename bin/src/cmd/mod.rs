//! CLI subcommand modules.
//!
//! This module contains the implementations for all findex CLI subcommands.

use clap::{Args, ValueEnum};
use findex_screen::ScreenCriteria;

pub(crate) mod backtest;
pub(crate) mod quotes;
pub(crate) mod scores;
pub(crate) mod serve;

/// Report output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Aligned text table
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Screening thresholds.
#[derive(Debug, Clone, Copy, Args)]
pub(crate) struct ScreenArgs {
    /// Minimum network-effects score
    #[arg(short = 'n', long, default_value_t = 0, allow_negative_numbers = true)]
    pub(crate) min_network: i32,

    /// Only founder-led companies
    #[arg(short, long)]
    pub(crate) founder_only: bool,
}

impl ScreenArgs {
    pub(crate) const fn criteria(&self) -> ScreenCriteria {
        ScreenCriteria::new(self.min_network, self.founder_only)
    }
}

/// Section rule used by the text reports.
pub(crate) fn print_rule(title: &str) {
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("{title}");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
}

/// Human-readable description of the screen.
pub(crate) fn describe(screen: &ScreenArgs) -> String {
    format!(
        "network score >= {}{}",
        screen.min_network,
        if screen.founder_only { ", founder-led only" } else { "" }
    )
}
