//! Findex CLI binary.
//!
//! Runs the screening HTTP service and the same screen, quote and backtest
//! reports from the command line.

mod cmd;
mod logging;
mod settings;

use std::net::SocketAddr;
use std::process;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use findex_traits::LOOKBACK_YEARS;

use cmd::backtest::run_backtest;
use cmd::quotes::show_quotes;
use cmd::scores::show_scores;
use cmd::serve::run_serve;
use cmd::{OutputFormat, ScreenArgs};
use logging::{LogFormat, init_logging};
use settings::Settings;

#[derive(Parser)]
#[command(name = "findex")]
#[command(about = "Network-effects stock screen with an equal-weight backtest", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    /// Log output format
    #[arg(long, global = true, value_enum, env = "FINDEX_LOG_FORMAT", default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service
    Serve {
        /// Address to listen on
        #[arg(long, env = "FINDEX_BIND", default_value = "0.0.0.0:8457")]
        bind: SocketAddr,

        /// Warm the price cache at startup
        #[arg(long, env = "FINDEX_PREFETCH", default_value_t = true, action = ArgAction::Set)]
        prefetch: bool,
    },

    /// Backtest the screened portfolio against the benchmark
    Backtest {
        #[command(flatten)]
        screen: ScreenArgs,

        /// Lookback in years (0 means the default)
        #[arg(short, long, default_value_t = LOOKBACK_YEARS)]
        years: u32,

        /// Output format (text or json)
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show latest prices and trailing returns of the screened stocks
    Quotes {
        #[command(flatten)]
        screen: ScreenArgs,

        /// Output format (text or json)
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List the scored catalog
    Scores {
        #[command(flatten)]
        screen: ScreenArgs,

        /// Output format (text or json)
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.log_format)?;

    match cli.command {
        Commands::Serve { bind, prefetch } => {
            run_serve(&cli.settings, bind, prefetch).await?;
        }
        Commands::Backtest {
            screen,
            years,
            format,
        } => {
            run_backtest(&cli.settings, &screen, years, format).await?;
        }
        Commands::Quotes { screen, format } => {
            show_quotes(&cli.settings, &screen, format).await?;
        }
        Commands::Scores { screen, format } => {
            show_scores(&cli.settings, &screen, format)?;
        }
    }

    Ok(())
}
