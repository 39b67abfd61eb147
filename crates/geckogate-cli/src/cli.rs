//! CLI argument definitions for geckogate.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `markets` | One page of coins ranked by market cap |
//! | `favorites` | Market rows for a fixed set of coin ids |
//! | `details` | Full snapshot of one coin |
//! | `history` | Price, market-cap and volume history |
//! | `search` | Free-text search expanded into market rows |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--min-interval-ms` | env or `2000` | Minimum spacing between upstream calls |
//!
//! API keys are read from `COINGECKO_API_KEY_1`..`COINGECKO_API_KEY_3` or the
//! comma-separated `COINGECKO_API_KEYS`.
//!
//! # Examples
//!
//! ```bash
//! geckogate markets --per-page 20 --format table
//! geckogate history bitcoin --range 30d --pretty
//! geckogate search sol
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Paced CoinGecko market-data client.
///
/// Every upstream call goes through one FIFO pacing queue and rotates across
/// the configured API keys.
#[derive(Debug, Parser)]
#[command(name = "geckogate", author, version, about = "Paced CoinGecko market-data client")]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Override the minimum spacing between upstream calls.
    #[arg(long, global = true)]
    pub min_interval_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table for terminal display.
    Table,
    /// Single JSON document.
    Json,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List one page of coins ordered by market cap.
    ///
    /// # Examples
    ///
    ///   geckogate markets
    ///   geckogate markets --page 2 --per-page 100
    Markets(MarketsArgs),

    /// Show market rows for a set of coin ids.
    ///
    /// # Examples
    ///
    ///   geckogate favorites bitcoin ethereum solana
    Favorites(FavoritesArgs),

    /// Show the full snapshot of one coin.
    Details(DetailsArgs),

    /// Show price history for one coin.
    ///
    /// Supported ranges: 1d, 7d (default), 30d, 90d, 1y, max.
    History(HistoryArgs),

    /// Search coins by name or symbol.
    Search(SearchArgs),
}

#[derive(Debug, Args)]
pub struct MarketsArgs {
    /// Page number, starting at 1.
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Rows per page (1 to 250).
    #[arg(long, default_value_t = 50)]
    pub per_page: u32,
}

#[derive(Debug, Args)]
pub struct FavoritesArgs {
    /// Coin ids as used by CoinGecko (e.g. bitcoin, ethereum).
    #[arg(num_args = 0..)]
    pub ids: Vec<String>,
}

#[derive(Debug, Args)]
pub struct DetailsArgs {
    /// Coin id (e.g. bitcoin).
    pub id: String,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Coin id (e.g. bitcoin).
    pub id: String,

    /// Lookback window.
    #[arg(long, default_value = "7d")]
    pub range: String,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Free-form search query.
    #[arg(default_value = "")]
    pub query: String,
}
