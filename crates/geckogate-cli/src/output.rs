use std::fmt::Write as _;
use std::io::{self, Write};

use geckogate_core::{CoinId, HistorySeries, MarketSnapshot, TimeRange, UtcDateTime};
use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::commands::CommandResult;
use crate::error::CliError;
use crate::format;

pub fn render(result: &CommandResult, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    let rendered = match format {
        OutputFormat::Json => {
            let value = to_json(result)?;
            if pretty {
                serde_json::to_string_pretty(&value)?
            } else {
                serde_json::to_string(&value)?
            }
        }
        OutputFormat::Table => render_table(result),
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}")?;
    Ok(())
}

fn to_json(result: &CommandResult) -> Result<Value, CliError> {
    let value = match result {
        CommandResult::Coins(coins) => serde_json::to_value(coins)?,
        CommandResult::Coin(coin) => serde_json::to_value(coin)?,
        CommandResult::History { id, range, series } => json!({
            "id": id,
            "range": range,
            "series": series,
        }),
    };
    Ok(value)
}

fn render_table(result: &CommandResult) -> String {
    match result {
        CommandResult::Coins(coins) => coins_table(coins),
        CommandResult::Coin(coin) => coin_sheet(coin),
        CommandResult::History { id, range, series } => history_table(id, *range, series),
    }
}

fn coins_table(coins: &[MarketSnapshot]) -> String {
    if coins.is_empty() {
        return String::from("no coins found");
    }

    let mut out = format!(
        "{:>5}  {:<24} {:<8} {:>18} {:>9} {:>9} {:>12}",
        "RANK", "NAME", "SYMBOL", "PRICE", "24H", "7D", "MARKET CAP"
    );
    for coin in coins {
        let rank = coin
            .market_cap_rank
            .map_or_else(|| String::from("-"), |rank| rank.to_string());
        let _ = write!(
            out,
            "\n{:>5}  {:<24} {:<8} {:>18} {:>9} {:>9} {:>12}",
            rank,
            clip(&coin.name, 24),
            coin.symbol.to_uppercase(),
            format::price(coin.current_price),
            format::percentage(coin.price_change_percentage_24h),
            format::percentage(coin.price_change_percentage_7d),
            format::market_cap(coin.market_cap),
        );
    }
    out
}

fn coin_sheet(coin: &MarketSnapshot) -> String {
    let mut rows = vec![
        ("name", format!("{} ({})", coin.name, coin.symbol.to_uppercase())),
        ("id", coin.id.to_string()),
        (
            "rank",
            coin.market_cap_rank
                .map_or_else(|| String::from("-"), |rank| rank.to_string()),
        ),
        ("price", format::price(coin.current_price)),
        ("24h", format::percentage(coin.price_change_percentage_24h)),
        ("7d", format::percentage(coin.price_change_percentage_7d)),
        ("market cap", format::market_cap(coin.market_cap)),
        ("circulating", format::amount(coin.circulating_supply)),
        ("total supply", format::amount(coin.total_supply)),
        ("max supply", format::supply(coin.max_supply)),
    ];

    if let Some(categories) = coin.categories.as_ref().filter(|c| !c.is_empty()) {
        rows.push(("categories", categories.join(", ")));
    }
    if let Some(homepage) = coin
        .links
        .as_ref()
        .and_then(|links| links.homepage.first())
    {
        rows.push(("homepage", homepage.clone()));
    }
    if let Some(updated) = coin.last_updated {
        rows.push(("updated", updated.to_string()));
    }

    let mut out = rows
        .iter()
        .map(|(label, value)| format!("{label:<13}: {value}"))
        .collect::<Vec<_>>()
        .join("\n");

    if let Some(description) = &coin.description {
        let _ = write!(out, "\n\n{description}");
    }
    out
}

fn history_table(id: &CoinId, range: TimeRange, series: &HistorySeries) -> String {
    let mut out = format!("{id} price history ({range}, {} points)", series.prices().len());
    for point in series.prices() {
        let at = UtcDateTime::from_unix_millis(point.timestamp_ms)
            .map_or_else(|| point.timestamp_ms.to_string(), |at| at.to_string());
        let _ = write!(out, "\n{at:<30} {:>18}", format::price(Some(point.value)));
    }
    out
}

fn clip(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => text[..cut].to_owned(),
        None => text.to_owned(),
    }
}
