mod details;
mod favorites;
mod history;
mod markets;
mod search;

use std::sync::Arc;
use std::time::Duration;

use geckogate_core::{
    CoinId, GatewayConfig, HistorySeries, MarketGateway, MarketSnapshot, ReqwestHttpClient,
    TimeRange,
};
use tracing::debug;

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Typed result of one command, rendered by [`crate::output`].
#[derive(Debug)]
pub enum CommandResult {
    Coins(Vec<MarketSnapshot>),
    Coin(Box<MarketSnapshot>),
    History {
        id: CoinId,
        range: TimeRange,
        series: HistorySeries,
    },
}

pub async fn run(cli: &Cli) -> Result<CommandResult, CliError> {
    let gateway = build_gateway(cli)?;

    match &cli.command {
        Command::Markets(args) => markets::run(args, &gateway).await,
        Command::Favorites(args) => favorites::run(args, &gateway).await,
        Command::Details(args) => details::run(args, &gateway).await,
        Command::History(args) => history::run(args, &gateway).await,
        Command::Search(args) => search::run(args, &gateway).await,
    }
}

fn build_gateway(cli: &Cli) -> Result<MarketGateway, CliError> {
    let mut config = GatewayConfig::from_env()?;
    if let Some(min_interval_ms) = cli.min_interval_ms {
        config = config.with_min_interval(Duration::from_millis(min_interval_ms));
    }

    debug!(
        base_url = %config.base_url,
        min_interval_ms = config.min_interval.as_millis() as u64,
        keys = config.api_keys.len(),
        "building gateway"
    );
    let gateway = MarketGateway::from_config(&config, Arc::new(ReqwestHttpClient::new()))?;
    Ok(gateway)
}
