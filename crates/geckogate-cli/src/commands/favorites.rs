use geckogate_core::{CoinId, MarketGateway};

use crate::cli::FavoritesArgs;
use crate::error::CliError;

use super::CommandResult;

pub async fn run(args: &FavoritesArgs, gateway: &MarketGateway) -> Result<CommandResult, CliError> {
    let ids = args
        .ids
        .iter()
        .map(|raw| CoinId::parse(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let coins = gateway.list_favorites(&ids).await?;
    Ok(CommandResult::Coins(coins))
}
