use geckogate_core::{CoinId, MarketGateway};

use crate::cli::DetailsArgs;
use crate::error::CliError;

use super::CommandResult;

pub async fn run(args: &DetailsArgs, gateway: &MarketGateway) -> Result<CommandResult, CliError> {
    let id = CoinId::parse(&args.id)?;
    let coin = gateway.coin_details(&id).await?;
    Ok(CommandResult::Coin(Box::new(coin)))
}
