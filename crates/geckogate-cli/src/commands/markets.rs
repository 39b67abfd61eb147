use geckogate_core::MarketGateway;

use crate::cli::MarketsArgs;
use crate::error::CliError;

use super::CommandResult;

pub async fn run(args: &MarketsArgs, gateway: &MarketGateway) -> Result<CommandResult, CliError> {
    let coins = gateway.list_markets(args.page, args.per_page).await?;
    Ok(CommandResult::Coins(coins))
}
