use geckogate_core::MarketGateway;

use crate::cli::SearchArgs;
use crate::error::CliError;

use super::CommandResult;

pub async fn run(args: &SearchArgs, gateway: &MarketGateway) -> Result<CommandResult, CliError> {
    let coins = gateway.search(&args.query).await?;
    Ok(CommandResult::Coins(coins))
}
