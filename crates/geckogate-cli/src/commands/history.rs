use geckogate_core::{CoinId, MarketGateway, TimeRange};

use crate::cli::HistoryArgs;
use crate::error::CliError;

use super::CommandResult;

pub async fn run(args: &HistoryArgs, gateway: &MarketGateway) -> Result<CommandResult, CliError> {
    let id = CoinId::parse(&args.id)?;
    let range = args.range.parse::<TimeRange>()?;

    let series = gateway.history(&id, range).await?;
    Ok(CommandResult::History { id, range, series })
}
