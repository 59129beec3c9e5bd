//! Weather command handler

use crate::cli::LocationArgs;
use crate::state::SharedState;

pub async fn cmd_weather(state: &SharedState, args: &LocationArgs) -> anyhow::Result<()> {
    let location = args.to_location_ref()?;
    let days = state.resolver.resolve_weather(location).await?;

    if days.is_empty() {
        println!("No stored forecasts for this location.");
        return Ok(());
    }

    println!("{}", serde_json::to_string_pretty(&days)?);
    Ok(())
}
