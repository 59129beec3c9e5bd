//! Events command handler

use crate::cli::LocationArgs;
use crate::state::SharedState;

pub async fn cmd_events(state: &SharedState, args: &LocationArgs) -> anyhow::Result<()> {
    let location = args.to_location_ref()?;
    let events = state.resolver.resolve_events(location).await?;

    if events.is_empty() {
        println!("No events found.");
        return Ok(());
    }

    println!("{}", serde_json::to_string_pretty(&events)?);
    println!();
    println!("{} event(s)", events.len());
    Ok(())
}
