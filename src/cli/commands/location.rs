//! Location lookup command handler

use crate::state::SharedState;

pub async fn cmd_location(state: &SharedState, query: &str) -> anyhow::Result<()> {
    let query = query.trim();
    if query.is_empty() {
        anyhow::bail!("Search query cannot be empty");
    }

    let location = state.resolver.resolve_location(query).await?;

    println!("{}", serde_json::to_string_pretty(&location)?);
    if let Some(id) = location.id {
        println!();
        println!("Next: city-explorer weather --id {id}");
    }

    Ok(())
}
