use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;

use super::validation::LocationParams;
use super::{ApiError, AppState};
use crate::models::EventSummary;

/// `GET /events`, same parameters as `/weather`.
pub async fn get_events(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LocationParams>,
) -> Result<Json<Vec<EventSummary>>, ApiError> {
    let location = params.into_location_ref()?;
    let events = state.resolver().resolve_events(location).await?;
    Ok(Json(events))
}
