use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;

use super::validation::LocationParams;
use super::{ApiError, AppState};
use crate::models::DayForecast;

/// `GET /weather?id=<id>` or `GET /weather?latitude=..&longitude=..[&location_id=..]`
pub async fn get_weather(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LocationParams>,
) -> Result<Json<Vec<DayForecast>>, ApiError> {
    let location = params.into_location_ref()?;
    let days = state.resolver().resolve_weather(location).await?;
    Ok(Json(days))
}
