use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::validate_search_query;
use super::{ApiError, AppState};
use crate::models::Location;

#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub data: Option<String>,
}

/// `GET /location?data=<query>`
pub async fn get_location(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LocationQuery>,
) -> Result<Json<Location>, ApiError> {
    let query = validate_search_query(params.data.as_deref())?;
    let location = state.resolver().resolve_location(query).await?;
    Ok(Json(location))
}
