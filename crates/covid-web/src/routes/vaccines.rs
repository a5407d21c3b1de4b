//! Vaccine route handlers.

use axum::{
    extract::{Query, State},
    Json,
};
use covid_core::{VaccineAdoption, VaccineStart};
use tracing::debug;

use super::QueryPairs;
use crate::error::{required, ApiError};
use crate::state::AppState;

pub async fn vaccines_used(
    State(state): State<AppState>,
    Query(params): QueryPairs,
) -> Result<Json<Vec<VaccineStart>>, ApiError> {
    let country = required(&params, "country")?;

    let vaccines = state.queries.vaccines_used(country).await?;
    if vaccines.is_empty() {
        return Err(ApiError::NotFound);
    }

    debug!(country, count = vaccines.len(), "Served vaccines used");
    Ok(Json(vaccines))
}

pub async fn most_used_vaccine(
    State(state): State<AppState>,
    Query(params): QueryPairs,
) -> Result<Json<VaccineAdoption>, ApiError> {
    let region = required(&params, "region")?;

    let adoption = state
        .queries
        .most_used_vaccine(region)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(adoption))
}
