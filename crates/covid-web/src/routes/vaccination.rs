//! Vaccination route handlers.

use axum::{
    extract::{Query, State},
    Json,
};
use covid_core::VaccinatedTotal;

use super::QueryPairs;
use crate::error::{required, ApiError};
use crate::state::AppState;

pub async fn vaccinated(
    State(state): State<AppState>,
    Query(params): QueryPairs,
) -> Result<Json<VaccinatedTotal>, ApiError> {
    let country = required(&params, "country")?;
    let date = required(&params, "date")?;

    let total = state
        .queries
        .vaccinated(country, date)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(total))
}
