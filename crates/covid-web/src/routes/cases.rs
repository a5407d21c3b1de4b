//! Case and death route handlers.

use axum::{
    extract::{Query, State},
    Json,
};
use covid_core::{CasesDeaths, HighestCases};
use tracing::debug;

use super::QueryPairs;
use crate::error::{required, ApiError};
use crate::state::AppState;

pub async fn total_cases_deaths(
    State(state): State<AppState>,
    Query(params): QueryPairs,
) -> Result<Json<CasesDeaths>, ApiError> {
    let country = required(&params, "country")?;
    let date = required(&params, "date")?;

    let totals = state
        .queries
        .total_cases_deaths(country, date)
        .await?
        .ok_or(ApiError::NotFound)?;

    debug!(country, date, cases = totals.total_cumulative_cases, "Served total cases and deaths");
    Ok(Json(totals))
}

pub async fn highest_cases(
    State(state): State<AppState>,
    Query(params): QueryPairs,
) -> Result<Json<HighestCases>, ApiError> {
    let date = required(&params, "date")?;

    let highest = state
        .queries
        .highest_cases(date)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(highest))
}
