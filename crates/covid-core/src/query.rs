//! Typed result records, one per query endpoint.

use serde::{Deserialize, Serialize};

/// Cumulative totals for a country on a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CasesDeaths {
    pub total_cumulative_cases: i64,
    pub total_cumulative_deaths: i64,
}

/// Persons with at least one dose for a country on a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaccinatedTotal {
    pub total_vaccinated: f64,
}

/// A vaccine used by a country and the date it started being administered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaccineStart {
    pub vaccine: String,
    pub start_date: String,
}

/// The country with the most cumulative cases on a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighestCases {
    pub country: String,
    pub cases: i64,
}

/// A vaccine and how many countries of a region use it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaccineAdoption {
    pub vaccine: String,
    pub usage: i64,
}
