//! Graph data model.
//!
//! Nodes and their natural keys:
//! - `(:Country {code})` with `name`
//! - `(:Region {name})`
//! - `(:Date {date})`
//! - `(:CovidStats {date, countryCode})` with the four case/death counters
//! - `(:VaccinationStats {countryCode, snapshot})` with the eight vaccination figures
//! - `(:Vaccine {product})` with `company` and `vaccine`
//!
//! Relationships:
//! - `(:Country)-[:BELONGS]->(:Region)`
//! - `(:Country)-[:REPORTED_ON]->(:CovidStats)-[:ON_DATE]->(:Date)`
//! - `(:Country)-[:VACCINATED_ON]->(:VaccinationStats)-[:ON_DATE]->(:Date)` (date optional)
//! - `(:Country)-[:USES]->(:Vaccine)`
//! - `(:Vaccine)-[:STARTED_ON]->(:Date)`, `(:Vaccine)-[:AUTHORIZATION_ON]->(:Date)`

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Snapshot key used for vaccination statistics that carry no reporting date.
pub const UNDATED_SNAPSHOT: &str = "undated";

/// A country, keyed by its code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub code: String,
    pub name: Option<String>,
}

/// Case and death counters reported by one country on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CovidStats {
    pub date: NaiveDate,
    pub country_code: String,
    pub cumulative_cases: i64,
    pub cumulative_deaths: i64,
    pub new_cases: Option<i64>,
    pub new_deaths: Option<i64>,
}

/// Vaccination figures reported by one country.
///
/// Every figure is optional: a value missing from the source is never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaccinationStats {
    pub total_vaccinations: Option<f64>,
    pub persons_vaccinated_1plus_dose: Option<f64>,
    pub total_vaccinations_per100: Option<f64>,
    pub persons_vaccinated_1plus_dose_per100: Option<f64>,
    pub persons_last_dose: Option<f64>,
    pub persons_last_dose_per100: Option<f64>,
    pub persons_booster_add_dose: Option<f64>,
    pub persons_booster_add_dose_per100: Option<f64>,
}

impl VaccinationStats {
    /// Graph property names paired with their values, in a fixed order.
    pub fn properties(&self) -> [(&'static str, Option<f64>); 8] {
        [
            ("totalVaccinations", self.total_vaccinations),
            ("personsVaccinated1PlusDose", self.persons_vaccinated_1plus_dose),
            ("totalVaccinationsPer100", self.total_vaccinations_per100),
            (
                "personsVaccinated1PlusDosePer100",
                self.persons_vaccinated_1plus_dose_per100,
            ),
            ("personsLastDose", self.persons_last_dose),
            ("personsLastDosePer100", self.persons_last_dose_per100),
            ("personsBoosterAddDose", self.persons_booster_add_dose),
            (
                "personsBoosterAddDosePer100",
                self.persons_booster_add_dose_per100,
            ),
        ]
    }
}

/// A vaccine product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vaccine {
    pub product: String,
    pub company: String,
    pub vaccine: String,
}

/// The snapshot key for a vaccination report: its ISO date, or [`UNDATED_SNAPSHOT`].
pub fn vaccination_snapshot(reported_on: Option<NaiveDate>) -> String {
    match reported_on {
        Some(date) => date.to_string(),
        None => UNDATED_SNAPSHOT.to_string(),
    }
}
