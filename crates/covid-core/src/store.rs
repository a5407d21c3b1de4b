//! Store traits separating the query service and ingestion job from the backend.

use async_trait::async_trait;

use crate::error::CovidResult;
use crate::query::{CasesDeaths, HighestCases, VaccinatedTotal, VaccineAdoption, VaccineStart};
use crate::record::{CovidStatsRow, VaccinationRow, VaccineMetadataRow};

/// Read side: the five query contracts.
///
/// Dates are passed through as the caller supplied them (ISO `YYYY-MM-DD`);
/// a malformed date is a query failure, not an empty result.
#[async_trait]
pub trait CovidQueries: Send + Sync {
    async fn total_cases_deaths(&self, country: &str, date: &str) -> CovidResult<Option<CasesDeaths>>;

    async fn vaccinated(&self, country: &str, date: &str) -> CovidResult<Option<VaccinatedTotal>>;

    /// Vaccines a country uses that have a start date, ordered by start date then product.
    async fn vaccines_used(&self, country: &str) -> CovidResult<Vec<VaccineStart>>;

    /// Ties on case count resolve to the lowest country code.
    async fn highest_cases(&self, date: &str) -> CovidResult<Option<HighestCases>>;

    /// Ties on usage resolve to the lexicographically first product.
    async fn most_used_vaccine(&self, region: &str) -> CovidResult<Option<VaccineAdoption>>;
}

/// Write side: schema preparation and the per-row upserts of the ingestion job.
#[async_trait]
pub trait CovidWriter: Send + Sync {
    /// Declare uniqueness constraints and indexes. Safe to run repeatedly.
    async fn prepare_schema(&self) -> CovidResult<()>;

    async fn upsert_vaccine_metadata(&self, row: &VaccineMetadataRow) -> CovidResult<()>;

    async fn upsert_vaccination(&self, row: &VaccinationRow) -> CovidResult<()>;

    async fn upsert_covid_stats(&self, row: &CovidStatsRow) -> CovidResult<()>;
}
