//! Read queries behind the HTTP endpoints.
//!
//! Each query is a single parameterized pattern match. Top-1 queries carry an
//! explicit secondary sort so ties resolve the same way on every run.

pub mod cases;
pub mod vaccination;
pub mod vaccines;

use async_trait::async_trait;
use covid_core::{
    CasesDeaths, CovidQueries, CovidResult, HighestCases, VaccinatedTotal, VaccineAdoption, VaccineStart,
};

use crate::GraphClient;

#[async_trait]
impl CovidQueries for GraphClient {
    async fn total_cases_deaths(&self, country: &str, date: &str) -> CovidResult<Option<CasesDeaths>> {
        cases::total_cases_deaths(self, country, date).await
    }

    async fn vaccinated(&self, country: &str, date: &str) -> CovidResult<Option<VaccinatedTotal>> {
        vaccination::vaccinated(self, country, date).await
    }

    async fn vaccines_used(&self, country: &str) -> CovidResult<Vec<VaccineStart>> {
        vaccines::vaccines_used(self, country).await
    }

    async fn highest_cases(&self, date: &str) -> CovidResult<Option<HighestCases>> {
        cases::highest_cases(self, date).await
    }

    async fn most_used_vaccine(&self, region: &str) -> CovidResult<Option<VaccineAdoption>> {
        vaccines::most_used_vaccine(self, region).await
    }
}
