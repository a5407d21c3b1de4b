//! Vaccination statistics queries.

use covid_core::{CovidResult, VaccinatedTotal};
use neo4rs::Query;

use crate::client::column;
use crate::GraphClient;

/// Statistics without a first-dose figure are not counted as zero.
pub const VACCINATED: &str =
    "MATCH (c:Country {code: $countryCode})-[:VACCINATED_ON]->(vs:VaccinationStats)
           -[:ON_DATE]->(d:Date {date: date($date)})
     WHERE vs.personsVaccinated1PlusDose IS NOT NULL
     RETURN toFloat(vs.personsVaccinated1PlusDose) AS totalVaccinated
     ORDER BY totalVaccinated DESC
     LIMIT 1";

/// Persons with at least one dose in a country on a date.
pub async fn vaccinated(client: &GraphClient, country: &str, date: &str) -> CovidResult<Option<VaccinatedTotal>> {
    let query = Query::new(VACCINATED.to_string())
        .param("countryCode", country)
        .param("date", date);

    let rows = client.query(query).await?;
    match rows.first() {
        Some(row) => Ok(Some(VaccinatedTotal {
            total_vaccinated: column(row, "totalVaccinated")?,
        })),
        None => Ok(None),
    }
}
