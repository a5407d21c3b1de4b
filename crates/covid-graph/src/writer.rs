//! Cypher upserts for the ingestion job.
//!
//! Each source row becomes one statement. Optional pieces (dates that did
//! not parse, figures absent in the source, unknown country names) are left
//! out of the statement rather than written as placeholders.

use async_trait::async_trait;
use covid_core::model::vaccination_snapshot;
use covid_core::{CovidResult, CovidStatsRow, CovidWriter, VaccinationRow, VaccineMetadataRow};
use neo4rs::Query;
use tracing::debug;

use crate::GraphClient;
use crate::schema::initialize_schema;

/// Cypher for a vaccination metadata row.
pub fn vaccine_metadata_cypher(row: &VaccineMetadataRow) -> String {
    let mut cypher = String::from(
        "MERGE (v:Vaccine {product: $product})
         SET v.company = $company, v.vaccine = $vaccine
         MERGE (c:Country {code: $countryCode})",
    );

    if row.authorized_on.is_some() {
        cypher.push_str(
            "
         MERGE (dAuth:Date {date: date($authorizationDate)})
         MERGE (v)-[:AUTHORIZATION_ON]->(dAuth)",
        );
    }

    if row.started_on.is_some() {
        cypher.push_str(
            "
         MERGE (dStart:Date {date: date($startDate)})
         MERGE (v)-[:STARTED_ON]->(dStart)",
        );
    }

    cypher.push_str(
        "
         MERGE (c)-[:USES]->(v)",
    );
    cypher
}

/// Cypher for a vaccination statistics row.
pub fn vaccination_cypher(row: &VaccinationRow) -> String {
    let mut cypher = String::from(
        "MERGE (r:Region {name: $region})
         MERGE (c:Country {code: $countryCode})",
    );

    if row.country.name.is_some() {
        cypher.push_str(
            "
         SET c.name = $countryName",
        );
    }

    cypher.push_str(
        "
         MERGE (vs:VaccinationStats {countryCode: $countryCode, snapshot: $snapshot})",
    );

    let assignments: Vec<String> = row
        .stats
        .properties()
        .iter()
        .filter(|(_, value)| value.is_some())
        .map(|(name, _)| format!("vs.{name} = ${name}"))
        .collect();
    if !assignments.is_empty() {
        cypher.push_str(&format!(
            "
         SET {}",
            assignments.join(", ")
        ));
    }

    cypher.push_str(
        "
         MERGE (c)-[:VACCINATED_ON]->(vs)",
    );

    if row.reported_on.is_some() {
        cypher.push_str(
            "
         MERGE (d:Date {date: date($date)})
         SET vs.date = d.date
         MERGE (vs)-[:ON_DATE]->(d)",
        );
    }

    cypher.push_str(
        "
         MERGE (c)-[:BELONGS]->(r)",
    );
    cypher
}

/// Cypher for a global case/death row.
pub fn covid_stats_cypher(row: &CovidStatsRow) -> String {
    let mut cypher = String::from("MERGE (c:Country {code: $countryCode})");

    if row.country.name.is_some() {
        cypher.push_str(
            "
         SET c.name = $countryName",
        );
    }

    cypher.push_str(
        "
         MERGE (r:Region {name: $region})
         MERGE (d:Date {date: date($date)})
         MERGE (cs:CovidStats {date: date($date), countryCode: $countryCode})
         SET cs.cumulativeCases = $cumulativeCases, cs.cumulativeDeaths = $cumulativeDeaths",
    );
    if row.stats.new_cases.is_some() {
        cypher.push_str(", cs.newCases = $newCases");
    }
    if row.stats.new_deaths.is_some() {
        cypher.push_str(", cs.newDeaths = $newDeaths");
    }

    cypher.push_str(
        "
         MERGE (c)-[:BELONGS]->(r)
         MERGE (c)-[:REPORTED_ON]->(cs)
         MERGE (cs)-[:ON_DATE]->(d)",
    );
    cypher
}

#[async_trait]
impl CovidWriter for GraphClient {
    async fn prepare_schema(&self) -> CovidResult<()> {
        initialize_schema(self).await
    }

    async fn upsert_vaccine_metadata(&self, row: &VaccineMetadataRow) -> CovidResult<()> {
        let mut query = Query::new(vaccine_metadata_cypher(row))
            .param("product", row.vaccine.product.as_str())
            .param("company", row.vaccine.company.as_str())
            .param("vaccine", row.vaccine.vaccine.as_str())
            .param("countryCode", row.country_code.as_str());

        if let Some(date) = row.authorized_on {
            query = query.param("authorizationDate", date.to_string());
        }
        if let Some(date) = row.started_on {
            query = query.param("startDate", date.to_string());
        }

        self.execute(query).await?;
        debug!(country = %row.country_code, product = %row.vaccine.product, "Upserted vaccine metadata");
        Ok(())
    }

    async fn upsert_vaccination(&self, row: &VaccinationRow) -> CovidResult<()> {
        let mut query = Query::new(vaccination_cypher(row))
            .param("region", row.region.as_str())
            .param("countryCode", row.country.code.as_str())
            .param("snapshot", vaccination_snapshot(row.reported_on));

        if let Some(name) = &row.country.name {
            query = query.param("countryName", name.as_str());
        }
        for (name, value) in row.stats.properties() {
            if let Some(value) = value {
                query = query.param(name, value);
            }
        }
        if let Some(date) = row.reported_on {
            query = query.param("date", date.to_string());
        }

        self.execute(query).await?;
        debug!(country = %row.country.code, dated = row.reported_on.is_some(), "Upserted vaccination statistics");
        Ok(())
    }

    async fn upsert_covid_stats(&self, row: &CovidStatsRow) -> CovidResult<()> {
        let stats = &row.stats;
        let mut query = Query::new(covid_stats_cypher(row))
            .param("countryCode", row.country.code.as_str())
            .param("region", row.region.as_str())
            .param("date", stats.date.to_string())
            .param("cumulativeCases", stats.cumulative_cases)
            .param("cumulativeDeaths", stats.cumulative_deaths);

        if let Some(name) = &row.country.name {
            query = query.param("countryName", name.as_str());
        }
        if let Some(new_cases) = stats.new_cases {
            query = query.param("newCases", new_cases);
        }
        if let Some(new_deaths) = stats.new_deaths {
            query = query.param("newDeaths", new_deaths);
        }

        self.execute(query).await?;
        debug!(country = %row.country.code, date = %stats.date, "Upserted covid statistics");
        Ok(())
    }
}
