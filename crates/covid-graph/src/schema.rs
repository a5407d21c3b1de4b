//! Neo4j schema initialization (constraints and indexes).

use covid_core::CovidResult;
use neo4rs::Query;
use tracing::{debug, info};

use crate::GraphClient;

/// Cypher statements for schema initialization.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    // Natural keys
    "CREATE CONSTRAINT country_code_unique IF NOT EXISTS FOR (c:Country) REQUIRE c.code IS UNIQUE",
    "CREATE INDEX country_code_index IF NOT EXISTS FOR (c:Country) ON (c.code)",
    "CREATE CONSTRAINT date_unique IF NOT EXISTS FOR (d:Date) REQUIRE d.date IS UNIQUE",
    "CREATE INDEX date_index IF NOT EXISTS FOR (d:Date) ON (d.date)",
    "CREATE CONSTRAINT region_unique IF NOT EXISTS FOR (r:Region) REQUIRE r.name IS UNIQUE",
    "CREATE INDEX region_index IF NOT EXISTS FOR (r:Region) ON (r.name)",
    "CREATE CONSTRAINT vaccine_unique IF NOT EXISTS FOR (v:Vaccine) REQUIRE v.product IS UNIQUE",
    "CREATE INDEX vaccine_product_index IF NOT EXISTS FOR (v:Vaccine) ON (v.product)",
    // Composite keys for the statistics nodes, so reloading a file never duplicates them
    "CREATE CONSTRAINT covid_stats_key IF NOT EXISTS FOR (s:CovidStats) REQUIRE (s.date, s.countryCode) IS UNIQUE",
    "CREATE CONSTRAINT vaccination_stats_key IF NOT EXISTS \
     FOR (s:VaccinationStats) REQUIRE (s.countryCode, s.snapshot) IS UNIQUE",
];

/// Initialize Neo4j schema with constraints and indexes.
///
/// Safe to run multiple times - uses IF NOT EXISTS clauses.
pub async fn initialize_schema(client: &GraphClient) -> CovidResult<()> {
    info!("Initializing Neo4j schema...");

    for statement in SCHEMA_STATEMENTS {
        debug!(statement, "Executing schema statement");
        client.execute(Query::new(statement.to_string())).await?;
    }

    info!("Neo4j schema initialized ({} statements)", SCHEMA_STATEMENTS.len());
    Ok(())
}
