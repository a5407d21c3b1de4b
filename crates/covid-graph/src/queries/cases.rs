//! Case and death queries.

use covid_core::{CasesDeaths, CovidResult, HighestCases};
use neo4rs::Query;

use crate::client::column;
use crate::GraphClient;

pub const TOTAL_CASES_DEATHS: &str =
    "MATCH (c:Country {code: $countryCode})-[:REPORTED_ON]->(cs:CovidStats)-[:ON_DATE]->(d:Date {date: date($date)})
     RETURN cs.cumulativeCases AS totalCumulativeCases, cs.cumulativeDeaths AS totalCumulativeDeaths
     ORDER BY totalCumulativeCases DESC, totalCumulativeDeaths DESC
     LIMIT 1";

pub const HIGHEST_CASES: &str =
    "MATCH (c:Country)-[:REPORTED_ON]->(cs:CovidStats)-[:ON_DATE]->(d:Date {date: date($date)})
     RETURN c.code AS country, cs.cumulativeCases AS cases
     ORDER BY cases DESC, country ASC
     LIMIT 1";

/// Cumulative cases and deaths a country reported on a date.
pub async fn total_cases_deaths(client: &GraphClient, country: &str, date: &str) -> CovidResult<Option<CasesDeaths>> {
    let query = Query::new(TOTAL_CASES_DEATHS.to_string())
        .param("countryCode", country)
        .param("date", date);

    let rows = client.query(query).await?;
    let Some(row) = rows.first() else {
        return Ok(None);
    };

    Ok(Some(CasesDeaths {
        total_cumulative_cases: column(row, "totalCumulativeCases")?,
        total_cumulative_deaths: column(row, "totalCumulativeDeaths")?,
    }))
}

/// The country with the most cumulative cases on a date.
pub async fn highest_cases(client: &GraphClient, date: &str) -> CovidResult<Option<HighestCases>> {
    let query = Query::new(HIGHEST_CASES.to_string()).param("date", date);

    let rows = client.query(query).await?;
    let Some(row) = rows.first() else {
        return Ok(None);
    };

    Ok(Some(HighestCases {
        country: column(row, "country")?,
        cases: column(row, "cases")?,
    }))
}
