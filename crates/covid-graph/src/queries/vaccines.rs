//! Vaccine adoption queries.

use covid_core::{CovidResult, VaccineAdoption, VaccineStart};
use neo4rs::Query;

use crate::client::column;
use crate::GraphClient;

pub const VACCINES_USED: &str =
    "MATCH (c:Country {code: $countryCode})-[:USES]->(v:Vaccine)-[:STARTED_ON]->(d:Date)
     RETURN v.product AS vaccine, toString(d.date) AS startDate
     ORDER BY d.date ASC, vaccine ASC";

pub const MOST_USED_VACCINE: &str =
    "MATCH (r:Region {name: $region})<-[:BELONGS]-(c:Country)-[:USES]->(v:Vaccine)
     RETURN v.product AS vaccine, count(DISTINCT c) AS usage
     ORDER BY usage DESC, vaccine ASC
     LIMIT 1";

/// Every vaccine a country uses, with its start date.
pub async fn vaccines_used(client: &GraphClient, country: &str) -> CovidResult<Vec<VaccineStart>> {
    let query = Query::new(VACCINES_USED.to_string()).param("countryCode", country);

    client
        .query(query)
        .await?
        .iter()
        .map(|row| {
            Ok(VaccineStart {
                vaccine: column(row, "vaccine")?,
                start_date: column(row, "startDate")?,
            })
        })
        .collect()
}

/// The vaccine used by the most countries of a region.
pub async fn most_used_vaccine(client: &GraphClient, region: &str) -> CovidResult<Option<VaccineAdoption>> {
    let query = Query::new(MOST_USED_VACCINE.to_string()).param("region", region);

    let rows = client.query(query).await?;
    let Some(row) = rows.first() else {
        return Ok(None);
    };

    Ok(Some(VaccineAdoption {
        vaccine: column(row, "vaccine")?,
        usage: column(row, "usage")?,
    }))
}
