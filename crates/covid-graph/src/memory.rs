//! In-process graph store.
//!
//! Holds the same node/relationship taxonomy as the Neo4j schema and applies
//! the same upsert keys and query ordering. Backs `load --dry-run` and the
//! HTTP contract tests.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use chrono::NaiveDate;
use covid_core::model::{vaccination_snapshot, CovidStats, VaccinationStats, Vaccine};
use covid_core::{
    CasesDeaths, CovidError, CovidQueries, CovidResult, CovidStatsRow, CovidWriter, HighestCases, VaccinatedTotal,
    VaccinationRow, VaccineAdoption, VaccineMetadataRow, VaccineStart,
};
use tokio::sync::RwLock;

use crate::GraphCounts;

#[derive(Debug, Default)]
struct CountryNode {
    name: Option<String>,
    regions: BTreeSet<String>,
}

#[derive(Debug, Default)]
struct VaccineNode {
    company: String,
    vaccine: String,
    started_on: BTreeSet<NaiveDate>,
    authorized_on: BTreeSet<NaiveDate>,
}

#[derive(Debug)]
struct VaccinationNode {
    reported_on: Option<NaiveDate>,
    stats: VaccinationStats,
}

#[derive(Debug, Default)]
struct State {
    countries: BTreeMap<String, CountryNode>,
    regions: BTreeSet<String>,
    dates: BTreeSet<NaiveDate>,
    covid_stats: BTreeMap<(NaiveDate, String), CovidStats>,
    /// Keyed by (country code, snapshot).
    vaccination_stats: BTreeMap<(String, String), VaccinationNode>,
    vaccines: BTreeMap<String, VaccineNode>,
    /// (country code, product)
    uses: BTreeSet<(String, String)>,
}

impl State {
    fn country(&mut self, code: &str, name: Option<&String>) {
        let node = self.countries.entry(code.to_string()).or_default();
        if let Some(name) = name {
            node.name = Some(name.clone());
        }
    }

    fn belongs(&mut self, code: &str, region: &str) {
        self.regions.insert(region.to_string());
        if let Some(node) = self.countries.get_mut(code) {
            node.regions.insert(region.to_string());
        }
    }
}

/// A graph held in memory.
#[derive(Debug, Default)]
pub struct MemoryGraph {
    state: RwLock<State>,
}

/// Query dates arrive as caller-supplied text, so a bad one fails like it would in Cypher's `date()`.
///
/// Only the exact `YYYY-MM-DD` shape is accepted; chrono alone would also take
/// unpadded fields, a sign or leading whitespace.
fn query_date(date: &str) -> CovidResult<NaiveDate> {
    let invalid = || CovidError::Query(format!("Text cannot be parsed to a Date: \"{date}\""));

    let bytes = date.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| invalid())
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Node and relationship counts, counted the way `MATCH (n)` / `MATCH ()-[r]->()` would.
    pub async fn counts(&self) -> GraphCounts {
        let state = self.state.read().await;

        let nodes = state.countries.len()
            + state.regions.len()
            + state.dates.len()
            + state.covid_stats.len()
            + state.vaccination_stats.len()
            + state.vaccines.len();

        let belongs: usize = state.countries.values().map(|c| c.regions.len()).sum();
        let vaccinated: usize = state
            .vaccination_stats
            .values()
            .map(|v| 1 + usize::from(v.reported_on.is_some()))
            .sum();
        let vaccine_dates: usize = state
            .vaccines
            .values()
            .map(|v| v.started_on.len() + v.authorized_on.len())
            .sum();

        GraphCounts {
            nodes,
            relationships: belongs + 2 * state.covid_stats.len() + vaccinated + state.uses.len() + vaccine_dates,
        }
    }

    /// The stored name of a country, if the country exists and a name was loaded.
    pub async fn country_name(&self, code: &str) -> Option<String> {
        let state = self.state.read().await;
        state.countries.get(code).and_then(|c| c.name.clone())
    }

    pub async fn vaccine(&self, product: &str) -> Option<Vaccine> {
        let state = self.state.read().await;
        state.vaccines.get(product).map(|v| Vaccine {
            product: product.to_string(),
            company: v.company.clone(),
            vaccine: v.vaccine.clone(),
        })
    }
}

#[async_trait]
impl CovidQueries for MemoryGraph {
    async fn total_cases_deaths(&self, country: &str, date: &str) -> CovidResult<Option<CasesDeaths>> {
        let date = query_date(date)?;
        let state = self.state.read().await;
        Ok(state
            .covid_stats
            .get(&(date, country.to_string()))
            .map(|stats| CasesDeaths {
                total_cumulative_cases: stats.cumulative_cases,
                total_cumulative_deaths: stats.cumulative_deaths,
            }))
    }

    async fn vaccinated(&self, country: &str, date: &str) -> CovidResult<Option<VaccinatedTotal>> {
        let date = query_date(date)?;
        let state = self.state.read().await;
        Ok(state
            .vaccination_stats
            .get(&(country.to_string(), date.to_string()))
            .filter(|node| node.reported_on == Some(date))
            .and_then(|node| node.stats.persons_vaccinated_1plus_dose)
            .map(|total_vaccinated| VaccinatedTotal { total_vaccinated }))
    }

    async fn vaccines_used(&self, country: &str) -> CovidResult<Vec<VaccineStart>> {
        let state = self.state.read().await;
        let mut used: Vec<(NaiveDate, String)> = state
            .uses
            .iter()
            .filter(|(code, _)| code == country)
            .filter_map(|(_, product)| state.vaccines.get(product).map(|v| (product, v)))
            .flat_map(|(product, vaccine)| vaccine.started_on.iter().map(move |d| (*d, product.clone())))
            .collect();
        used.sort();

        Ok(used
            .into_iter()
            .map(|(date, vaccine)| VaccineStart {
                vaccine,
                start_date: date.to_string(),
            })
            .collect())
    }

    async fn highest_cases(&self, date: &str) -> CovidResult<Option<HighestCases>> {
        let date = query_date(date)?;
        let state = self.state.read().await;
        // Keys iterate in country order, so the first maximum is the lowest code.
        let best = state
            .covid_stats
            .range((date, String::new())..)
            .take_while(|((d, _), _)| *d == date)
            .fold(None::<&CovidStats>, |best, (_, stats)| match best {
                Some(b) if b.cumulative_cases >= stats.cumulative_cases => Some(b),
                _ => Some(stats),
            });

        Ok(best.map(|stats| HighestCases {
            country: stats.country_code.clone(),
            cases: stats.cumulative_cases,
        }))
    }

    async fn most_used_vaccine(&self, region: &str) -> CovidResult<Option<VaccineAdoption>> {
        let state = self.state.read().await;
        let mut usage: BTreeMap<&str, i64> = BTreeMap::new();
        for (code, product) in &state.uses {
            let in_region = state
                .countries
                .get(code)
                .is_some_and(|c| c.regions.contains(region));
            if in_region {
                *usage.entry(product.as_str()).or_default() += 1;
            }
        }

        // Products iterate in order, so the first maximum is the lowest product.
        let best = usage.into_iter().fold(None::<(&str, i64)>, |best, (product, count)| match best {
            Some((_, b)) if b >= count => best,
            _ => Some((product, count)),
        });

        Ok(best.map(|(vaccine, usage)| VaccineAdoption {
            vaccine: vaccine.to_string(),
            usage,
        }))
    }
}

#[async_trait]
impl CovidWriter for MemoryGraph {
    async fn prepare_schema(&self) -> CovidResult<()> {
        Ok(())
    }

    async fn upsert_vaccine_metadata(&self, row: &VaccineMetadataRow) -> CovidResult<()> {
        let mut state = self.state.write().await;

        let vaccine = state.vaccines.entry(row.vaccine.product.clone()).or_default();
        vaccine.company = row.vaccine.company.clone();
        vaccine.vaccine = row.vaccine.vaccine.clone();
        if let Some(date) = row.authorized_on {
            vaccine.authorized_on.insert(date);
        }
        if let Some(date) = row.started_on {
            vaccine.started_on.insert(date);
        }

        state.dates.extend(row.authorized_on);
        state.dates.extend(row.started_on);
        state.country(&row.country_code, None);
        state
            .uses
            .insert((row.country_code.clone(), row.vaccine.product.clone()));
        Ok(())
    }

    async fn upsert_vaccination(&self, row: &VaccinationRow) -> CovidResult<()> {
        let mut state = self.state.write().await;

        state.country(&row.country.code, row.country.name.as_ref());
        let key = (row.country.code.clone(), vaccination_snapshot(row.reported_on));
        let node = state.vaccination_stats.entry(key).or_insert_with(|| VaccinationNode {
            reported_on: row.reported_on,
            stats: VaccinationStats::default(),
        });

        // Absent figures leave whatever an earlier load stored.
        let incoming = &row.stats;
        let stats = &mut node.stats;
        for (slot, value) in [
            (&mut stats.total_vaccinations, incoming.total_vaccinations),
            (&mut stats.persons_vaccinated_1plus_dose, incoming.persons_vaccinated_1plus_dose),
            (&mut stats.total_vaccinations_per100, incoming.total_vaccinations_per100),
            (
                &mut stats.persons_vaccinated_1plus_dose_per100,
                incoming.persons_vaccinated_1plus_dose_per100,
            ),
            (&mut stats.persons_last_dose, incoming.persons_last_dose),
            (&mut stats.persons_last_dose_per100, incoming.persons_last_dose_per100),
            (&mut stats.persons_booster_add_dose, incoming.persons_booster_add_dose),
            (
                &mut stats.persons_booster_add_dose_per100,
                incoming.persons_booster_add_dose_per100,
            ),
        ] {
            if value.is_some() {
                *slot = value;
            }
        }

        state.dates.extend(row.reported_on);
        state.belongs(&row.country.code, &row.region);
        Ok(())
    }

    async fn upsert_covid_stats(&self, row: &CovidStatsRow) -> CovidResult<()> {
        let mut state = self.state.write().await;

        state.country(&row.country.code, row.country.name.as_ref());
        state.dates.insert(row.stats.date);

        let key = (row.stats.date, row.country.code.clone());
        let stats = state.covid_stats.entry(key).or_insert_with(|| row.stats.clone());
        stats.cumulative_cases = row.stats.cumulative_cases;
        stats.cumulative_deaths = row.stats.cumulative_deaths;
        if row.stats.new_cases.is_some() {
            stats.new_cases = row.stats.new_cases;
        }
        if row.stats.new_deaths.is_some() {
            stats.new_deaths = row.stats.new_deaths;
        }

        state.belongs(&row.country.code, &row.region);
        Ok(())
    }
}
