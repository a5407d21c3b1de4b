//! Ingestion pipeline tests against the in-memory graph.

mod common;

use std::path::Path;

use async_trait::async_trait;
use covid_core::{
    CovidError, CovidQueries, CovidResult, CovidStatsRow, CovidWriter, HighestCases, VaccinationRow,
    VaccineAdoption, VaccineMetadataRow, VaccineStart,
};
use covid_graph::{run_full_load, IngestOptions, MemoryGraph};
use tempfile::TempDir;

use common::{write_sources, GLOBAL, METADATA, VACCINATIONS};

#[tokio::test]
async fn test_loaded_values_round_trip_through_queries() {
    let dir = TempDir::new().unwrap();
    let paths = write_sources(&dir, METADATA, VACCINATIONS, GLOBAL);
    let graph = MemoryGraph::new();

    let reports = run_full_load(&graph, &paths, IngestOptions::default()).await.unwrap();
    assert_eq!(reports.len(), 3);
    assert!(reports.iter().all(|r| r.is_clean()));
    assert_eq!(reports[0].rows_written, 2);
    assert_eq!(reports[0].rows_skipped, 1);
    assert_eq!(reports[1].rows_written, 2);
    assert_eq!(reports[2].rows_written, 2);

    let totals = graph.total_cases_deaths("US", "2021-12-01").await.unwrap().unwrap();
    assert_eq!(totals.total_cumulative_cases, 1000);
    assert_eq!(totals.total_cumulative_deaths, 50);

    let vaccinated = graph.vaccinated("US", "2021-12-01").await.unwrap().unwrap();
    assert_eq!(vaccinated.total_vaccinated, 500.0);

    assert_eq!(
        graph.vaccines_used("US").await.unwrap(),
        vec![VaccineStart {
            vaccine: "Pfizer".into(),
            start_date: "2021-01-01".into(),
        }]
    );

    assert_eq!(
        graph.highest_cases("2021-12-01").await.unwrap(),
        Some(HighestCases {
            country: "US".into(),
            cases: 1000,
        })
    );

    assert_eq!(
        graph.most_used_vaccine("Americas").await.unwrap(),
        Some(VaccineAdoption {
            vaccine: "CoronaVac".into(),
            usage: 1,
        })
    );

    assert_eq!(graph.country_name("US").await.as_deref(), Some("United States of America"));
    assert_eq!(graph.vaccine("Pfizer").await.unwrap().company, "Pfizer BioNTech");
}

#[tokio::test]
async fn test_reloading_does_not_duplicate_anything() {
    let dir = TempDir::new().unwrap();
    let paths = write_sources(&dir, METADATA, VACCINATIONS, GLOBAL);
    let graph = MemoryGraph::new();

    run_full_load(&graph, &paths, IngestOptions::default()).await.unwrap();
    let first = graph.counts().await;
    run_full_load(&graph, &paths, IngestOptions::default()).await.unwrap();
    assert_eq!(graph.counts().await, first);
}

#[tokio::test]
async fn test_bad_rows_are_reported_and_the_rest_load() {
    let global = "\
Date_reported;Country_code;Country;WHO_region;New_cases;Cumulative_cases;New_deaths;Cumulative_deaths
01/12/2021;US;United States of America;Americas;10;1000;1;50
2021-12-01;FR;France;Europe;1;2;3;4
01/12/2021;BR;Brazil;Americas;5;lots;;20
01/12/2021;DE;Germany;Europe;5;900
01/12/2021;AR;Argentina;Americas;5;300;0;9
";
    let dir = TempDir::new().unwrap();
    let paths = write_sources(&dir, METADATA, VACCINATIONS, global);
    let graph = MemoryGraph::new();

    let reports = run_full_load(&graph, &paths, IngestOptions::default()).await.unwrap();
    let report = &reports[2];
    assert_eq!(report.rows_read, 5);
    assert_eq!(report.rows_written, 2);
    let lines: Vec<u64> = report.failures.iter().map(|f| f.line).collect();
    assert_eq!(lines, vec![3, 4, 5]);
    assert!(report.failures[1].reason.contains("cumulativeCases"));
    assert!(report.failures[2].reason.contains("missing column"));

    assert!(graph.total_cases_deaths("AR", "2021-12-01").await.unwrap().is_some());
    assert!(graph.total_cases_deaths("BR", "2021-12-01").await.unwrap().is_none());
}

#[tokio::test]
async fn test_fail_fast_aborts_at_first_bad_row() {
    let global = "\
Date_reported;Country_code;Country;WHO_region;New_cases;Cumulative_cases;New_deaths;Cumulative_deaths
01/12/2021;US;United States of America;Americas;10;x;1;50
01/12/2021;AR;Argentina;Americas;5;300;0;9
";
    let dir = TempDir::new().unwrap();
    let paths = write_sources(&dir, METADATA, VACCINATIONS, global);
    let graph = MemoryGraph::new();

    let err = run_full_load(&graph, &paths, IngestOptions { fail_fast: true })
        .await
        .unwrap_err();
    match err {
        CovidError::Aborted { file, line, .. } => {
            assert!(file.ends_with("WHO-COVID-19-global-data.csv"));
            assert_eq!(line, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(graph.total_cases_deaths("AR", "2021-12-01").await.unwrap().is_none());
}

#[tokio::test]
async fn test_missing_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let mut paths = write_sources(&dir, METADATA, VACCINATIONS, GLOBAL);
    paths.vaccinations = Path::new("/nonexistent/vaccination-data.csv").to_path_buf();

    let err = run_full_load(&MemoryGraph::new(), &paths, IngestOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, CovidError::Csv(_)));
}

/// Accepts everything except case statistics, which it rejects like a broken backend would.
struct RejectingWriter;

#[async_trait]
impl CovidWriter for RejectingWriter {
    async fn prepare_schema(&self) -> CovidResult<()> {
        Ok(())
    }

    async fn upsert_vaccine_metadata(&self, _row: &VaccineMetadataRow) -> CovidResult<()> {
        Ok(())
    }

    async fn upsert_vaccination(&self, _row: &VaccinationRow) -> CovidResult<()> {
        Ok(())
    }

    async fn upsert_covid_stats(&self, _row: &CovidStatsRow) -> CovidResult<()> {
        Err(CovidError::Query("ServiceUnavailable".into()))
    }
}

#[tokio::test]
async fn test_write_failures_are_reported_per_row() {
    let dir = TempDir::new().unwrap();
    let paths = write_sources(&dir, METADATA, VACCINATIONS, GLOBAL);

    let reports = run_full_load(&RejectingWriter, &paths, IngestOptions::default()).await.unwrap();
    assert!(reports[0].is_clean());
    assert_eq!(reports[2].failures.len(), 2);
    assert_eq!(reports[2].failures[0].reason, "ServiceUnavailable");
    assert_eq!(
        reports[2].to_string(),
        format!("{}: 2 read, 0 written, 0 skipped, 2 failed", paths.global.display())
    );
}

/// Fails schema preparation.
struct NoSchema;

#[async_trait]
impl CovidWriter for NoSchema {
    async fn prepare_schema(&self) -> CovidResult<()> {
        Err(CovidError::Query("Unable to create constraint".into()))
    }

    async fn upsert_vaccine_metadata(&self, _row: &VaccineMetadataRow) -> CovidResult<()> {
        unreachable!("schema failure must stop the load")
    }

    async fn upsert_vaccination(&self, _row: &VaccinationRow) -> CovidResult<()> {
        unreachable!("schema failure must stop the load")
    }

    async fn upsert_covid_stats(&self, _row: &CovidStatsRow) -> CovidResult<()> {
        unreachable!("schema failure must stop the load")
    }
}

#[tokio::test]
async fn test_schema_failure_is_fatal() {
    let dir = TempDir::new().unwrap();
    let paths = write_sources(&dir, METADATA, VACCINATIONS, GLOBAL);
    assert!(run_full_load(&NoSchema, &paths, IngestOptions::default()).await.is_err());
}
