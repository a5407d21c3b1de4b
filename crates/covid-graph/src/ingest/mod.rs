//! CSV to graph ingestion pipeline.
//!
//! Prepares the schema, then loads the three source files in order:
//! vaccination metadata, vaccination statistics, global case/death data.
//! Rows are upserted one statement at a time in file order. A row that fails
//! to parse or write is recorded in the file's [`IngestReport`] and the load
//! moves on, unless [`IngestOptions::fail_fast`] is set.

mod sources;

use std::fmt;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use covid_core::{CovidError, CovidResult, CovidWriter};
use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info, warn};

/// Locations of the three source files.
#[derive(Debug, Clone)]
pub struct LoadPaths {
    pub metadata: PathBuf,
    pub vaccinations: PathBuf,
    pub global: PathBuf,
}

impl Default for LoadPaths {
    fn default() -> Self {
        Self {
            metadata: PathBuf::from("data/vaccination-metadata.csv"),
            vaccinations: PathBuf::from("data/vaccination-data.csv"),
            global: PathBuf::from("data/WHO-COVID-19-global-data.csv"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IngestOptions {
    /// Stop the whole load at the first failed row.
    pub fail_fast: bool,
}

/// A row that could not be loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct RowFailure {
    /// 1-based line in the source file.
    pub line: u64,
    pub reason: String,
}

/// Outcome of loading one source file.
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub source: String,
    pub rows_read: usize,
    pub rows_written: usize,
    pub rows_skipped: usize,
    pub failures: Vec<RowFailure>,
}

impl IngestReport {
    fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for IngestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} read, {} written, {} skipped, {} failed",
            self.source,
            self.rows_read,
            self.rows_written,
            self.rows_skipped,
            self.failures.len()
        )
    }
}

/// A record type that can be parsed from one source file and written to the graph.
#[async_trait]
pub(crate) trait SourceRow: Sized + Send + Sync {
    /// Parse a CSV record. `Ok(None)` marks a row that is deliberately skipped.
    fn parse(record: &StringRecord) -> CovidResult<Option<Self>>;

    async fn write(&self, writer: &dyn CovidWriter) -> CovidResult<()>;
}

/// Run the full load: schema, then the three source files.
///
/// Schema preparation failures and unreadable files abort the load; row
/// failures are collected in the returned reports.
pub async fn run_full_load(
    writer: &dyn CovidWriter,
    paths: &LoadPaths,
    options: IngestOptions,
) -> CovidResult<Vec<IngestReport>> {
    writer.prepare_schema().await?;
    info!("Constraints and indexes in place");

    let reports = vec![
        load_file::<covid_core::VaccineMetadataRow>(writer, &paths.metadata, options).await?,
        load_file::<covid_core::VaccinationRow>(writer, &paths.vaccinations, options).await?,
        load_file::<covid_core::CovidStatsRow>(writer, &paths.global, options).await?,
    ];

    let failed: usize = reports.iter().map(|r| r.failures.len()).sum();
    let written: usize = reports.iter().map(|r| r.rows_written).sum();
    info!(written, failed, "Full load complete");

    Ok(reports)
}

/// Load one semicolon-delimited file. The header row is discarded.
pub(crate) async fn load_file<R: SourceRow>(
    writer: &dyn CovidWriter,
    path: &Path,
    options: IngestOptions,
) -> CovidResult<IngestReport> {
    let source = path.display().to_string();
    info!(file = %source, "Loading data");

    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let mut report = IngestReport::new(&source);

    for (index, result) in reader.records().enumerate() {
        report.rows_read += 1;
        // Header is line 1.
        let fallback_line = index as u64 + 2;

        let outcome = match result {
            Ok(record) => {
                let line = record.position().map_or(fallback_line, |p| p.line());
                (line, load_record::<R>(writer, &record).await)
            }
            Err(e) => (
                e.position().map_or(fallback_line, |p| p.line()),
                Err(CovidError::Csv(e)),
            ),
        };

        match outcome {
            (line, Ok(true)) => {
                report.rows_written += 1;
                debug!(file = %source, line, "Row loaded");
            }
            (line, Ok(false)) => {
                report.rows_skipped += 1;
                debug!(file = %source, line, "Row skipped");
            }
            (line, Err(e)) => {
                warn!(file = %source, line, error = %e, "Row failed");
                if options.fail_fast {
                    return Err(CovidError::Aborted {
                        file: source,
                        line,
                        reason: e.to_string(),
                    });
                }
                report.failures.push(RowFailure {
                    line,
                    reason: e.to_string(),
                });
            }
        }
    }

    info!(
        file = %source,
        read = report.rows_read,
        written = report.rows_written,
        skipped = report.rows_skipped,
        failed = report.failures.len(),
        "Finished processing file"
    );
    Ok(report)
}

/// Returns whether the row was written (`false` when skipped).
async fn load_record<R: SourceRow>(writer: &dyn CovidWriter, record: &StringRecord) -> CovidResult<bool> {
    match R::parse(record)? {
        Some(row) => {
            row.write(writer).await?;
            Ok(true)
        }
        None => Ok(false),
    }
}
