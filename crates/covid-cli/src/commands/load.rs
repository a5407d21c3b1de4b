//! CSV load command.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use covid_core::CovidWriter;
use covid_graph::{run_full_load, IngestOptions, IngestReport, LoadPaths, MemoryGraph};

use super::{graph::print_counts, Neo4jArgs};

/// Failures listed per file before the rest are summarized.
const SHOWN_FAILURES: usize = 10;

#[derive(Args)]
pub struct LoadArgs {
    /// Vaccine authorization/start metadata
    #[arg(long, default_value = "data/vaccination-metadata.csv")]
    pub metadata: PathBuf,

    /// Per-country vaccination statistics
    #[arg(long, default_value = "data/vaccination-data.csv")]
    pub vaccinations: PathBuf,

    /// Daily case and death counts
    #[arg(long, default_value = "data/WHO-COVID-19-global-data.csv")]
    pub global: PathBuf,

    /// Abort at the first row that cannot be loaded
    #[arg(long)]
    pub fail_fast: bool,

    /// Load into an in-memory graph instead of Neo4j
    #[arg(long)]
    pub dry_run: bool,
}

impl LoadArgs {
    fn paths(&self) -> LoadPaths {
        LoadPaths {
            metadata: self.metadata.clone(),
            vaccinations: self.vaccinations.clone(),
            global: self.global.clone(),
        }
    }
}

pub async fn execute(args: LoadArgs, neo4j: &Neo4jArgs) -> Result<()> {
    let paths = args.paths();
    let options = IngestOptions {
        fail_fast: args.fail_fast,
    };

    let (reports, counts) = if args.dry_run {
        println!("{}", "Loading into memory (dry run)...".bold());
        let graph = MemoryGraph::new();
        let reports = load(&graph, &paths, options).await?;
        (reports, graph.counts().await)
    } else {
        let client = neo4j.connect().await?;
        println!("{}", "Loading into Neo4j...".bold());
        let reports = load(&client, &paths, options).await?;
        (reports, client.get_counts().await?)
    };

    println!();
    for report in &reports {
        print_report(report);
    }
    println!();
    print_counts(counts);

    let failed: usize = reports.iter().map(|r| r.failures.len()).sum();
    if failed > 0 {
        bail!("{failed} rows could not be loaded");
    }
    Ok(())
}

async fn load(writer: &dyn CovidWriter, paths: &LoadPaths, options: IngestOptions) -> Result<Vec<IngestReport>> {
    Ok(run_full_load(writer, paths, options).await?)
}

fn print_report(report: &IngestReport) {
    let status = if report.is_clean() {
        "✓".green()
    } else {
        "✗".red()
    };
    println!("  {} {}", status, report);

    for failure in report.failures.iter().take(SHOWN_FAILURES) {
        println!("      {} {}", format!("line {}:", failure.line).yellow(), failure.reason);
    }
    if report.failures.len() > SHOWN_FAILURES {
        println!(
            "      {}",
            format!("... and {} more", report.failures.len() - SHOWN_FAILURES).dimmed()
        );
    }
}

