//! Web server command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use super::Neo4jArgs;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, default_value = "8080")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Also write logs to this file
    #[arg(long, value_name = "FILE")]
    pub log: Option<PathBuf>,
}

pub async fn execute(args: ServeArgs, neo4j: &Neo4jArgs) -> Result<()> {
    let client = neo4j.connect().await?;

    let addr = tokio::net::lookup_host((args.host.as_str(), args.port))
        .await
        .with_context(|| format!("Invalid listen address {}:{}", args.host, args.port))?
        .next()
        .with_context(|| format!("{} did not resolve to an address", args.host))?;

    println!();
    println!("  {} {}", "Covid".cyan().bold(), "Query Service".bold());
    println!();
    for endpoint in [
        "/total-cases-deaths?country=&date=",
        "/vaccinated?country=&date=",
        "/vaccines-used?country=",
        "/highest-cases?date=",
        "/most-used-vaccine?region=",
    ] {
        println!("  {}  http://{}{}", "GET".green(), addr, endpoint);
    }
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    covid_web::run_server(Arc::new(client), addr).await
}
