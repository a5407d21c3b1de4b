//! Graph maintenance commands.

use anyhow::{Context, Result};
use colored::Colorize;
use covid_graph::GraphCounts;

use super::Neo4jArgs;

/// Create constraints and indexes.
pub async fn cmd_schema(neo4j: &Neo4jArgs) -> Result<()> {
    let client = neo4j.connect().await?;
    covid_graph::schema::initialize_schema(&client)
        .await
        .context("Failed to prepare the graph schema")?;

    println!("{}", "Constraints and indexes in place.".green());
    Ok(())
}

/// Show graph status.
pub async fn cmd_status(neo4j: &Neo4jArgs) -> Result<()> {
    let client = neo4j.connect().await?;
    let counts = client.get_counts().await?;

    println!("{}", "Graph Status".bold());
    println!("{}", "─".repeat(30));
    print_counts(counts);
    Ok(())
}

pub fn print_counts(counts: GraphCounts) {
    println!("  {}:         {}", "Nodes".cyan(), counts.nodes);
    println!("  {}: {}", "Relationships".cyan(), counts.relationships);
}
