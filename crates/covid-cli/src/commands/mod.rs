//! CLI command definitions and handlers.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use covid_graph::{GraphClient, GraphConfig};

pub mod graph;
pub mod load;
pub mod serve;

/// COVID-19 graph: ingestion and query service
#[derive(Parser)]
#[command(name = "covid")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub neo4j: Neo4jArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Connection settings shared by every command that talks to Neo4j.
#[derive(Args, Clone)]
pub struct Neo4jArgs {
    /// Bolt URI of the Neo4j server
    #[arg(long = "neo4j-uri", env = "NEO4J_URI", global = true)]
    pub uri: Option<String>,

    /// Neo4j user name
    #[arg(long = "neo4j-user", env = "NEO4J_USER", global = true)]
    pub user: Option<String>,

    /// Neo4j password
    #[arg(long = "neo4j-password", env = "NEO4J_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Per-statement timeout in seconds
    #[arg(long, default_value = "30", global = true)]
    pub query_timeout_secs: u64,
}

impl Neo4jArgs {
    pub fn config(&self) -> Result<GraphConfig> {
        let config = GraphConfig::from_parts(self.uri.clone(), self.user.clone(), self.password.clone())?;
        Ok(config.with_query_timeout(self.query_timeout_secs))
    }

    /// Validate the settings and open a connection.
    pub async fn connect(&self) -> Result<GraphClient> {
        let config = self.config()?;
        GraphClient::connect(&config)
            .await
            .with_context(|| format!("Could not connect to Neo4j at {}", config.uri))
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP query service
    Serve(serve::ServeArgs),

    /// Load the CSV sources into the graph
    Load(load::LoadArgs),

    /// Create constraints and indexes
    Schema,

    /// Show node and relationship counts
    Status,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Serve(args) => serve::execute(args, &self.neo4j).await,
            Commands::Load(args) => load::execute(args, &self.neo4j).await,
            Commands::Schema => graph::cmd_schema(&self.neo4j).await,
            Commands::Status => graph::cmd_status(&self.neo4j).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_connection_options() {
        let cli = Cli::try_parse_from([
            "covid",
            "status",
            "--neo4j-uri",
            "bolt://db:7687",
            "--neo4j-user",
            "neo4j",
            "--neo4j-password",
            "secret",
            "--query-timeout-secs",
            "5",
        ])
        .unwrap();

        assert!(matches!(cli.command, Commands::Status));
        let config = cli.neo4j.config().unwrap();
        assert_eq!(config.uri, "bolt://db:7687");
        assert_eq!(config.query_timeout_secs, 5);
    }

    #[test]
    fn test_blank_setting_is_rejected() {
        let args = Neo4jArgs {
            uri: Some("bolt://db:7687".into()),
            user: Some("  ".into()),
            password: Some("secret".into()),
            query_timeout_secs: 30,
        };
        let err = args.config().unwrap_err();
        assert!(err.to_string().contains("NEO4J_USER"));
    }
}
