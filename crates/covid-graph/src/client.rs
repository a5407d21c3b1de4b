//! Neo4j connection client.

use std::future::Future;
use std::time::Duration;

use covid_core::{CovidError, CovidResult};
use neo4rs::{ConfigBuilder, Graph, Query, Row};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

fn default_database() -> String {
    "neo4j".to_string()
}

fn default_max_connections() -> usize {
    16
}

fn default_query_timeout_secs() -> u64 {
    30
}

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: u64,
}

impl GraphConfig {
    /// Build a config from the three connection settings, failing on any that is unset or blank.
    pub fn from_parts(uri: Option<String>, user: Option<String>, password: Option<String>) -> CovidResult<Self> {
        fn require(value: Option<String>, name: &str) -> CovidResult<String> {
            match value {
                Some(v) if !v.trim().is_empty() => Ok(v),
                _ => Err(CovidError::config(format!("{name} is not set"))),
            }
        }

        Ok(Self {
            uri: require(uri, "NEO4J_URI")?,
            user: require(user, "NEO4J_USER")?,
            password: require(password, "NEO4J_PASSWORD")?,
            database: default_database(),
            max_connections: default_max_connections(),
            query_timeout_secs: default_query_timeout_secs(),
        })
    }

    pub fn with_query_timeout(mut self, secs: u64) -> Self {
        self.query_timeout_secs = secs;
        self
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }
}

/// Client for the COVID-19 graph.
///
/// Wraps the neo4rs connection pool. Every statement checks a connection out
/// of the pool for its own duration and returns it when done, whatever the
/// outcome, and runs under the configured timeout.
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
    timeout: Duration,
}

impl GraphClient {
    /// Create a new GraphClient from config.
    ///
    /// `Graph::connect` only builds the pool, so a `RETURN 1` ping forces the
    /// bolt handshake and surfaces bad credentials or an unreachable server here.
    pub async fn connect(config: &GraphConfig) -> CovidResult<Self> {
        let neo4j_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .db(config.database.as_str())
            .max_connections(config.max_connections)
            .build()
            .map_err(|e| CovidError::Connection(e.to_string()))?;

        let graph = Graph::connect(neo4j_config)
            .await
            .map_err(|e| CovidError::Connection(e.to_string()))?;

        let client = Self {
            graph,
            timeout: config.query_timeout(),
        };

        client
            .execute(Query::new("RETURN 1".to_string()))
            .await
            .map_err(|e| CovidError::Connection(format!("Neo4j is not responding to queries: {e}")))?;

        Ok(client)
    }

    async fn bounded<T, F>(&self, fut: F) -> CovidResult<T>
    where
        F: Future<Output = Result<T, neo4rs::Error>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result.map_err(CovidError::query),
            Err(_) => Err(CovidError::Timeout(self.timeout)),
        }
    }

    /// Execute a Cypher statement that returns no results.
    pub async fn execute(&self, query: Query) -> CovidResult<()> {
        self.bounded(self.graph.run(query)).await
    }

    /// Execute a Cypher query and collect every row.
    pub async fn query(&self, query: Query) -> CovidResult<Vec<Row>> {
        let graph = &self.graph;
        let rows = self
            .bounded(async move {
                let mut stream = graph.execute(query).await?;
                let mut rows = Vec::new();
                while let Some(row) = stream.next().await? {
                    rows.push(row);
                }
                Ok::<_, neo4rs::Error>(rows)
            })
            .await?;

        debug!(rows = rows.len(), "Query returned");
        Ok(rows)
    }

    /// Execute a Cypher query and return a single scalar value.
    pub async fn query_scalar<T: DeserializeOwned>(&self, query: Query, field: &str) -> CovidResult<Option<T>> {
        match self.query(query).await?.first() {
            Some(row) => column(row, field).map(Some),
            None => Ok(None),
        }
    }

    /// Get node and relationship counts for status display.
    pub async fn get_counts(&self) -> CovidResult<GraphCounts> {
        let node_query = Query::new("MATCH (n) RETURN count(n) as count".to_string());
        let rel_query = Query::new("MATCH ()-[r]->() RETURN count(r) as count".to_string());

        let node_count: i64 = self.query_scalar(node_query, "count").await?.unwrap_or(0);
        let rel_count: i64 = self.query_scalar(rel_query, "count").await?.unwrap_or(0);

        Ok(GraphCounts {
            nodes: node_count as usize,
            relationships: rel_count as usize,
        })
    }
}

/// Read a named column from a result row.
pub(crate) fn column<T: DeserializeOwned>(row: &Row, field: &str) -> CovidResult<T> {
    row.get::<T>(field)
        .map_err(|e| CovidError::Query(format!("Failed to get field '{field}': {e}")))
}

/// Node and relationship counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphCounts {
    pub nodes: usize,
    pub relationships: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_requires_every_setting() {
        let err = GraphConfig::from_parts(None, Some("neo4j".into()), Some("secret".into())).unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: NEO4J_URI is not set");

        let err = GraphConfig::from_parts(Some("bolt://db:7687".into()), Some("neo4j".into()), Some("  ".into()))
            .unwrap_err();
        assert!(err.to_string().contains("NEO4J_PASSWORD"));
    }

    #[test]
    fn test_config_defaults() {
        let config = GraphConfig::from_parts(
            Some("bolt://db:7687".into()),
            Some("neo4j".into()),
            Some("secret".into()),
        )
        .unwrap()
        .with_query_timeout(5);
        assert_eq!(config.database, "neo4j");
        assert_eq!(config.query_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: GraphConfig = serde_json::from_value(serde_json::json!({
            "uri": "bolt://localhost:7687",
            "user": "neo4j",
            "password": "secret",
        }))
        .unwrap();
        assert_eq!(config.max_connections, 16);
        assert_eq!(config.query_timeout_secs, 30);
    }
}
