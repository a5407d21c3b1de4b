//! # Covid Graph
//!
//! Neo4j integration for the COVID-19 knowledge graph.
//!
//! Provides the connection client, schema preparation, the read queries
//! behind the HTTP endpoints, the Cypher upserts used by ingestion, and the
//! CSV ingestion pipeline itself.

pub mod client;
pub mod ingest;
pub mod memory;
pub mod queries;
pub mod schema;
#[cfg(feature = "test-utils")]
pub mod testutil;
pub mod writer;

pub use client::{GraphClient, GraphConfig, GraphCounts};
pub use ingest::{run_full_load, IngestOptions, IngestReport, LoadPaths, RowFailure};
pub use memory::MemoryGraph;
