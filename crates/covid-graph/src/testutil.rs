//! Test utilities for spinning up a real Neo4j instance via testcontainers.

use testcontainers::{
    core::{ContainerPort, WaitFor},
    runners::AsyncRunner,
    ContainerAsync, GenericImage, ImageExt,
};

use crate::{GraphClient, GraphConfig};

const NEO4J_USER: &str = "neo4j";
const NEO4J_PASSWORD: &str = "covid-test";

/// Spin up a Neo4j container and return the container handle + connected GraphClient.
///
/// The container is stopped when `ContainerAsync` is dropped, so callers must
/// hold it for the duration of the test.
pub async fn neo4j_container() -> (ContainerAsync<GenericImage>, GraphClient) {
    let image = GenericImage::new("neo4j", "5.25.1-enterprise")
        .with_exposed_port(ContainerPort::Tcp(7687))
        .with_wait_for(WaitFor::message_on_stdout("Started."))
        .with_env_var("NEO4J_AUTH", format!("{NEO4J_USER}/{NEO4J_PASSWORD}"))
        .with_env_var("NEO4J_ACCEPT_LICENSE_AGREEMENT", "yes");

    let container: ContainerAsync<GenericImage> = image.start().await.expect("Failed to start Neo4j container");

    let host_port = container
        .get_host_port_ipv4(7687)
        .await
        .expect("Failed to get Neo4j host port");

    let config = GraphConfig::from_parts(
        Some(format!("bolt://127.0.0.1:{host_port}")),
        Some(NEO4J_USER.to_string()),
        Some(NEO4J_PASSWORD.to_string()),
    )
    .expect("Neo4j test settings are complete");

    let client = GraphClient::connect(&config).await.expect("Failed to connect to Neo4j");

    (container, client)
}
