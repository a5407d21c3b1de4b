//! Covid Graph Web Server
//!
//! Axum-based read-only JSON API over the COVID-19 graph.

pub mod error;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{http::Method, routing::get, Router};
use covid_core::CovidQueries;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    Router::new()
        .route("/total-cases-deaths", get(routes::cases::total_cases_deaths))
        .route("/highest-cases", get(routes::cases::highest_cases))
        .route("/vaccinated", get(routes::vaccination::vaccinated))
        .route("/vaccines-used", get(routes::vaccines::vaccines_used))
        .route("/most-used-vaccine", get(routes::vaccines::most_used_vaccine))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server until Ctrl+C.
pub async fn run_server(queries: Arc<dyn CovidQueries>, addr: SocketAddr) -> anyhow::Result<()> {
    let app = create_router(AppState::new(queries));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server started at http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        })
        .await?;
    Ok(())
}
