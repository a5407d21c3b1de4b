//! Application state.

use std::sync::Arc;

use covid_core::CovidQueries;

/// Application state shared across handlers.
///
/// Built once at startup; handlers reach the graph only through it.
#[derive(Clone)]
pub struct AppState {
    pub queries: Arc<dyn CovidQueries>,
}

impl AppState {
    pub fn new(queries: Arc<dyn CovidQueries>) -> Self {
        Self { queries }
    }
}
