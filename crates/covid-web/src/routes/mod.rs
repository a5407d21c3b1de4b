//! Route handlers.
//!
//! Every handler validates its parameters, runs one query and shapes the
//! result. An empty result is a 404, never an empty body.

pub mod cases;
pub mod vaccination;
pub mod vaccines;

use axum::extract::Query;

/// Query string pairs in request order.
///
/// Repeated names are kept rather than rejected; lookups take the first one.
pub type QueryPairs = Query<Vec<(String, String)>>;
