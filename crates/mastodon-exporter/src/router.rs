//! Axum router wiring.
//!
//! `/` and `/metrics` serve the scrape, GET only. HEAD needs its own 405
//! handler because `get` also matches HEAD; other methods get 405 from the
//! method router. Everything else is 404.

use axum::{routing::get, Router};

use crate::{app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ops::metrics).head(ops::method_not_allowed))
        .route("/metrics", get(ops::metrics).head(ops::method_not_allowed))
        .with_state(state)
}
