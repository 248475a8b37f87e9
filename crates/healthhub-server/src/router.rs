//! Axum router wiring.
//!
//! `/users/*` for the dashboards, plus the ops endpoints.

use axum::{middleware, routing::get, Router};

use crate::{api, app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .nest("/users", api::users::routes())
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .route_layer(middleware::from_fn_with_state(state.clone(), ops::track_requests))
        .with_state(state)
}
