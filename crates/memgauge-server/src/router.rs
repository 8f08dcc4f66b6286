//! Axum router wiring.
//!
//! Operational routes are served as-is; application routes sit behind the
//! request instrumentation layer.

use axum::{middleware, routing::get, Router};

use crate::{app_state::AppState, handlers, obs, ops};

pub fn build_router(state: AppState) -> Router {
    let app_routes = Router::new()
        .route("/", get(handlers::index))
        .route("/time/", get(handlers::time))
        .route("/fail/", get(handlers::fail))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            obs::middleware::track_requests,
        ));

    Router::new()
        .route("/metrics", get(ops::metrics))
        .route("/memory/", get(ops::memory))
        .route("/healthz", get(ops::healthz))
        .merge(app_routes)
        .with_state(state)
}
