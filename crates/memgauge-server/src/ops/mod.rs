//! Operational HTTP endpoints.
//!
//! - `/healthz` : liveness
//! - `/metrics` : Prometheus text format, counts its own scrapes
//! - `/memory/` : samples container memory, then renders like `/metrics`

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use memgauge_core::encoding::CONTENT_TYPE;

use crate::app_state::AppState;
use crate::error::AppError;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    state.metrics().record_scrape();
    exposition(&state)
}

pub async fn memory(State(state): State<AppState>) -> Response {
    let outcomes = state.sampler().sample().await;
    let failed = outcomes.iter().filter(|(_, o)| o.is_err()).count();
    tracing::info!(containers = outcomes.len(), failed, "memory sample finished");
    exposition(&state)
}

fn exposition(state: &AppState) -> Response {
    match state.render_metrics() {
        Ok(body) => (StatusCode::OK, [(header::CONTENT_TYPE, CONTENT_TYPE)], body).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}
