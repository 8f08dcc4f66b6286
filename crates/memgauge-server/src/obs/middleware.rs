//! Request instrumentation layer.
//!
//! Applied with `route_layer`, so only matched application routes are
//! counted. The status recorded is the final response status, which covers
//! handlers that fail through `AppError` (counted as 500).

use std::time::Instant;

use axum::extract::{MatchedPath, Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::app_state::AppState;

pub async fn track_requests(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let method = req.method().as_str().to_owned();
    let endpoint = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    let start = Instant::now();
    let resp = next.run(req).await;

    state.metrics().record_request(
        &state.cfg().app.name,
        &method,
        &endpoint,
        resp.status().as_u16(),
        start.elapsed(),
    );
    resp
}
