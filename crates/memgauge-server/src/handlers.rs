//! Demo application routes. Instrumented by `obs::middleware`.

use std::time::Duration;

use axum::extract::State;
use rand::Rng;

use crate::app_state::AppState;
use crate::error::AppError;

pub async fn index() -> &'static str {
    "Hello World"
}

/// Sleeps a random 1..=`time.max_secs` seconds.
pub async fn time(State(state): State<AppState>) -> String {
    let secs = rand::thread_rng().gen_range(1..=state.cfg().time.max_secs);
    tracing::debug!(secs, "simulating work");
    tokio::time::sleep(Duration::from_secs(secs)).await;
    format!("Time: {secs}")
}

/// Always fails, to exercise the 500 path.
pub async fn fail() -> Result<&'static str, AppError> {
    Err(AppError::Internal("attempt to divide by zero".into()))
}
