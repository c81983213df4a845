use crate::dtos::ProbeResponse;
use crate::startup::AppState;
use axum::{extract::State, Json};

/// Database connectivity report. Always answers 200; failures are reported
/// in the body.
#[tracing::instrument(skip(state))]
pub async fn test_database(State(state): State<AppState>) -> Json<ProbeResponse> {
    let probe = state.database.probe().await;
    tracing::info!(database = %probe.status, connected = probe.connected, "Database probe finished");

    Json(ProbeResponse::new(probe, &state.config.database))
}
