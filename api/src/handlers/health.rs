use axum::extract::State;

use crate::handlers::ErrorResponse;
use crate::state::AppState;

/// Health check endpoint, reporting whether the database answers
#[tracing::instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> Result<&'static str, ErrorResponse> {
    state.db.health_check().await.map_err(|e| {
        tracing::warn!(error = %e, "Health check failed");
        ErrorResponse::new("service_unavailable", e.to_string())
    })?;

    Ok("OK")
}
