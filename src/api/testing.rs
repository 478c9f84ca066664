//! Testing endpoints.

use axum::{extract::State, http::StatusCode};

use crate::AppState;

/// DELETE /testing/all-data - Remove every video.
pub async fn clear_all(State(state): State<AppState>) -> StatusCode {
    let removed = state.repo.clear().await;
    tracing::warn!(removed, "All videos cleared");
    StatusCode::NO_CONTENT
}
