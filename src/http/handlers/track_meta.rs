use axum::{Json, extract::State, http::StatusCode};
use std::collections::HashMap;

use crate::{auth::AuthSession, errors::AppError, state::AppState};

pub async fn get_track_meta_handler(
    State(state): State<AppState>,
) -> Result<Json<HashMap<String, String>>, (StatusCode, String)> {
    let overrides = state.store.added_by_overrides().await.map_err(|e| {
        tracing::error!("Failed to load added-by overrides: {}", e);
        e.to_response()
    })?;

    Ok(Json(overrides))
}

/// Body is `{trackId: addedBy}`; each pair replaces any earlier override for that track.
pub async fn put_track_meta_handler(
    State(state): State<AppState>,
    session: AuthSession,
    Json(payload): Json<HashMap<String, String>>,
) -> Result<Json<&'static str>, (StatusCode, String)> {
    session.rater().map_err(|e| e.to_response())?;

    let mut overrides = Vec::with_capacity(payload.len());
    for (track_id, added_by) in payload {
        let track_id = track_id.trim().to_string();
        if track_id.is_empty() {
            return Err(AppError::Validation("trackId required".into()).to_response());
        }
        overrides.push((track_id, added_by.trim().to_string()));
    }

    state
        .store
        .put_added_by_overrides(&overrides)
        .await
        .map_err(|e| {
            tracing::error!("Failed to store added-by overrides: {}", e);
            e.to_response()
        })?;

    Ok(Json("success"))
}
