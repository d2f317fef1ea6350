use axum::{Json, extract::State, http::StatusCode};

use crate::{
    auth::AuthSession,
    models::stats::{StatsReport, TrackStanding},
    playlist::load_rated_playlist,
    state::AppState,
    stats::{build_report, track_leaderboard},
};

pub async fn get_stats_handler(
    State(state): State<AppState>,
    session: AuthSession,
) -> Result<Json<StatsReport>, (StatusCode, String)> {
    let rater = session.rater().map_err(|e| e.to_response())?;

    let data = load_rated_playlist(
        state.catalog.as_ref(),
        state.store.as_ref(),
        session.access_token(),
        &state.playlist_id,
    )
    .await
    .map_err(|e| {
        tracing::error!("Failed to load statistics: {}", e);
        e.to_response()
    })?;

    Ok(Json(build_report(&data, &rater.id)))
}

pub async fn get_leaderboard_handler(
    State(state): State<AppState>,
    session: AuthSession,
) -> Result<Json<Vec<TrackStanding>>, (StatusCode, String)> {
    let data = load_rated_playlist(
        state.catalog.as_ref(),
        state.store.as_ref(),
        session.access_token(),
        &state.playlist_id,
    )
    .await
    .map_err(|e| {
        tracing::error!("Failed to get leaderboard: {}", e);
        e.to_response()
    })?;

    Ok(Json(track_leaderboard(&data)))
}
