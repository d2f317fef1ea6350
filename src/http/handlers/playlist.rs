use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::{
    auth::AuthSession,
    models::PlaylistEntry,
    playlist::{filter_by_search, load_playlist},
    state::AppState,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct PlaylistResponse {
    pub tracks: Vec<PlaylistEntry>,
}

#[derive(Deserialize)]
pub struct PlaylistQuery {
    pub q: Option<String>,
}

pub async fn get_playlist_handler(
    State(state): State<AppState>,
    session: AuthSession,
    Query(query): Query<PlaylistQuery>,
) -> Result<Json<PlaylistResponse>, (StatusCode, String)> {
    let tracks = load_playlist(
        state.catalog.as_ref(),
        state.store.as_ref(),
        session.access_token(),
        &state.playlist_id,
    )
    .await
    .map_err(|e| {
        tracing::error!("Playlist fetch error: {}", e);
        e.to_response()
    })?;

    let tracks = match query.q.as_deref() {
        Some(q) => filter_by_search(tracks, q),
        None => tracks,
    };

    Ok(Json(PlaylistResponse { tracks }))
}
