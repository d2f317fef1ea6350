use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    http::handlers::{
        callback_handler, get_leaderboard_handler, get_playlist_handler, get_ratings_handler,
        get_stats_handler, get_track_meta_handler, login_handler, put_track_meta_handler,
        session_handler, submit_rating_handler,
    },
    state::AppState,
};

pub fn create_http_routes(state: AppState) -> Router {
    Router::new()
        .route("/auth/login", get(login_handler))
        .route("/auth/callback", get(callback_handler))
        .route("/api/session", get(session_handler))
        .route("/api/playlist", get(get_playlist_handler))
        .route(
            "/api/ratings",
            get(get_ratings_handler).post(submit_rating_handler),
        )
        .route("/api/stats", get(get_stats_handler))
        .route("/api/leaderboard", get(get_leaderboard_handler))
        .route(
            "/api/track-meta",
            get(get_track_meta_handler).put(put_track_meta_handler),
        )
        .with_state(state)
}
