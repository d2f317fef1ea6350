use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::Redirect,
};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{AuthSession, generate_session_token},
    errors::AppError,
    state::AppState,
};

pub async fn login_handler(
    State(state): State<AppState>,
) -> Result<Redirect, (StatusCode, String)> {
    let url = state.catalog.authorize_url().map_err(|e| {
        tracing::error!("Failed to build authorize url: {}", e);
        e.to_response()
    })?;

    Ok(Redirect::to(&url))
}

#[derive(Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub spotify_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

pub async fn callback_handler(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Result<Json<SessionResponse>, (StatusCode, String)> {
    if let Some(error) = query.error {
        tracing::warn!("Spotify authorization denied: {}", error);
        return Err(AppError::Unauthorized(format!("Authorization denied: {error}")).to_response());
    }
    let code = query
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::Validation("code required".into()).to_response())?;

    let access_token = state.catalog.exchange_code(&code).await.map_err(|e| {
        tracing::error!("Error exchanging authorization code: {}", e);
        e.to_response()
    })?;

    let profile = state.catalog.profile(&access_token).await.map_err(|e| {
        tracing::error!("Error fetching Spotify profile: {}", e);
        e.to_response()
    })?;

    let token = generate_session_token(
        &profile.id,
        profile.name(),
        &access_token,
        &state.jwt_secret,
    )
    .map_err(|e| e.to_response())?;

    tracing::info!("Session created for Spotify user {}", profile.id);

    Ok(Json(SessionResponse {
        spotify_id: profile.id.clone(),
        name: profile.name().to_string(),
        token: Some(token),
    }))
}

pub async fn session_handler(session: AuthSession) -> Json<SessionResponse> {
    Json(SessionResponse {
        spotify_id: session.0.sub,
        name: session.0.name,
        token: None,
    })
}
