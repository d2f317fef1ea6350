use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::{
    auth::AuthSession,
    errors::AppError,
    models::TrackRatings,
    ratings::{get_ratings, submit_rating},
    state::AppState,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRatingPayload {
    #[serde(default)]
    pub track_id: serde_json::Value,
    #[serde(default)]
    pub rating: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitRatingResponse {
    pub success: bool,
    pub average: Option<f64>,
    pub count: u64,
}

pub async fn submit_rating_handler(
    State(state): State<AppState>,
    session: AuthSession,
    Json(payload): Json<SubmitRatingPayload>,
) -> Result<Json<SubmitRatingResponse>, (StatusCode, String)> {
    let rater = session.rater().map_err(|e| e.to_response())?;
    let track_id = match &payload.track_id {
        serde_json::Value::String(id) => id.as_str(),
        serde_json::Value::Null => "",
        other => {
            tracing::error!("Rejected non-string trackId: {}", other);
            return Err(AppError::Validation("trackId must be a string".into()).to_response());
        }
    };

    let aggregate = submit_rating(state.store.as_ref(), &rater, track_id, &payload.rating)
        .await
        .map_err(|e| {
            tracing::error!("Failed to submit rating for track '{}': {}", track_id, e);
            e.to_response()
        })?;

    Ok(Json(SubmitRatingResponse {
        success: true,
        average: aggregate.average,
        count: aggregate.count,
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingsQuery {
    pub track_id: Option<String>,
}

pub async fn get_ratings_handler(
    State(state): State<AppState>,
    Query(query): Query<RatingsQuery>,
) -> Result<Json<TrackRatings>, (StatusCode, String)> {
    let track_id = query.track_id.unwrap_or_default();

    let ratings = get_ratings(state.store.as_ref(), &track_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get ratings for track '{}': {}", track_id, e);
            e.to_response()
        })?;

    Ok(Json(ratings))
}
