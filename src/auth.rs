use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use axum_extra::TypedHeader;
use chrono::{Duration, Utc};
use headers::{Authorization, authorization::Bearer};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{errors::AppError, models::Rater, state::AppState};

const SESSION_HOURS: i64 = 24;

/// Session token contents. `access_token` is the catalog bearer token for this user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,  // spotify user id
    pub name: String, // display name
    pub access_token: String,
    pub exp: usize,
}

pub struct AuthSession(pub Claims);

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = (StatusCode, String);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    (
                        StatusCode::UNAUTHORIZED,
                        "Missing or invalid Authorization header".into(),
                    )
                })?;

        AuthSession::from_token(bearer.token(), &state.jwt_secret).map_err(|e| e.to_response())
    }
}

impl AuthSession {
    pub fn from_token(token: &str, secret: &str) -> Result<Self, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))?;

        Ok(Self(token_data.claims))
    }

    /// The identity ratings are attributed to. Both id and display name must be present.
    pub fn rater(&self) -> Result<Rater, AppError> {
        let id = self.0.sub.trim();
        let display_name = self.0.name.trim();
        if id.is_empty() || display_name.is_empty() {
            return Err(AppError::Unauthorized("Session has no rater identity".into()));
        }

        Ok(Rater {
            id: id.to_string(),
            display_name: display_name.to_string(),
        })
    }

    pub fn access_token(&self) -> &str {
        &self.0.access_token
    }
}

pub fn generate_session_token(
    spotify_id: &str,
    name: &str,
    access_token: &str,
    secret: &str,
) -> Result<String, AppError> {
    let expiration = (Utc::now() + Duration::hours(SESSION_HOURS)).timestamp() as usize;
    let claims = Claims {
        sub: spotify_id.to_string(),
        name: name.to_string(),
        access_token: access_token.to_string(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(AppError::JwtError)
}
