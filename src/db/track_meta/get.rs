use crate::{errors::AppError, models::redis::RedisKey, state::RedisClient};
use redis::AsyncCommands;
use std::collections::HashMap;

/// All added-by overrides, keyed by track id.
pub async fn get_added_by_overrides(
    redis: &RedisClient,
) -> Result<HashMap<String, String>, AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let overrides: HashMap<String, String> = conn
        .hgetall(RedisKey::track_meta())
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(overrides)
}
