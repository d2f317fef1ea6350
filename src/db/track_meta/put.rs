use crate::{errors::AppError, models::redis::RedisKey, state::RedisClient};

pub async fn put_added_by_overrides(
    overrides: &[(String, String)],
    redis: &RedisClient,
) -> Result<(), AppError> {
    if overrides.is_empty() {
        return Ok(());
    }

    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let mut pipe = redis::pipe();
    for (track_id, added_by) in overrides {
        pipe.cmd("HSET")
            .arg(RedisKey::track_meta())
            .arg(track_id)
            .arg(added_by)
            .ignore();
    }

    let _: () = pipe
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    tracing::info!("Stored {} added-by overrides", overrides.len());
    Ok(())
}
