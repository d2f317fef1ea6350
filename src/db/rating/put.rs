use crate::{
    errors::AppError,
    models::{Aggregate, RatingRecord, redis::RedisKey},
    state::RedisClient,
};
use redis::AsyncCommands;

/// Upserts one rater's record; a later write for the same rater replaces it.
pub async fn upsert_rating(
    track_id: &str,
    rater_id: &str,
    record: &RatingRecord,
    redis: &RedisClient,
) -> Result<(), AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let key = RedisKey::track_rating_users(track_id);
    let json = serde_json::to_string(record).map_err(|e| AppError::Serialization(e.to_string()))?;

    let _: () = conn
        .hset(&key, rater_id, json)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(())
}

pub async fn put_aggregate(
    track_id: &str,
    aggregate: Aggregate,
    redis: &RedisClient,
) -> Result<(), AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let pipe = aggregate_pipeline(&RedisKey::track_ratings(track_id), &aggregate);

    let _: () = pipe
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    tracing::debug!(
        "Wrote aggregate for track {}: average={:?}, count={}",
        track_id,
        aggregate.average,
        aggregate.count
    );

    Ok(())
}

/// Hash field values for an aggregate: `average` (absent for "no data") and `count`.
pub(crate) fn aggregate_fields(aggregate: &Aggregate) -> (Option<String>, String) {
    (
        aggregate.average.map(|a| a.to_string()),
        aggregate.count.to_string(),
    )
}

fn aggregate_pipeline(key: &str, aggregate: &Aggregate) -> redis::Pipeline {
    let (average, count) = aggregate_fields(aggregate);
    let mut pipe = redis::pipe();

    match average {
        Some(average) => {
            pipe.cmd("HSET").arg(key).arg("average").arg(average).ignore();
        }
        None => {
            pipe.cmd("HDEL").arg(key).arg("average").ignore();
        }
    }
    pipe.cmd("HSET").arg(key).arg("count").arg(count).ignore();

    pipe
}
