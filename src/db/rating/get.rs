use crate::{
    errors::AppError,
    models::{Aggregate, RatingRecord, redis::RedisKey},
    state::RedisClient,
};
use redis::AsyncCommands;
use std::collections::{BTreeMap, HashMap};

/// Reads every rater's record from the track's sub-collection.
pub async fn get_rating_records(
    track_id: &str,
    redis: &RedisClient,
) -> Result<BTreeMap<String, RatingRecord>, AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let key = RedisKey::track_rating_users(track_id);
    let raw: HashMap<String, String> = conn
        .hgetall(&key)
        .await
        .map_err(AppError::RedisCommandError)?;

    let records = records_from_hash(raw)?;

    tracing::debug!("Loaded {} rating records for track {}", records.len(), track_id);
    Ok(records)
}

/// `None` when no aggregate document has been written for the track yet.
pub async fn get_aggregate(
    track_id: &str,
    redis: &RedisClient,
) -> Result<Option<Aggregate>, AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let key = RedisKey::track_ratings(track_id);
    let data: HashMap<String, String> = conn
        .hgetall(&key)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(aggregate_from_hash(&data))
}

fn records_from_hash(
    raw: HashMap<String, String>,
) -> Result<BTreeMap<String, RatingRecord>, AppError> {
    raw.into_iter()
        .map(|(rater_id, json)| {
            let record: RatingRecord = serde_json::from_str(&json).map_err(|e| {
                AppError::Deserialization(format!("Bad rating record for {rater_id}: {e}"))
            })?;
            Ok((rater_id, record))
        })
        .collect()
}

/// An empty hash means no aggregate was ever written. A missing `average` field is "no data".
fn aggregate_from_hash(data: &HashMap<String, String>) -> Option<Aggregate> {
    if data.is_empty() {
        return None;
    }

    Some(Aggregate {
        average: data.get("average").and_then(|v| v.parse::<f64>().ok()),
        count: data
            .get("count")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0),
    })
}
