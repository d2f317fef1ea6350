//! Rating submission and lookup.
//!
//! A submission writes the rater's record and then recomputes the track's
//! aggregate from every stored record. These are separate storage calls with
//! no isolation between them: two concurrent submissions on one track can leave
//! an aggregate that misses one of them until the next submission rewrites it.
//! Both rating records always survive since they live under distinct keys.

use chrono::Utc;

use crate::{
    db::RatingStore,
    errors::AppError,
    models::{Aggregate, Rater, RatingRecord, Score, TrackRatings},
};

fn require_track_id(track_id: &str) -> Result<&str, AppError> {
    let track_id = track_id.trim();
    if track_id.is_empty() {
        return Err(AppError::Validation("trackId required".into()));
    }
    Ok(track_id)
}

/// Upserts `rater`'s score for the track and returns the freshly recomputed aggregate.
pub async fn submit_rating(
    store: &dyn RatingStore,
    rater: &Rater,
    track_id: &str,
    rating: &serde_json::Value,
) -> Result<Aggregate, AppError> {
    if rater.id.trim().is_empty() {
        return Err(AppError::Unauthorized("No rater identity".into()));
    }
    let track_id = require_track_id(track_id)?;
    let score = Score::parse(rating)?;

    let record = RatingRecord {
        rating: score.value(),
        display_name: rater.display_name.clone(),
        timestamp: Utc::now(),
    };
    store.upsert_rating(track_id, &rater.id, &record).await?;

    let aggregate = recompute_aggregate(store, track_id).await?;

    tracing::info!(
        "Rater {} scored track {} with {} (average={:?}, count={})",
        rater.id,
        track_id,
        score.value(),
        aggregate.average,
        aggregate.count
    );

    Ok(aggregate)
}

/// Reads back every record for the track and overwrites the cached aggregate.
pub async fn recompute_aggregate(
    store: &dyn RatingStore,
    track_id: &str,
) -> Result<Aggregate, AppError> {
    let records = store.rating_records(track_id).await?;
    let aggregate = Aggregate::from_scores(records.values().map(|r| r.rating));
    store.put_aggregate(track_id, aggregate).await?;
    Ok(aggregate)
}

/// Cached aggregate plus each rater's score. Unknown tracks yield an empty result.
pub async fn get_ratings(store: &dyn RatingStore, track_id: &str) -> Result<TrackRatings, AppError> {
    let track_id = require_track_id(track_id)?;

    let (aggregate, records) =
        tokio::try_join!(store.aggregate(track_id), store.rating_records(track_id))?;

    Ok(TrackRatings::new(aggregate.unwrap_or_default(), records))
}
