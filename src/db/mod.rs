pub mod memory;
pub mod rating;
pub mod redis_store;
pub mod track_meta;

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};

use crate::{
    errors::AppError,
    models::{Aggregate, RatingRecord},
};

pub use memory::MemoryStore;
pub use redis_store::RedisStore;

/// Document store backing ratings, cached aggregates and added-by overrides.
///
/// Each call is one independent storage round trip. Nothing here spans calls,
/// so a sequence like "write rating, read all, write aggregate" is not isolated
/// from concurrent writers.
#[async_trait]
pub trait RatingStore: Send + Sync {
    async fn upsert_rating(
        &self,
        track_id: &str,
        rater_id: &str,
        record: &RatingRecord,
    ) -> Result<(), AppError>;

    /// Every stored rating for the track, keyed by rater id.
    async fn rating_records(&self, track_id: &str)
    -> Result<BTreeMap<String, RatingRecord>, AppError>;

    async fn aggregate(&self, track_id: &str) -> Result<Option<Aggregate>, AppError>;

    async fn put_aggregate(&self, track_id: &str, aggregate: Aggregate) -> Result<(), AppError>;

    async fn added_by_overrides(&self) -> Result<HashMap<String, String>, AppError>;

    async fn put_added_by_overrides(&self, overrides: &[(String, String)])
    -> Result<(), AppError>;
}
