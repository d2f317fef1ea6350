use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};

use crate::{
    db::{
        RatingStore,
        rating::{
            get::{get_aggregate, get_rating_records},
            put::{put_aggregate, upsert_rating},
        },
        track_meta::{get::get_added_by_overrides, put::put_added_by_overrides},
    },
    errors::AppError,
    models::{Aggregate, RatingRecord},
    state::RedisClient,
};

#[derive(Clone)]
pub struct RedisStore {
    redis: RedisClient,
}

impl RedisStore {
    pub fn new(redis: RedisClient) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl RatingStore for RedisStore {
    async fn upsert_rating(
        &self,
        track_id: &str,
        rater_id: &str,
        record: &RatingRecord,
    ) -> Result<(), AppError> {
        upsert_rating(track_id, rater_id, record, &self.redis).await
    }

    async fn rating_records(
        &self,
        track_id: &str,
    ) -> Result<BTreeMap<String, RatingRecord>, AppError> {
        get_rating_records(track_id, &self.redis).await
    }

    async fn aggregate(&self, track_id: &str) -> Result<Option<Aggregate>, AppError> {
        get_aggregate(track_id, &self.redis).await
    }

    async fn put_aggregate(&self, track_id: &str, aggregate: Aggregate) -> Result<(), AppError> {
        put_aggregate(track_id, aggregate, &self.redis).await
    }

    async fn added_by_overrides(&self) -> Result<HashMap<String, String>, AppError> {
        get_added_by_overrides(&self.redis).await
    }

    async fn put_added_by_overrides(
        &self,
        overrides: &[(String, String)],
    ) -> Result<(), AppError> {
        put_added_by_overrides(overrides, &self.redis).await
    }
}
