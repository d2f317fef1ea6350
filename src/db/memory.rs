use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::Mutex;

use crate::{
    db::RatingStore,
    errors::AppError,
    models::{Aggregate, RatingRecord},
};

#[derive(Default)]
struct Documents {
    records: HashMap<String, BTreeMap<String, RatingRecord>>,
    aggregates: HashMap<String, Aggregate>,
    added_by: HashMap<String, String>,
}

/// Process-local store with the same key semantics as `RedisStore`.
#[derive(Default)]
pub struct MemoryStore {
    docs: Mutex<Documents>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RatingStore for MemoryStore {
    async fn upsert_rating(
        &self,
        track_id: &str,
        rater_id: &str,
        record: &RatingRecord,
    ) -> Result<(), AppError> {
        let mut docs = self.docs.lock().await;
        docs.records
            .entry(track_id.to_string())
            .or_default()
            .insert(rater_id.to_string(), record.clone());
        Ok(())
    }

    async fn rating_records(
        &self,
        track_id: &str,
    ) -> Result<BTreeMap<String, RatingRecord>, AppError> {
        let docs = self.docs.lock().await;
        Ok(docs.records.get(track_id).cloned().unwrap_or_default())
    }

    async fn aggregate(&self, track_id: &str) -> Result<Option<Aggregate>, AppError> {
        let docs = self.docs.lock().await;
        Ok(docs.aggregates.get(track_id).copied())
    }

    async fn put_aggregate(&self, track_id: &str, aggregate: Aggregate) -> Result<(), AppError> {
        let mut docs = self.docs.lock().await;
        docs.aggregates.insert(track_id.to_string(), aggregate);
        Ok(())
    }

    async fn added_by_overrides(&self) -> Result<HashMap<String, String>, AppError> {
        let docs = self.docs.lock().await;
        Ok(docs.added_by.clone())
    }

    async fn put_added_by_overrides(
        &self,
        overrides: &[(String, String)],
    ) -> Result<(), AppError> {
        let mut docs = self.docs.lock().await;
        for (track_id, added_by) in overrides {
            docs.added_by.insert(track_id.clone(), added_by.clone());
        }
        Ok(())
    }
}
