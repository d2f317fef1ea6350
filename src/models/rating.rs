use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 10;

/// A score in `MIN_SCORE..=MAX_SCORE`. Only constructed through `Score::parse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Score(u8);

impl Score {
    /// Accepts a JSON integer in range; floats, strings and `null` are rejected.
    pub fn parse(value: &serde_json::Value) -> Result<Self, AppError> {
        let raw = value
            .as_i64()
            .ok_or_else(|| AppError::Validation("Rating must be an integer".into()))?;
        Self::try_from(raw)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Score {
    type Error = AppError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        if (MIN_SCORE as i64..=MAX_SCORE as i64).contains(&raw) {
            Ok(Score(raw as u8))
        } else {
            Err(AppError::Validation(format!(
                "Rating must be between {MIN_SCORE} and {MAX_SCORE}"
            )))
        }
    }
}

/// The authenticated identity a rating is attributed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rater {
    pub id: String,
    pub display_name: String,
}

/// Stored per (track, rater) in the track's rating sub-collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingRecord {
    pub rating: u8,
    pub display_name: String,
    pub timestamp: DateTime<Utc>,
}

/// Cached projection of a track's rating set. `average` is `None` when there is no data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    pub average: Option<f64>,
    pub count: u64,
}

impl Aggregate {
    pub fn from_scores<I>(scores: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        let (sum, count) = scores
            .into_iter()
            .fold((0u64, 0u64), |(sum, count), s| (sum + s as u64, count + 1));

        if count == 0 {
            return Self::default();
        }

        Self {
            average: Some(sum as f64 / count as f64),
            count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaterScore {
    pub rating: u8,
    pub display_name: String,
}

/// Everything known about one track's ratings: the cached aggregate plus each rater's score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackRatings {
    pub average: Option<f64>,
    pub count: u64,
    pub users: BTreeMap<String, RaterScore>,
}

impl TrackRatings {
    pub fn new(aggregate: Aggregate, records: BTreeMap<String, RatingRecord>) -> Self {
        let users = records
            .into_iter()
            .map(|(id, r)| {
                (
                    id,
                    RaterScore {
                        rating: r.rating,
                        display_name: r.display_name,
                    },
                )
            })
            .collect();

        Self {
            average: aggregate.average,
            count: aggregate.count,
            users,
        }
    }

    /// Max minus min score across raters, `None` when nobody has rated.
    pub fn spread(&self) -> Option<u8> {
        let max = self.users.values().map(|u| u.rating).max()?;
        let min = self.users.values().map(|u| u.rating).min()?;
        Some(max - min)
    }
}
