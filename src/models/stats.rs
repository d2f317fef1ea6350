use serde::{Deserialize, Serialize};

use crate::models::{rating::TrackRatings, track::Track};

/// Input row for the statistics engine: a playlist track with its ratings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackWithRatings {
    pub track: Track,
    pub ratings: TrackRatings,
    #[serde(default)]
    pub added_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackSummary {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
}

impl From<&Track> for TrackSummary {
    fn from(track: &Track) -> Self {
        Self {
            id: track.id.clone(),
            name: track.name.clone(),
            artists: track.artist_names(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredTrack {
    pub track: TrackSummary,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadTrack {
    pub track: TrackSummary,
    pub spread: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HiddenGem {
    pub track: TrackSummary,
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MostRated {
    pub track: TrackSummary,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalSummary {
    pub average: Option<f64>,
    pub rated: usize,
    pub total: usize,
    pub highest: Option<ScoredTrack>,
    pub lowest: Option<ScoredTrack>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaterStanding {
    pub rater_id: String,
    pub display_name: String,
    pub first_name: String,
    pub average: f64,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackStanding {
    pub rank: u64,
    pub track: Track,
    pub average: f64,
    pub count: u64,
    pub duration: String,
    pub added_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStats {
    pub total_raters: usize,
    pub most_controversial: Option<SpreadTrack>,
    pub most_agreed: Option<SpreadTrack>,
    pub hidden_gems: Vec<HiddenGem>,
    pub most_rated: Option<MostRated>,
    pub raters: Vec<RaterStanding>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub personal: PersonalSummary,
    pub group: GroupStats,
}
