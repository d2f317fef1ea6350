//! Derived statistics over a playlist's ratings.
//!
//! Everything here is a pure function of the `TrackWithRatings` slice, in
//! playlist order. Where a view picks a single track, the first track to reach
//! the winning value is kept.

use std::collections::{BTreeSet, HashMap};

use crate::models::{
    stats::{
        GroupStats, HiddenGem, MostRated, PersonalSummary, RaterStanding, ScoredTrack,
        SpreadTrack, StatsReport, TrackStanding, TrackSummary, TrackWithRatings,
    },
    track::format_duration,
};

pub const HIDDEN_GEM_MIN_AVERAGE: f64 = 7.0;

pub fn build_report(data: &[TrackWithRatings], rater_id: &str) -> StatsReport {
    StatsReport {
        personal: personal_summary(data, rater_id),
        group: group_stats(data),
    }
}

pub fn group_stats(data: &[TrackWithRatings]) -> GroupStats {
    GroupStats {
        total_raters: total_raters(data),
        most_controversial: most_controversial(data),
        most_agreed: most_agreed(data),
        hidden_gems: hidden_gems(data),
        most_rated: most_rated(data),
        raters: rater_leaderboard(data),
    }
}

pub fn personal_summary(data: &[TrackWithRatings], rater_id: &str) -> PersonalSummary {
    let mine: Vec<(&TrackWithRatings, u8)> = data
        .iter()
        .filter_map(|d| d.ratings.users.get(rater_id).map(|u| (d, u.rating)))
        .collect();

    let average = if mine.is_empty() {
        None
    } else {
        let sum: u64 = mine.iter().map(|(_, s)| *s as u64).sum();
        Some(sum as f64 / mine.len() as f64)
    };

    let mut highest: Option<(&TrackWithRatings, u8)> = None;
    let mut lowest: Option<(&TrackWithRatings, u8)> = None;
    for &(d, score) in &mine {
        if highest.is_none_or(|(_, best)| score > best) {
            highest = Some((d, score));
        }
        if lowest.is_none_or(|(_, worst)| score < worst) {
            lowest = Some((d, score));
        }
    }

    let scored = |(d, score): (&TrackWithRatings, u8)| ScoredTrack {
        track: TrackSummary::from(&d.track),
        score,
    };

    PersonalSummary {
        average,
        rated: mine.len(),
        total: data.len(),
        highest: highest.map(scored),
        lowest: lowest.map(scored),
    }
}

/// Size of the union of rater ids across all tracks.
pub fn total_raters(data: &[TrackWithRatings]) -> usize {
    data.iter()
        .flat_map(|d| d.ratings.users.keys())
        .collect::<BTreeSet<_>>()
        .len()
}

pub fn most_controversial(data: &[TrackWithRatings]) -> Option<SpreadTrack> {
    let mut best: Option<(&TrackWithRatings, u8)> = None;
    for d in data.iter().filter(|d| d.ratings.count >= 2) {
        let Some(spread) = d.ratings.spread() else {
            continue;
        };
        if best.is_none_or(|(_, s)| spread > s) {
            best = Some((d, spread));
        }
    }

    best.map(|(d, spread)| SpreadTrack {
        track: TrackSummary::from(&d.track),
        spread,
    })
}

/// Tracks rated by at least as many raters as exist overall, lowest spread wins.
/// Empty when fewer than two raters exist.
pub fn most_agreed(data: &[TrackWithRatings]) -> Option<SpreadTrack> {
    let total = total_raters(data);
    if total < 2 {
        return None;
    }

    let mut best: Option<(&TrackWithRatings, u8)> = None;
    for d in data.iter().filter(|d| d.ratings.count >= total as u64) {
        let Some(spread) = d.ratings.spread() else {
            continue;
        };
        if best.is_none_or(|(_, s)| spread < s) {
            best = Some((d, spread));
        }
    }

    best.map(|(d, spread)| SpreadTrack {
        track: TrackSummary::from(&d.track),
        spread,
    })
}

pub fn hidden_gems(data: &[TrackWithRatings]) -> Vec<HiddenGem> {
    data.iter()
        .filter(|d| d.ratings.count == 1)
        .filter_map(|d| {
            let average = d.ratings.average?;
            (average >= HIDDEN_GEM_MIN_AVERAGE).then(|| HiddenGem {
                track: TrackSummary::from(&d.track),
                average,
            })
        })
        .collect()
}

pub fn most_rated(data: &[TrackWithRatings]) -> Option<MostRated> {
    let mut best: Option<&TrackWithRatings> = None;
    for d in data {
        if best.is_none_or(|b| d.ratings.count > b.ratings.count) {
            best = Some(d);
        }
    }

    best.filter(|d| d.ratings.count > 0).map(|d| MostRated {
        track: TrackSummary::from(&d.track),
        count: d.ratings.count,
    })
}

/// Every rater seen, ordered by number of tracks rated (descending, stable).
pub fn rater_leaderboard(data: &[TrackWithRatings]) -> Vec<RaterStanding> {
    struct Tally<'a> {
        rater_id: &'a str,
        display_name: &'a str,
        total: u64,
        count: u64,
    }

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut tallies: Vec<Tally> = Vec::new();

    for d in data {
        for (rater_id, u) in &d.ratings.users {
            let i = *index.entry(rater_id.as_str()).or_insert_with(|| {
                tallies.push(Tally {
                    rater_id: rater_id.as_str(),
                    display_name: u.display_name.as_str(),
                    total: 0,
                    count: 0,
                });
                tallies.len() - 1
            });
            tallies[i].total += u.rating as u64;
            tallies[i].count += 1;
        }
    }

    tallies.sort_by(|a, b| b.count.cmp(&a.count));

    tallies
        .into_iter()
        .map(|t| RaterStanding {
            rater_id: t.rater_id.to_string(),
            display_name: t.display_name.to_string(),
            first_name: first_name(t.display_name).to_string(),
            average: t.total as f64 / t.count as f64,
            count: t.count,
        })
        .collect()
}

/// Rated tracks by average, descending. Ranks are consecutive, ties keep playlist order.
pub fn track_leaderboard(data: &[TrackWithRatings]) -> Vec<TrackStanding> {
    let mut rated: Vec<(&TrackWithRatings, f64)> = data
        .iter()
        .filter(|d| d.ratings.count > 0)
        .filter_map(|d| d.ratings.average.map(|avg| (d, avg)))
        .collect();

    rated.sort_by(|(_, a), (_, b)| b.total_cmp(a));

    rated
        .into_iter()
        .enumerate()
        .map(|(i, (d, average))| TrackStanding {
            rank: (i + 1) as u64,
            track: d.track.clone(),
            average,
            count: d.ratings.count,
            duration: format_duration(d.track.duration_ms),
            added_by: d.added_by.clone(),
        })
        .collect()
}

pub fn first_name(display_name: &str) -> &str {
    display_name.split(' ').next().unwrap_or(display_name)
}
