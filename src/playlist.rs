use futures::future::try_join_all;
use std::collections::HashMap;

use crate::{
    catalog::{Catalog, CatalogEntry},
    db::RatingStore,
    errors::AppError,
    models::{PlaylistEntry, TrackWithRatings, track::AddedBy},
    ratings::get_ratings,
};

pub const UNKNOWN_ADDER: &str = "onbekend";

/// Attribution for a playlist row: stored override, then the catalog's adder, then a placeholder.
/// Blank values count as absent at every tier.
pub fn resolve_added_by(override_name: Option<&str>, catalog_adder: Option<&str>) -> String {
    let present = |v: Option<&str>| v.map(str::trim).filter(|v| !v.is_empty()).map(String::from);

    present(override_name)
        .or_else(|| present(catalog_adder))
        .unwrap_or_else(|| UNKNOWN_ADDER.to_string())
}

fn attribute(entries: Vec<CatalogEntry>, overrides: &HashMap<String, String>) -> Vec<PlaylistEntry> {
    entries
        .into_iter()
        .map(|e| {
            let id = resolve_added_by(
                overrides.get(&e.track.id).map(String::as_str),
                e.added_by.as_deref(),
            );
            PlaylistEntry {
                track: e.track,
                added_by: AddedBy { id },
                added_at: e.added_at,
            }
        })
        .collect()
}

/// Fetches the playlist fresh from the catalog and applies added-by overrides.
pub async fn load_playlist(
    catalog: &dyn Catalog,
    store: &dyn RatingStore,
    access_token: &str,
    playlist_id: &str,
) -> Result<Vec<PlaylistEntry>, AppError> {
    let (entries, overrides) = tokio::try_join!(
        catalog.playlist_entries(access_token, playlist_id),
        store.added_by_overrides()
    )?;

    Ok(attribute(entries, &overrides))
}

/// Keeps rows whose track name or any artist name contains `query`, ignoring case.
/// A blank query keeps everything.
pub fn filter_by_search(entries: Vec<PlaylistEntry>, query: &str) -> Vec<PlaylistEntry> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return entries;
    }

    entries
        .into_iter()
        .filter(|e| {
            e.track.name.to_lowercase().contains(&needle)
                || e.track
                    .artists
                    .iter()
                    .any(|a| a.name.to_lowercase().contains(&needle))
        })
        .collect()
}

/// The playlist with every track's ratings, in playlist order.
pub async fn load_rated_playlist(
    catalog: &dyn Catalog,
    store: &dyn RatingStore,
    access_token: &str,
    playlist_id: &str,
) -> Result<Vec<TrackWithRatings>, AppError> {
    let entries = load_playlist(catalog, store, access_token, playlist_id).await?;

    let ratings = try_join_all(entries.iter().map(|e| get_ratings(store, &e.track.id))).await?;

    Ok(entries
        .into_iter()
        .zip(ratings)
        .map(|(e, ratings)| TrackWithRatings {
            track: e.track,
            ratings,
            added_by: Some(e.added_by.id),
        })
        .collect())
}
