#![allow(dead_code)]

use async_trait::async_trait;
use playlist_ratings::{
    catalog::{Catalog, CatalogEntry, Profile},
    errors::AppError,
    models::{
        Rater, Track,
        track::{Album, Artist, ExternalUrls},
    },
};

pub fn track(id: &str, name: &str) -> Track {
    Track {
        id: id.to_string(),
        name: name.to_string(),
        artists: vec![Artist {
            name: format!("{name} Artist"),
        }],
        album: Album {
            name: format!("{name} Album"),
            images: vec![],
        },
        duration_ms: 200_000,
        preview_url: None,
        external_urls: ExternalUrls::default(),
    }
}

pub fn rater(id: &str, name: &str) -> Rater {
    Rater {
        id: id.to_string(),
        display_name: name.to_string(),
    }
}

/// Serves a fixed playlist; every token is accepted.
pub struct StubCatalog {
    pub entries: Vec<CatalogEntry>,
}

impl StubCatalog {
    pub fn with_tracks(ids: &[&str]) -> Self {
        Self {
            entries: ids
                .iter()
                .map(|id| CatalogEntry {
                    track: track(id, &format!("Song {id}")),
                    added_by: Some("spotify_adder".to_string()),
                    added_at: Some("2024-03-01T12:00:00Z".to_string()),
                })
                .collect(),
        }
    }
}

#[async_trait]
impl Catalog for StubCatalog {
    async fn playlist_entries(
        &self,
        _access_token: &str,
        _playlist_id: &str,
    ) -> Result<Vec<CatalogEntry>, AppError> {
        Ok(self.entries.clone())
    }

    fn authorize_url(&self) -> Result<String, AppError> {
        Ok("https://accounts.example/authorize?client_id=test".to_string())
    }

    async fn exchange_code(&self, code: &str) -> Result<String, AppError> {
        if code == "good" {
            Ok("access-token".to_string())
        } else {
            Err(AppError::Unauthorized("Authorization code rejected".into()))
        }
    }

    async fn profile(&self, _access_token: &str) -> Result<Profile, AppError> {
        Ok(Profile {
            id: "alice".to_string(),
            display_name: Some("Alice Example".to_string()),
        })
    }
}

/// Every call fails as if the catalog were unreachable.
pub struct DownCatalog;

#[async_trait]
impl Catalog for DownCatalog {
    async fn playlist_entries(
        &self,
        _access_token: &str,
        _playlist_id: &str,
    ) -> Result<Vec<CatalogEntry>, AppError> {
        Err(AppError::Upstream("Spotify API error: 502".into()))
    }

    fn authorize_url(&self) -> Result<String, AppError> {
        Err(AppError::Upstream("unreachable".into()))
    }

    async fn exchange_code(&self, _code: &str) -> Result<String, AppError> {
        Err(AppError::Upstream("unreachable".into()))
    }

    async fn profile(&self, _access_token: &str) -> Result<Profile, AppError> {
        Err(AppError::Upstream("unreachable".into()))
    }
}
