use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::Deserialize;

use crate::{
    catalog::{Catalog, CatalogEntry, Profile, SCOPES},
    config::SpotifyConfig,
    errors::AppError,
    models::{Track, track::AddedBy},
};

const PAGE_LIMIT: &str = "50";
const PLAYLIST_FIELDS: &str = "next,items(added_by.id,added_at,track(id,name,artists,album,duration_ms,preview_url,external_urls))";

#[derive(Debug, Deserialize)]
struct PlaylistPage {
    #[serde(default)]
    items: Vec<PlaylistItem>,
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaylistItem {
    track: Option<serde_json::Value>,
    added_by: Option<AddedBy>,
    added_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

pub struct SpotifyCatalog {
    http: reqwest::Client,
    config: SpotifyConfig,
}

impl SpotifyCatalog {
    pub fn new(config: SpotifyConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn first_page_url(&self, playlist_id: &str) -> Result<Url, AppError> {
        let base = format!("{}/playlists/{}/tracks", self.config.api_base, playlist_id);
        Url::parse_with_params(&base, &[("limit", PAGE_LIMIT), ("fields", PLAYLIST_FIELDS)])
            .map_err(|e| AppError::EnvError(format!("Invalid Spotify API base: {e}")))
    }

    async fn get_json<T>(&self, url: Url, access_token: &str) -> Result<T, AppError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let res = self.http.get(url).bearer_auth(access_token).send().await?;

        match res.status() {
            s if s.is_success() => {}
            StatusCode::UNAUTHORIZED => {
                return Err(AppError::Unauthorized("Spotify session expired".into()));
            }
            s => return Err(AppError::Upstream(format!("Spotify API error: {}", s.as_u16()))),
        }

        res.json::<T>()
            .await
            .map_err(|e| AppError::Deserialization(format!("Invalid Spotify response: {e}")))
    }
}

/// Drops rows without a usable track (removed or local files).
fn entries_from_page(items: Vec<PlaylistItem>) -> Vec<CatalogEntry> {
    items
        .into_iter()
        .filter_map(|item| {
            let raw = item.track.filter(|t| !t.is_null())?;
            match serde_json::from_value::<Track>(raw) {
                Ok(track) => Some(CatalogEntry {
                    track,
                    added_by: item.added_by.map(|a| a.id),
                    added_at: item.added_at,
                }),
                Err(e) => {
                    tracing::warn!("Skipping playlist item with unreadable track: {}", e);
                    None
                }
            }
        })
        .collect()
}

#[async_trait]
impl Catalog for SpotifyCatalog {
    async fn playlist_entries(
        &self,
        access_token: &str,
        playlist_id: &str,
    ) -> Result<Vec<CatalogEntry>, AppError> {
        let mut entries = Vec::new();
        let mut next = Some(self.first_page_url(playlist_id)?);
        let mut pages = 0usize;

        while let Some(url) = next.take() {
            let page: PlaylistPage = self.get_json(url, access_token).await?;
            entries.extend(entries_from_page(page.items));
            pages += 1;

            next = match page.next {
                Some(raw) => Some(Url::parse(&raw).map_err(|e| {
                    AppError::Deserialization(format!("Invalid next page url: {e}"))
                })?),
                None => None,
            };
        }

        tracing::debug!(
            "Fetched {} playlist entries in {} pages for {}",
            entries.len(),
            pages,
            playlist_id
        );
        Ok(entries)
    }

    fn authorize_url(&self) -> Result<String, AppError> {
        let base = format!("{}/authorize", self.config.accounts_base);
        let scope = SCOPES.join(" ");
        let url = Url::parse_with_params(
            &base,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("response_type", "code"),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("scope", scope.as_str()),
            ],
        )
        .map_err(|e| AppError::EnvError(format!("Invalid Spotify accounts base: {e}")))?;

        Ok(url.to_string())
    }

    async fn exchange_code(&self, code: &str) -> Result<String, AppError> {
        let url = format!("{}/api/token", self.config.accounts_base);
        let res = self
            .http
            .post(&url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.config.redirect_uri.as_str()),
            ])
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            tracing::error!("Spotify token exchange failed: {}", status);
            return Err(AppError::Unauthorized(format!(
                "Authorization code rejected: {}",
                status.as_u16()
            )));
        }

        let token: TokenResponse = res
            .json()
            .await
            .map_err(|e| AppError::Deserialization(format!("Invalid token response: {e}")))?;

        Ok(token.access_token)
    }

    async fn profile(&self, access_token: &str) -> Result<Profile, AppError> {
        let url = Url::parse(&format!("{}/me", self.config.api_base))
            .map_err(|e| AppError::EnvError(format!("Invalid Spotify API base: {e}")))?;
        self.get_json(url, access_token).await
    }
}
