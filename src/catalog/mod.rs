pub mod spotify;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{errors::AppError, models::Track};

pub use spotify::SpotifyCatalog;

pub const SCOPES: &[&str] = &[
    "user-read-email",
    "user-read-private",
    "playlist-read-private",
    "playlist-read-collaborative",
];

/// A playlist row as the catalog reports it, before added-by overrides apply.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub track: Track,
    pub added_by: Option<String>,
    pub added_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub display_name: Option<String>,
}

impl Profile {
    pub fn name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(self.id.as_str())
    }
}

/// The external music catalog plus its OAuth handshake.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Every entry of the playlist, following the catalog's page cursor until exhausted.
    async fn playlist_entries(
        &self,
        access_token: &str,
        playlist_id: &str,
    ) -> Result<Vec<CatalogEntry>, AppError>;

    fn authorize_url(&self) -> Result<String, AppError>;

    /// Trades an authorization code for a bearer access token.
    async fn exchange_code(&self, code: &str) -> Result<String, AppError>;

    async fn profile(&self, access_token: &str) -> Result<Profile, AppError>;
}
