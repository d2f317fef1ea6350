use crate::errors::AppError;

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_API_BASE: &str = "https://api.spotify.com/v1";
const DEFAULT_ACCOUNTS_BASE: &str = "https://accounts.spotify.com";
const DEFAULT_ORIGINS: &str = "http://localhost:3000";

#[derive(Debug, Clone)]
pub struct Config {
    pub redis_url: String,
    pub jwt_secret: String,
    pub playlist_id: String,
    pub spotify: SpotifyConfig,
    pub allowed_origins: Vec<String>,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub api_base: String,
    pub accounts_base: String,
}

fn required(name: &str) -> Result<String, AppError> {
    std::env::var(name).map_err(|e| AppError::EnvError(format!("{name}: {e}")))
}

fn optional(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

impl Config {
    /// Reads the process environment, after `.env` has been loaded by the caller.
    pub fn from_env() -> Result<Self, AppError> {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Ok(Self {
            redis_url: required("REDIS_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            playlist_id: required("SPOTIFY_PLAYLIST_ID")?,
            spotify: SpotifyConfig {
                client_id: required("SPOTIFY_CLIENT_ID")?,
                client_secret: required("SPOTIFY_CLIENT_SECRET")?,
                redirect_uri: required("SPOTIFY_REDIRECT_URI")?,
                api_base: optional("SPOTIFY_API_BASE", DEFAULT_API_BASE),
                accounts_base: optional("SPOTIFY_ACCOUNTS_BASE", DEFAULT_ACCOUNTS_BASE),
            },
            allowed_origins: parse_origins(&optional("ALLOWED_ORIGINS", DEFAULT_ORIGINS)),
            port,
        })
    }
}

pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
