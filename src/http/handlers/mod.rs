pub mod auth;
pub mod playlist;
pub mod ratings;
pub mod stats;
pub mod track_meta;

pub use auth::{callback_handler, login_handler, session_handler};
pub use playlist::get_playlist_handler;
pub use ratings::{get_ratings_handler, submit_rating_handler};
pub use stats::{get_leaderboard_handler, get_stats_handler};
pub use track_meta::{get_track_meta_handler, put_track_meta_handler};
