use bb8::Pool;
use bb8_redis::RedisConnectionManager;
use std::sync::Arc;

use crate::{catalog::Catalog, db::RatingStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RatingStore>,
    pub catalog: Arc<dyn Catalog>,
    pub playlist_id: Arc<str>,
    pub jwt_secret: Arc<str>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn RatingStore>,
        catalog: Arc<dyn Catalog>,
        playlist_id: impl Into<Arc<str>>,
        jwt_secret: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            store,
            catalog,
            playlist_id: playlist_id.into(),
            jwt_secret: jwt_secret.into(),
        }
    }
}

pub type RedisClient = Pool<RedisConnectionManager>;
