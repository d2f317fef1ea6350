pub struct RedisKey;

// Track ids are opaque and may contain `:`; the document kind always precedes the id.
impl RedisKey {
    /// Aggregate document for a track: `average`, `count`.
    pub fn track_ratings(track_id: &str) -> String {
        format!("ratings:agg:{track_id}")
    }

    /// Sub-collection of one JSON rating record per rater id.
    pub fn track_rating_users(track_id: &str) -> String {
        format!("ratings:users:{track_id}")
    }

    pub fn track_meta() -> String {
        "track_meta".to_string()
    }
}
