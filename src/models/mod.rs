pub mod rating;
pub mod redis;
pub mod stats;
pub mod track;

pub use rating::{Aggregate, Rater, RatingRecord, Score, TrackRatings};
pub use stats::TrackWithRatings;
pub use track::{PlaylistEntry, Track};
