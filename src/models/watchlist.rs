use serde::Serialize;

use super::media::{MediaType, Movie, Show};

/// A watchlist entry joined with whichever cache table its type points at.
/// Exactly one of `movie` / `show` is populated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WatchlistItem {
    pub profile_id: String,
    pub item_type: MediaType,
    pub item_id: i64,
    pub added_at: String,
    pub priority: i32,
    pub notes: Option<String>,
    pub movie: Option<Movie>,
    pub show: Option<Show>,
}

impl WatchlistItem {
    /// Display title regardless of which side is populated.
    #[must_use]
    pub fn title(&self) -> &str {
        self.movie
            .as_ref()
            .map(|m| m.title.as_str())
            .or_else(|| self.show.as_ref().map(|s| s.name.as_str()))
            .unwrap_or("<unknown>")
    }
}
