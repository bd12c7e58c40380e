use serde::{Deserialize, Serialize};

use super::media::{Movie, Show};

/// Progress status of a watched show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatchStatus {
    Watching,
    Completed,
    Dropped,
}

impl WatchStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Watching => "watching",
            Self::Completed => "completed",
            Self::Dropped => "dropped",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "watching" => Some(Self::Watching),
            "completed" => Some(Self::Completed),
            "dropped" => Some(Self::Dropped),
            _ => None,
        }
    }
}

impl std::fmt::Display for WatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A profile's record of a watched movie, joined with cached metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WatchedMovie {
    pub profile_id: String,
    pub movie: Movie,
    /// 0 means unrated.
    pub rating: i32,
    pub watched_at: String,
    pub notes: Option<String>,
}

/// A profile's record of a watched (or in-progress) show.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WatchedShow {
    pub profile_id: String,
    pub show: Show,
    pub rating: i32,
    pub status: WatchStatus,
    /// Episode numbers in the order they were marked watched.
    pub episodes_watched: Vec<i32>,
    pub notes: Option<String>,
    pub updated_at: String,
}

/// Partial patch for a watched-show row. At least one field must be set;
/// `updated_at` is bumped on every successful patch.
#[derive(Debug, Clone, Default)]
pub struct WatchedShowUpdate {
    pub rating: Option<i32>,
    pub status: Option<WatchStatus>,
    pub episodes_watched: Option<Vec<i32>>,
    pub notes: Option<String>,
}

impl WatchedShowUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rating.is_none()
            && self.status.is_none()
            && self.episodes_watched.is_none()
            && self.notes.is_none()
    }
}
