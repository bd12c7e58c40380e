pub use super::cached_movies::Entity as CachedMovies;
pub use super::cached_shows::Entity as CachedShows;
pub use super::profiles::Entity as Profiles;
pub use super::settings::Entity as Settings;
pub use super::watched_movies::Entity as WatchedMovies;
pub use super::watched_shows::Entity as WatchedShows;
pub use super::watchlist::Entity as Watchlist;
