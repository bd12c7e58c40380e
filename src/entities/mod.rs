pub mod prelude;

pub mod cached_movies;
pub mod cached_shows;
pub mod profiles;
pub mod settings;
pub mod watched_movies;
pub mod watched_shows;
pub mod watchlist;
