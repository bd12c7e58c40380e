pub mod media;
pub mod profile;
pub mod watched;
pub mod watchlist;
