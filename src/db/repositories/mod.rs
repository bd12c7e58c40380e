pub mod cache;
pub mod profile;
pub mod settings;
pub mod watched;
pub mod watchlist;
