pub mod settings {

    /// Settings-table key holding the TMDB API credential, global across
    /// all profiles.
    pub const TMDB_API_KEY: &str = "tmdb_api_key";
}

pub mod session {

    /// Pointer file holding the active profile id, next to the database
    /// but outside the relational store.
    pub const ACTIVE_PROFILE_FILE: &str = "active_profile";
}

pub mod tmdb {

    pub const BASE_URL: &str = "https://api.themoviedb.org/3";

    pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w342";
}

pub mod limits {

    pub const MAX_SEARCH_RESULTS: usize = 10;
}
