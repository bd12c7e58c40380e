//! TMDB v3 client. External collaborator: the persistence layer stores
//! whatever this returns without further validation.

use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;

use crate::constants::limits::MAX_SEARCH_RESULTS;
use crate::models::media::{Movie, Show};

#[derive(Debug, Deserialize)]
struct SearchResponse<T> {
    results: Vec<T>,
}

#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    #[must_use]
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path_and_query: &str) -> Result<T> {
        let sep = if path_and_query.contains('?') { '&' } else { '?' };
        let url = format!(
            "{}{}{}api_key={}",
            self.base_url, path_and_query, sep, self.api_key
        );
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("TMDB API error: {} - {}", status, body));
        }

        Ok(response.json().await?)
    }

    pub async fn search_movies(&self, query: &str) -> Result<Vec<Movie>> {
        let response: SearchResponse<Movie> = self
            .get_json(&format!(
                "/search/movie?query={}",
                urlencoding::encode(query)
            ))
            .await?;

        Ok(response
            .results
            .into_iter()
            .take(MAX_SEARCH_RESULTS)
            .collect())
    }

    pub async fn search_shows(&self, query: &str) -> Result<Vec<Show>> {
        let response: SearchResponse<Show> = self
            .get_json(&format!("/search/tv?query={}", urlencoding::encode(query)))
            .await?;

        Ok(response
            .results
            .into_iter()
            .take(MAX_SEARCH_RESULTS)
            .collect())
    }

    /// Detail endpoints return full genre objects and, for TV, season and
    /// episode counts the search results lack.
    pub async fn movie(&self, id: i64) -> Result<Option<Movie>> {
        self.get_detail(&format!("/movie/{id}")).await
    }

    pub async fn show(&self, id: i64) -> Result<Option<Show>> {
        self.get_detail(&format!("/tv/{id}")).await
    }

    async fn get_detail<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let url = format!("{}{}?api_key={}", self.base_url, path, self.api_key);
        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("TMDB API error: {} - {}", status, body));
        }

        Ok(Some(response.json().await?))
    }
}
