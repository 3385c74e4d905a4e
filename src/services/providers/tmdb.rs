/// TMDB API provider
///
/// Backs the catalog trait with TMDB's `/discover/movie` and `/movie/{id}`
/// endpoints. Both calls go through the Redis cache: discover responses are
/// short-lived because popularity ordering drifts, movie records are stable
/// and cache for a day.
use crate::{
    cached,
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::{CandidateMovie, DiscoverFilter, MovieDetail},
    services::providers::MovieCatalog,
};
use reqwest::{Client as HttpClient, StatusCode};
use serde::Deserialize;

const DISCOVER_CACHE_TTL: u64 = 3600; // 1 hour
const DETAIL_CACHE_TTL: u64 = 86400; // 1 day

/// Paged envelope around discover results
#[derive(Debug, Clone, Deserialize)]
struct DiscoverResponse {
    #[serde(default)]
    page: u32,
    #[serde(default)]
    results: Vec<CandidateMovie>,
    #[serde(default)]
    total_results: u64,
}

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    access_token: String,
    api_url: String,
    cache: Cache,
}

impl TmdbProvider {
    pub fn new(cache: Cache, access_token: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            access_token,
            api_url,
            cache,
        }
    }
}

#[async_trait::async_trait]
impl MovieCatalog for TmdbProvider {
    async fn discover_movies(&self, filter: &DiscoverFilter) -> AppResult<Vec<CandidateMovie>> {
        let query = filter.canonical_query();

        cached!(
            self.cache,
            CacheKey::Discover(query.clone()),
            DISCOVER_CACHE_TTL,
            async move {
                let url = format!("{}/discover/movie", self.api_url);

                let response = self
                    .http_client
                    .get(&url)
                    .bearer_auth(&self.access_token)
                    .query(&filter.as_query_params())
                    .send()
                    .await?;

                if !response.status().is_success() {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    return Err(AppError::ExternalApi(format!(
                        "TMDB API returned status {}: {}",
                        status, body
                    )));
                }

                let discover: DiscoverResponse = response.json().await?;

                tracing::info!(
                    query = %query,
                    page = discover.page,
                    results = discover.results.len(),
                    total_results = discover.total_results,
                    provider = "tmdb",
                    "Discover completed"
                );

                Ok(discover.results)
            }
        )
    }

    async fn movie_detail(&self, movie_id: u64) -> AppResult<MovieDetail> {
        cached!(
            self.cache,
            CacheKey::MovieDetail(movie_id),
            DETAIL_CACHE_TTL,
            async move {
                let url = format!("{}/movie/{}", self.api_url, movie_id);

                let response = self
                    .http_client
                    .get(&url)
                    .bearer_auth(&self.access_token)
                    .query(&[("language", "en-US")])
                    .send()
                    .await?;

                if response.status() == StatusCode::NOT_FOUND {
                    return Err(AppError::NotFound(format!("Movie {} not found", movie_id)));
                }

                if !response.status().is_success() {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    return Err(AppError::ExternalApi(format!(
                        "TMDB API returned status {}: {}",
                        status, body
                    )));
                }

                let detail: MovieDetail = response.json().await?;

                tracing::info!(
                    movie_id = movie_id,
                    title = %detail.title,
                    provider = "tmdb",
                    "Movie detail fetched"
                );

                Ok(detail)
            }
        )
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_response_parses_tmdb_payload() {
        let json = r#"{
            "page": 1,
            "results": [
                {
                    "id": 27205,
                    "title": "Inception",
                    "overview": "A thief who steals corporate secrets",
                    "poster_path": "/inception.jpg",
                    "release_date": "2010-07-15",
                    "vote_average": 8.4,
                    "vote_count": 36000,
                    "popularity": 90.5,
                    "genre_ids": [28, 878, 53]
                }
            ],
            "total_pages": 12,
            "total_results": 240
        }"#;

        let parsed: DiscoverResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.page, 1);
        assert_eq!(parsed.total_results, 240);
        assert_eq!(parsed.results.len(), 1);
        assert_eq!(parsed.results[0].id, 27205);
        assert_eq!(parsed.results[0].genre_ids, vec![28, 878, 53]);
        assert_eq!(parsed.results[0].runtime, None);
    }

    #[test]
    fn test_discover_response_tolerates_empty_body() {
        let parsed: DiscoverResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.results.is_empty());
    }

    #[test]
    fn test_movie_detail_parses_named_genres() {
        let json = r#"{
            "id": 27205,
            "title": "Inception",
            "runtime": 148,
            "vote_average": 8.4,
            "genres": [
                {"id": 28, "name": "Action"},
                {"id": 878, "name": "Science Fiction"}
            ],
            "tagline": "Your mind is the scene of the crime."
        }"#;

        let detail: MovieDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.runtime, Some(148));
        assert_eq!(detail.genres[1].name, "Science Fiction");
    }
}
