/// Movie catalog provider abstraction
///
/// The matching workflow only needs two capabilities from a catalog source:
/// filtered discovery and per-movie detail lookup. Keeping them behind a trait
/// lets tests substitute a scripted catalog and leaves room for sources other
/// than TMDB.
use crate::{
    error::AppResult,
    models::{CandidateMovie, DiscoverFilter, MovieDetail},
};

pub mod tmdb;

/// Trait for movie catalog providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Fetch candidate movies matching a discover filter
    ///
    /// Returns candidates in the provider's own order, which downstream
    /// ranking treats as the tie-break order.
    async fn discover_movies(&self, filter: &DiscoverFilter) -> AppResult<Vec<CandidateMovie>>;

    /// Fetch the full record for a single movie
    async fn movie_detail(&self, movie_id: u64) -> AppResult<MovieDetail>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
