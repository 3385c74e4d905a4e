use serde::{Deserialize, Serialize};

/// A movie as returned by the TMDB discover endpoint.
///
/// Discover payloads omit runtime, so `runtime` stays `None` unless the
/// candidate was enriched from a detail lookup. Optional text fields default
/// so that sparse TMDB rows deserialize cleanly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidateMovie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
}

impl CandidateMovie {
    /// Release year parsed from the `YYYY-MM-DD` date string, if present
    pub fn release_year(&self) -> Option<i32> {
        self.release_date
            .as_deref()
            .and_then(|date| date.get(..4))
            .and_then(|year| year.parse().ok())
    }
}

/// A candidate with its compatibility score and final position
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredMovie {
    #[serde(flatten)]
    pub movie: CandidateMovie,
    pub match_score: f64,
    pub rank: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

/// Full movie record from the TMDB detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetail {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub tagline: Option<String>,
}
