use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Query against the TMDB discover endpoint.
///
/// Construction starts from [`DiscoverFilter::seed`] and the synthesizer
/// tightens individual fields from the answer sets. Rendering through
/// [`DiscoverFilter::as_query_params`] is canonical: id lists are sorted and
/// parameters appear in a fixed order, so equal filters produce equal query
/// strings and therefore equal cache keys.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DiscoverFilter {
    pub genre_ids: Vec<u32>,
    pub vote_average_gte: Option<f64>,
    pub release_date_gte: Option<NaiveDate>,
    pub release_date_lte: Option<NaiveDate>,
    pub runtime_gte: Option<u32>,
    pub runtime_lte: Option<u32>,
    pub provider_ids: Vec<u32>,
    pub watch_region: Option<String>,
    pub sort_by: String,
    pub page: u32,
}

impl DiscoverFilter {
    /// Starting point before any answers are applied
    pub fn seed() -> Self {
        Self {
            vote_average_gte: Some(5.0),
            sort_by: "popularity.desc".to_string(),
            page: 1,
            ..Default::default()
        }
    }

    /// Constraint-free variant used when a discover pass returns too few
    /// usable candidates
    pub fn broadened() -> Self {
        Self {
            sort_by: "popularity.desc".to_string(),
            page: 1,
            ..Default::default()
        }
    }

    /// Renders the filter as TMDB query parameters in canonical order
    pub fn as_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("include_adult", "false".to_string()),
            ("language", "en-US".to_string()),
            ("sort_by", self.sort_by.clone()),
            ("page", self.page.to_string()),
        ];

        if let Some(vote) = self.vote_average_gte {
            params.push(("vote_average.gte", format_threshold(vote)));
        }
        if !self.genre_ids.is_empty() {
            params.push(("with_genres", join_sorted(&self.genre_ids, ",")));
        }
        if let Some(date) = self.release_date_gte {
            params.push(("primary_release_date.gte", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(date) = self.release_date_lte {
            params.push(("primary_release_date.lte", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(runtime) = self.runtime_gte {
            params.push(("with_runtime.gte", runtime.to_string()));
        }
        if let Some(runtime) = self.runtime_lte {
            params.push(("with_runtime.lte", runtime.to_string()));
        }
        if !self.provider_ids.is_empty() {
            params.push(("with_watch_providers", join_sorted(&self.provider_ids, "|")));
            if let Some(region) = &self.watch_region {
                params.push(("watch_region", region.clone()));
            }
        }

        params
    }

    /// Canonical query string, used as the discover cache key
    pub fn canonical_query(&self) -> String {
        self.as_query_params()
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn join_sorted(ids: &[u32], separator: &str) -> String {
    let mut sorted: Vec<u32> = ids.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    sorted
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Renders thresholds the way TMDB expects them: whole numbers without a
/// trailing `.0`, fractional values as-is
fn format_threshold(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
