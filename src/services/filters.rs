/// Discover-filter synthesis from two users' answers
///
/// Turns both answer sets into one TMDB discover query. The function is pure
/// and never fails: malformed or missing answers degrade to permissive
/// defaults. Each category writes its own filter keys, so the application
/// order of the category rules does not matter.
use chrono::NaiveDate;

use crate::models::{AnswerSet, DiscoverFilter, Question, QuestionCategory};
use crate::services::tables;
use std::collections::HashSet;

/// Minimum-rating threshold assumed for a user who left rating unanswered
const DEFAULT_RATING_THRESHOLD: f64 = 6.0;

/// Builds the discover filter for a pair of answer sets.
///
/// Category rules only run for categories present in the question catalog;
/// the seeded defaults cover everything else. Shared selections combine
/// inclusively: intersections first where both users chose, otherwise
/// unions, so the coarse fetch never excludes a movie both users might take.
pub fn synthesize_filter(
    catalog: &[Question],
    user1: &AnswerSet,
    user2: &AnswerSet,
    watch_region: &str,
) -> DiscoverFilter {
    let mut filter = DiscoverFilter::seed();

    if has_category(catalog, QuestionCategory::Genre) {
        filter.genre_ids = combine_id_preferences(
            resolved_ids(catalog, user1, QuestionCategory::Genre),
            resolved_ids(catalog, user2, QuestionCategory::Genre),
        );
    }

    if has_category(catalog, QuestionCategory::Rating) {
        let threshold = rating_threshold(catalog, user1).min(rating_threshold(catalog, user2));
        filter.vote_average_gte = Some(threshold);
    }

    if has_category(catalog, QuestionCategory::Era) {
        let (start1, end1) = era_range(catalog, user1);
        let (start2, end2) = era_range(catalog, user2);
        filter.release_date_gte = NaiveDate::from_ymd_opt(start1.min(start2), 1, 1);
        filter.release_date_lte = NaiveDate::from_ymd_opt(end1.max(end2), 12, 31);
    }

    if has_category(catalog, QuestionCategory::Length) {
        let (min1, max1) = runtime_range(catalog, user1);
        let (min2, max2) = runtime_range(catalog, user2);
        let combined = (min1.min(min2), max1.max(max2));
        if combined != tables::RUNTIME_ANY {
            filter.runtime_gte = Some(combined.0);
            filter.runtime_lte = Some(combined.1);
        }
    }

    if has_category(catalog, QuestionCategory::Platform) {
        let providers = combine_id_preferences(
            resolved_ids(catalog, user1, QuestionCategory::Platform),
            resolved_ids(catalog, user2, QuestionCategory::Platform),
        );
        if !providers.is_empty() {
            filter.provider_ids = providers;
            filter.watch_region = Some(watch_region.to_string());
        }
    }

    filter
}

fn has_category(catalog: &[Question], category: QuestionCategory) -> bool {
    catalog.iter().any(|question| question.category == category)
}

/// Option values resolved to TMDB ids through the category's question
fn resolved_ids(catalog: &[Question], answers: &AnswerSet, category: QuestionCategory) -> Vec<u32> {
    answers
        .for_category(catalog, category)
        .map(|(question, value)| {
            let values = value.text_values();
            match category {
                QuestionCategory::Platform => question.provider_ids_for(&values),
                _ => question.genre_ids_for(&values),
            }
        })
        .unwrap_or_default()
}

/// Intersection when both users chose, union when the intersection is
/// empty, and a single answerer's choices stand alone
fn combine_id_preferences(first: Vec<u32>, second: Vec<u32>) -> Vec<u32> {
    match (first.is_empty(), second.is_empty()) {
        (true, true) => Vec::new(),
        (false, true) => first,
        (true, false) => second,
        (false, false) => {
            let other: HashSet<u32> = second.iter().copied().collect();
            let intersection: Vec<u32> = first
                .iter()
                .copied()
                .filter(|id| other.contains(id))
                .collect();

            if !intersection.is_empty() {
                return intersection;
            }

            let mut union = first;
            union.extend(second);
            union.sort_unstable();
            union.dedup();
            union
        }
    }
}

fn rating_threshold(catalog: &[Question], answers: &AnswerSet) -> f64 {
    answers
        .for_category(catalog, QuestionCategory::Rating)
        .map(|(_, value)| {
            let thresholds = value.numeric_values();
            if thresholds.is_empty() {
                DEFAULT_RATING_THRESHOLD
            } else {
                thresholds.into_iter().fold(f64::INFINITY, f64::min)
            }
        })
        .unwrap_or(DEFAULT_RATING_THRESHOLD)
}

/// Union year range over the user's selected era buckets
fn era_range(catalog: &[Question], answers: &AnswerSet) -> (i32, i32) {
    let value = match answers.for_category(catalog, QuestionCategory::Era) {
        Some((_, value)) => value,
        None => return tables::ERA_ANY,
    };

    let mut range: Option<(i32, i32)> = None;
    for selected in value.text_values() {
        if let Some((start, end)) = tables::era_bounds(&selected) {
            range = Some(match range {
                Some((s, e)) => (s.min(start), e.max(end)),
                None => (start, end),
            });
        }
    }

    range.unwrap_or(tables::ERA_ANY)
}

/// Union runtime range over the user's selected length buckets
fn runtime_range(catalog: &[Question], answers: &AnswerSet) -> (u32, u32) {
    let value = match answers.for_category(catalog, QuestionCategory::Length) {
        Some((_, value)) => value,
        None => return tables::RUNTIME_ANY,
    };

    let mut range: Option<(u32, u32)> = None;
    for selected in value.text_values() {
        if let Some((min, max)) = tables::runtime_bounds(&selected) {
            range = Some(match range {
                Some((a, b)) => (a.min(min), b.max(max)),
                None => (min, max),
            });
        }
    }

    range.unwrap_or(tables::RUNTIME_ANY)
}
