/// Compatibility scoring for two users' answers against candidate movies
///
/// Every candidate gets a per-category sub-score for each user, the two
/// users' sub-scores are combined with a geometric mean, and the weighted
/// average over scorable categories maps into the presented score band.
/// Scoring never fails: missing answers, unknown option values, and sparse
/// movie records all resolve to the neutral sub-score.
use crate::models::{AnswerSet, CandidateMovie, Question, QuestionCategory, ScoredMovie};
use crate::services::tables;
use std::collections::HashSet;

/// Sub-score when a user expressed no usable preference for a category
const NEUTRAL: f64 = 0.5;

/// Assumed release year when a candidate carries no parsable date
const DEFAULT_YEAR: i32 = 2000;

/// Lower edge of the presented score band
const SCORE_FLOOR: f64 = 0.55;

/// Width of the presented score band
const SCORE_SPAN: f64 = 0.43;

/// Relative importance of each preference axis. Categories absent from the
/// question catalog drop out of the weighted average entirely, the rest
/// renormalize over their weight sum. The retired language axis carries no
/// weight and is not listed.
const CATEGORY_WEIGHTS: [(QuestionCategory, f64); 6] = [
    (QuestionCategory::Genre, 0.30),
    (QuestionCategory::Mood, 0.20),
    (QuestionCategory::Era, 0.15),
    (QuestionCategory::Length, 0.10),
    (QuestionCategory::Rating, 0.15),
    (QuestionCategory::Platform, 0.10),
];

/// Computes the joint compatibility score for one candidate.
///
/// The result always lands in `[SCORE_FLOOR, SCORE_FLOOR + SCORE_SPAN]`.
/// When the catalog holds no scorable question at all, the raw score is
/// neutral and the result sits at the band midpoint.
pub fn compute_match_score(
    movie: &CandidateMovie,
    catalog: &[Question],
    user1: &AnswerSet,
    user2: &AnswerSet,
) -> f64 {
    let mut weighted_sum = 0.0;
    let mut weight_sum = 0.0;

    for (category, weight) in CATEGORY_WEIGHTS {
        if !catalog.iter().any(|q| q.category == category) {
            continue;
        }

        let score1 = category_score(category, movie, catalog, user1);
        let score2 = category_score(category, movie, catalog, user2);

        // Geometric mean: one enthusiastic user cannot mask the other's
        // strong mismatch the way an arithmetic mean would
        let combined = (score1 * score2).sqrt();

        weighted_sum += combined * weight;
        weight_sum += weight;
    }

    let raw = if weight_sum > 0.0 {
        weighted_sum / weight_sum
    } else {
        NEUTRAL
    };

    (SCORE_FLOOR + raw * SCORE_SPAN).clamp(0.0, 1.0)
}

/// Scores every candidate and orders them best-first.
///
/// The sort is stable, so candidates with equal scores keep the catalog
/// provider's popularity order. Ranks are assigned from the final order
/// starting at 1.
pub fn rank_movies(
    movies: Vec<CandidateMovie>,
    catalog: &[Question],
    user1: &AnswerSet,
    user2: &AnswerSet,
) -> Vec<ScoredMovie> {
    let mut scored: Vec<ScoredMovie> = movies
        .into_iter()
        .map(|movie| {
            let match_score = compute_match_score(&movie, catalog, user1, user2);
            ScoredMovie {
                movie,
                match_score,
                rank: 0,
            }
        })
        .collect();

    scored.sort_by(|a, b| {
        b.match_score
            .partial_cmp(&a.match_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    for (index, entry) in scored.iter_mut().enumerate() {
        entry.rank = index as u32 + 1;
    }

    scored
}

fn category_score(
    category: QuestionCategory,
    movie: &CandidateMovie,
    catalog: &[Question],
    answers: &AnswerSet,
) -> f64 {
    match category {
        QuestionCategory::Genre => genre_score(movie, catalog, answers),
        QuestionCategory::Mood => mood_score(movie, catalog, answers),
        QuestionCategory::Era => era_score(movie, catalog, answers),
        QuestionCategory::Length => length_score(movie, catalog, answers),
        QuestionCategory::Rating => rating_score(movie, catalog, answers),
        QuestionCategory::Platform => platform_score(catalog, answers),
        // Retired axis, kept only so old answers still deserialize
        QuestionCategory::Language => NEUTRAL,
    }
}

/// Overlap between the user's selected genres and the movie's genres,
/// scaled by how much of the movie the overlap covers
fn genre_score(movie: &CandidateMovie, catalog: &[Question], answers: &AnswerSet) -> f64 {
    let (question, value) = match answers.for_category(catalog, QuestionCategory::Genre) {
        Some(found) => found,
        None => return NEUTRAL,
    };

    let selected = question.genre_ids_for(&value.text_values());
    if selected.is_empty() || movie.genre_ids.is_empty() {
        return NEUTRAL;
    }

    let overlap = movie
        .genre_ids
        .iter()
        .filter(|id| selected.contains(id))
        .count();

    if overlap == 0 {
        return 0.1;
    }

    0.6 + 0.4 * (overlap as f64 / movie.genre_ids.len() as f64)
}

/// Counts movie genres inside the union of the selected moods' genre sets
fn mood_score(movie: &CandidateMovie, catalog: &[Question], answers: &AnswerSet) -> f64 {
    let (_, value) = match answers.for_category(catalog, QuestionCategory::Mood) {
        Some(found) => found,
        None => return NEUTRAL,
    };

    let mut mood_ids: HashSet<u32> = HashSet::new();
    for mood in value.text_values() {
        if let Some(names) = tables::mood_genres(&mood) {
            for name in names {
                if let Some(id) = tables::genre_id(name) {
                    mood_ids.insert(id);
                }
            }
        }
    }

    if mood_ids.is_empty() {
        return NEUTRAL;
    }

    let matches = movie
        .genre_ids
        .iter()
        .filter(|id| mood_ids.contains(id))
        .count();

    if matches == 0 {
        return 0.15;
    }

    (0.6 + 0.1 * matches as f64).min(1.0)
}

/// Full credit inside any selected era, linear falloff outside it
fn era_score(movie: &CandidateMovie, catalog: &[Question], answers: &AnswerSet) -> f64 {
    let (_, value) = match answers.for_category(catalog, QuestionCategory::Era) {
        Some(found) => found,
        None => return NEUTRAL,
    };

    let year = movie.release_year().unwrap_or(DEFAULT_YEAR);

    let mut best: f64 = 0.0;
    let mut resolved = false;

    for selected in value.text_values() {
        if let Some((start, end)) = tables::era_bounds(&selected) {
            resolved = true;
            if year >= start && year <= end {
                return 1.0;
            }
            let distance = if year < start { start - year } else { year - end };
            let partial = (1.0 - distance as f64 / 15.0).max(0.1);
            best = best.max(partial);
        }
    }

    if !resolved {
        return NEUTRAL;
    }

    best
}

/// Full credit inside any selected runtime bucket, half credit in a
/// bucket's tolerance zone, the floor beyond all of them
fn length_score(movie: &CandidateMovie, catalog: &[Question], answers: &AnswerSet) -> f64 {
    let (_, value) = match answers.for_category(catalog, QuestionCategory::Length) {
        Some(found) => found,
        None => return NEUTRAL,
    };

    let runtime = match movie.runtime {
        Some(runtime) => runtime,
        None => return NEUTRAL,
    };

    let mut best: f64 = 0.0;
    let mut resolved = false;

    for selected in value.text_values() {
        if selected == "any" {
            return 1.0;
        }
        if let Some((min, max)) = tables::runtime_bounds(&selected) {
            resolved = true;
            if runtime >= min && runtime <= max {
                return 1.0;
            }
            let partial = match selected.as_str() {
                "short" if runtime <= 110 => 0.5,
                "medium" if (75..=140).contains(&runtime) => 0.5,
                "long" if runtime >= 100 => 0.5,
                _ => 0.1,
            };
            best = best.max(partial);
        }
    }

    if !resolved {
        return NEUTRAL;
    }

    best
}

/// Band credit against the user's minimum acceptable vote average
fn rating_score(movie: &CandidateMovie, catalog: &[Question], answers: &AnswerSet) -> f64 {
    let (_, value) = match answers.for_category(catalog, QuestionCategory::Rating) {
        Some(found) => found,
        None => return NEUTRAL,
    };

    let thresholds = value.numeric_values();
    if thresholds.is_empty() {
        return NEUTRAL;
    }

    let threshold = thresholds.into_iter().fold(f64::INFINITY, f64::min);
    if threshold <= 0.0 {
        return 1.0;
    }

    let vote_average = movie.vote_average;
    if vote_average >= threshold {
        1.0
    } else if vote_average >= threshold - 1.0 {
        0.7
    } else {
        (vote_average / threshold).max(0.1)
    }
}

/// Flat credit for holding a platform preference at all.
///
/// Platform availability is already enforced upstream by the discover
/// filter, so the scorer only rewards that the users constrained the pool.
fn platform_score(catalog: &[Question], answers: &AnswerSet) -> f64 {
    let (question, value) = match answers.for_category(catalog, QuestionCategory::Platform) {
        Some(found) => found,
        None => return NEUTRAL,
    };

    if question.provider_ids_for(&value.text_values()).is_empty() {
        NEUTRAL
    } else {
        0.8
    }
}
