/// End-to-end match generation: synthesize a filter, discover candidates,
/// widen the pool when the filters proved too narrow, then rank and select.
use std::collections::HashSet;

use crate::error::AppResult;
use crate::models::{AnswerSet, CandidateMovie, DiscoverFilter, Question, ScoredMovie};
use crate::services::providers::MovieCatalog;
use crate::services::{filters, scoring};

/// Below this many unseen candidates the filtered pool is considered too
/// thin and a broadened fetch tops it up
const MIN_USABLE_CANDIDATES: usize = 3;

/// Pool cap after merging broadened results
const MAX_POOL_SIZE: usize = 10;

/// Selection bounds over the ranked list
const MIN_SELECTION: usize = 3;
const MAX_SELECTION: usize = 10;

/// Generates the ranked movie matches for a pair of answer sets.
///
/// Movies the couple already saw are dropped before the pool is judged
/// thin, so a result dominated by rewatches still triggers the broadened
/// fetch. An empty result is a valid outcome, not an error: it means even
/// the broadened catalog had nothing new for this couple.
pub async fn generate_matches(
    provider: &dyn MovieCatalog,
    questions: &[Question],
    user1: &AnswerSet,
    user2: &AnswerSet,
    seen_movie_ids: &[u64],
    watch_region: &str,
) -> AppResult<Vec<ScoredMovie>> {
    let seen: HashSet<u64> = seen_movie_ids.iter().copied().collect();

    let filter = filters::synthesize_filter(questions, user1, user2, watch_region);
    let discovered = provider.discover_movies(&filter).await?;
    let discovered_count = discovered.len();

    let mut pool: Vec<CandidateMovie> = discovered
        .into_iter()
        .filter(|movie| !seen.contains(&movie.id))
        .collect();

    if pool.len() < MIN_USABLE_CANDIDATES {
        tracing::info!(
            discovered = discovered_count,
            usable = pool.len(),
            "Filtered discover pool too thin, broadening"
        );
        broaden_pool(provider, &seen, &mut pool).await;
    }

    let pool_size = pool.len();
    let mut ranked = scoring::rank_movies(pool, questions, user1, user2);

    let target = MIN_SELECTION.max(ranked.len().min(MAX_SELECTION));
    ranked.truncate(target);

    tracing::info!(
        pool = pool_size,
        selected = ranked.len(),
        provider = provider.name(),
        "Match generation completed"
    );

    Ok(ranked)
}

/// Tops the pool up from a constraint-free discover pass.
///
/// Filtered results keep their position, broadened results append in
/// popularity order, duplicates and seen movies are skipped, and the merged
/// pool stops at the cap. A failed broadened fetch is logged and tolerated
/// since the filtered candidates are still worth ranking.
async fn broaden_pool(
    provider: &dyn MovieCatalog,
    seen: &HashSet<u64>,
    pool: &mut Vec<CandidateMovie>,
) {
    let broadened = match provider.discover_movies(&DiscoverFilter::broadened()).await {
        Ok(broadened) => broadened,
        Err(e) => {
            tracing::warn!(error = %e, "Broadened discover failed, continuing with filtered pool");
            return;
        }
    };

    let mut known: HashSet<u64> = pool.iter().map(|movie| movie.id).collect();
    for movie in broadened {
        if pool.len() >= MAX_POOL_SIZE {
            break;
        }
        if seen.contains(&movie.id) || !known.insert(movie.id) {
            continue;
        }
        pool.push(movie);
    }
}
