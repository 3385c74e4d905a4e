/// Read-through caching over a fallible async fetch.
///
/// Checks the cache first and returns the hit if present. On a miss the
/// block runs, its value is queued for a background cache write, and the
/// value is returned. The key expression is evaluated exactly once, before
/// the fetch block. The cache must expose `get_from_cache` and
/// `set_in_background`.
///
/// # Example
/// ```ignore
/// let movies = cached!(cache, CacheKey::Discover(query), 3600, async move {
///     fetch_from_tmdb().await
/// });
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        let key = $key;
        if let Some(cached) = $cache.get_from_cache(&key).await? {
            Ok(cached)
        } else {
            let value = $block.await?;
            $cache.set_in_background(&key, &value, $ttl);
            Ok(value)
        }
    }};
}
