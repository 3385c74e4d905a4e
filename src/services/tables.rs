/// Fixed lookup tables shared by filter synthesis and scoring
///
/// These mirror TMDB's published genre taxonomy and the option values of the
/// seeded question catalog. They are compile-time constants on purpose:
/// answers referencing unknown values resolve to `None` and the caller falls
/// back to its neutral behavior instead of guessing.

/// Year range meaning "no era preference"
pub const ERA_ANY: (i32, i32) = (1950, 2030);

/// Runtime range in minutes meaning "no length preference"
pub const RUNTIME_ANY: (u32, u32) = (0, 400);

/// TMDB genre id for a canonical genre name
pub fn genre_id(name: &str) -> Option<u32> {
    match name {
        "Action" => Some(28),
        "Adventure" => Some(12),
        "Animation" => Some(16),
        "Comedy" => Some(35),
        "Crime" => Some(80),
        "Documentary" => Some(99),
        "Drama" => Some(18),
        "Family" => Some(10751),
        "Fantasy" => Some(14),
        "History" => Some(36),
        "Horror" => Some(27),
        "Music" => Some(10402),
        "Mystery" => Some(9648),
        "Romance" => Some(10749),
        "Science Fiction" => Some(878),
        "TV Movie" => Some(10770),
        "Thriller" => Some(53),
        "War" => Some(10752),
        "Western" => Some(37),
        _ => None,
    }
}

/// Inclusive release-year bounds for an era option value
pub fn era_bounds(value: &str) -> Option<(i32, i32)> {
    match value {
        "classic" => Some((1950, 1989)),
        "90s" => Some((1990, 1999)),
        "2000s" => Some((2000, 2009)),
        "2010s" => Some((2010, 2019)),
        "recent" => Some((2020, 2030)),
        "any" => Some(ERA_ANY),
        _ => None,
    }
}

/// Inclusive runtime bounds in minutes for a length option value
pub fn runtime_bounds(value: &str) -> Option<(u32, u32)> {
    match value {
        "short" => Some((0, 89)),
        "medium" => Some((90, 120)),
        "long" => Some((121, 400)),
        "any" => Some(RUNTIME_ANY),
        _ => None,
    }
}

/// Genre names associated with a mood option value
pub fn mood_genres(value: &str) -> Option<&'static [&'static str]> {
    match value {
        "romantic" => Some(&["Romance", "Drama", "Comedy"]),
        "thrilling" => Some(&["Thriller", "Action", "Crime", "Mystery"]),
        "funny" => Some(&["Comedy", "Animation", "Family"]),
        "epic" => Some(&["Action", "Adventure", "Science Fiction", "Fantasy"]),
        "dark" => Some(&["Horror", "Thriller", "Crime"]),
        "chill" => Some(&["Comedy", "Drama", "Animation", "Family"]),
        _ => None,
    }
}
