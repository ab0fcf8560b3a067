//! Offset/limit clamping shared by paginated source queries.

/// Default and maximum page size for source listings.
pub const LIST_DEFAULT_LIMIT: u64 = 50;
pub const LIST_MAX_LIMIT: u64 = 100;

/// Default and maximum page size for full-text search.
pub const SEARCH_DEFAULT_LIMIT: u64 = 20;
pub const SEARCH_MAX_LIMIT: u64 = 50;

/// Default and maximum page size for author aggregation.
pub const AUTHORS_DEFAULT_LIMIT: u64 = 50;
pub const AUTHORS_MAX_LIMIT: u64 = 100;

/// Clamps a caller-supplied offset to be non-negative, defaulting to 0.
pub fn clamp_offset(offset: Option<i64>) -> u64 {
    offset.unwrap_or(0).max(0) as u64
}

/// Clamps a caller-supplied limit into `[1, max]`, using `default` when absent.
pub fn clamp_limit(limit: Option<i64>, default: u64, max: u64) -> u64 {
    match limit {
        None => default.clamp(1, max),
        Some(limit) => limit.clamp(1, max as i64) as u64,
    }
}
