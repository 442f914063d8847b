/// Lookahead, in days, of the bulk listing kept in the cache.
/// Independent of the window a caller asks for.
pub const DEFAULT_FETCH_WINDOW_DAYS: u32 = 60;

/// How long a cached bulk listing is served before the next reader refetches it.
pub const DEFAULT_CACHE_TTL_SECS: i64 = 3600;

/// Placeholder for fields a search hit doesn't carry.
pub const NOT_AVAILABLE: &str = "N/A";

/// Display format for shaped dates, e.g. "Mar 01, 2024".
pub const DISPLAY_DATE_FORMAT: &str = "%b %d, %Y";
