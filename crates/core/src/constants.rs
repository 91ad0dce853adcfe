/// Points required to advance exactly one level (24 hours of focus, in minutes).
pub const POINTS_FOR_LEVEL_UP: i64 = 1440;

/// Focus seconds that earn a single point.
pub const SECONDS_PER_POINT: u64 = 60;

/// Level every user starts at before earning any points.
pub const STARTING_LEVEL: i64 = 1;

/// Default number of sessions returned by history listings.
pub const DEFAULT_SESSION_HISTORY_LIMIT: i64 = 50;
