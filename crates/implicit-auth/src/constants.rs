//! Implicit-grant protocol constants

/// Separator used both in cache keys and in the persisted token format.
///
/// An access token containing this sequence does not round-trip.
pub const DELIMITER: &str = "-----";

/// `response_type` value requesting the implicit grant
pub const RESPONSE_TYPE: &str = "token";

/// Tokens expiring within this many milliseconds are refreshed proactively.
pub const FRESHNESS_MARGIN_MILLIS: f64 = 10.0 * 60.0 * 1000.0;

/// Default popup width, in pixels
pub const DEFAULT_WINDOW_WIDTH: u32 = 800;

/// Default popup height, in pixels
pub const DEFAULT_WINDOW_HEIGHT: u32 = 600;
