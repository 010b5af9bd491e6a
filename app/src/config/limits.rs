/// Lowest meaningful contrast ratio (identical colors)
pub const MIN_CONTRAST_RATIO: f64 = 1.0;

/// Highest possible contrast ratio (black on white)
pub const MAX_CONTRAST_RATIO: f64 = 21.0;

/// Fastest allowed OS color scheme polling interval
pub const MIN_POLL_INTERVAL_MS: u64 = 100;

/// Slowest allowed OS color scheme polling interval (1 minute)
pub const MAX_POLL_INTERVAL_MS: u64 = 60_000;

/// Log levels accepted in `logging.level`
pub const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];
