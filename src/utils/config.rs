//! Configuration and constants for the library and CLI.

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Extra slots added on every geometric growth of a matrix buffer.
/// New capacity is `2 * (needed + GROWTH_PADDING)`.
pub const GROWTH_PADDING: usize = 16;

/// Default path of the written curve report
pub const DEFAULT_REPORT_PATH: &str = "curves.json";

// Accepted spellings of the axis direction in run files
pub const INCREASING_NAMES: &[&str] = &["increasing", "ascending", "up"];
pub const DECREASING_NAMES: &[&str] = &["decreasing", "descending", "down"];
