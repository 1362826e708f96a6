//! Shared constants.

/// Number of undo points kept by the history store unless configured otherwise
pub const DEFAULT_MAX_HISTORY: usize = 30;

/// Side length of the placeholder box used for point-based elements
pub const PLACEHOLDER_EXTENT: f64 = 100.0;

/// Smallest width/height reported for a selection box
pub const MIN_SELECTION_EXTENT: f64 = 1.0;
