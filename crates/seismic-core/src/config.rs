//! Tunable thresholds for the duplicate classifier.
//!
//! The classifier constants are explicit configuration rather than
//! embedded literals so boundary values can be exercised precisely in
//! tests and tuned per deployment. All fields have serde defaults, so
//! an empty YAML section yields the stock behavior.

use serde::Deserialize;

/// Thresholds governing candidate search and duplicate classification.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DedupConfig {
    /// Width of the trailing candidate search window, in minutes.
    #[serde(default = "default_time_window_minutes")]
    pub time_window_minutes: i64,

    /// Base spatial radius for a match, in kilometers.
    #[serde(default = "default_distance_threshold_km")]
    pub distance_threshold_km: f64,

    /// Maximum magnitude delta still considered "same event" under the
    /// strict branch.
    #[serde(default = "default_magnitude_difference_threshold")]
    pub magnitude_difference_threshold: f64,

    /// Boundary between "very close in time" and "further apart", in
    /// minutes.
    #[serde(default = "default_close_time_threshold_minutes")]
    pub close_time_threshold_minutes: f64,

    /// Multiplier applied to the spatial threshold when two events are
    /// very close in time.
    #[serde(default = "default_spatial_threshold_modifier")]
    pub spatial_threshold_modifier: f64,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            time_window_minutes: default_time_window_minutes(),
            distance_threshold_km: default_distance_threshold_km(),
            magnitude_difference_threshold: default_magnitude_difference_threshold(),
            close_time_threshold_minutes: default_close_time_threshold_minutes(),
            spatial_threshold_modifier: default_spatial_threshold_modifier(),
        }
    }
}

const fn default_time_window_minutes() -> i64 {
    10
}

const fn default_distance_threshold_km() -> f64 {
    50.0
}

const fn default_magnitude_difference_threshold() -> f64 {
    1.0
}

const fn default_close_time_threshold_minutes() -> f64 {
    2.0
}

const fn default_spatial_threshold_modifier() -> f64 {
    0.7
}
