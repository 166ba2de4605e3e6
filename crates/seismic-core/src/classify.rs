//! Duplicate classification for incoming event reports.
//!
//! Two reports of the same physical earthquake rarely agree exactly:
//! networks differ on origin time by seconds-to-minutes, on epicenter
//! by tens of kilometers, and on magnitude by whole units while
//! estimates are being revised. The classifier trades those tolerances
//! off against each other:
//!
//! - Reports **very close in time** get a tightened spatial radius and
//!   must also agree on magnitude. Co-located, closely-timed reports
//!   with very different magnitudes are more likely two distinct small
//!   events than misreports of one large event.
//! - Reports **further apart in time** are given leniency on magnitude
//!   (estimates are revised over minutes-to-hours), but a large
//!   magnitude gap is accepted only with a near-exact location match.

use chrono::{DateTime, Utc};
use seismic_types::{EarthquakeRecord, EventReport};

use crate::config::DedupConfig;
use crate::distance::haversine_distance_km;

/// Tighter spatial factor applied when magnitudes diverge beyond the
/// threshold outside the strict branch.
const DIVERGENT_MAGNITUDE_SPATIAL_FACTOR: f64 = 0.5;

/// Absolute time difference between two instants, in fractional minutes.
pub fn time_difference_minutes(a: DateTime<Utc>, b: DateTime<Utc>) -> f64 {
    let millis = a.signed_duration_since(b).num_milliseconds().abs();
    #[allow(clippy::cast_precision_loss)]
    let minutes = millis as f64 / 60_000.0;
    minutes
}

/// The spatial radius in effect for a given temporal proximity.
///
/// Within the close-time threshold the base radius is tightened by the
/// configured modifier; beyond it the base radius applies.
pub const fn adjusted_spatial_threshold(time_diff_minutes: f64, config: &DedupConfig) -> f64 {
    if time_diff_minutes <= config.close_time_threshold_minutes {
        config.distance_threshold_km * config.spatial_threshold_modifier
    } else {
        config.distance_threshold_km
    }
}

/// Decide whether `report` and `candidate` describe the same physical
/// event.
///
/// Pure boolean decision over finite inputs; behavior for non-finite
/// numbers is unspecified.
pub fn is_duplicate(
    report: &EventReport,
    candidate: &EarthquakeRecord,
    time_diff_minutes: f64,
    config: &DedupConfig,
) -> bool {
    let distance = haversine_distance_km(
        report.latitude,
        report.longitude,
        candidate.latitude,
        candidate.longitude,
    );
    let magnitude_diff = (report.magnitude - candidate.magnitude).abs();
    let spatial_threshold = adjusted_spatial_threshold(time_diff_minutes, config);

    if time_diff_minutes <= config.close_time_threshold_minutes {
        // Strict branch: spatial and magnitude agreement both required.
        distance <= spatial_threshold && magnitude_diff <= config.magnitude_difference_threshold
    } else if magnitude_diff > config.magnitude_difference_threshold {
        // Large magnitude disagreement is tolerated only with a
        // near-exact location match.
        distance <= spatial_threshold * DIVERGENT_MAGNITUDE_SPATIAL_FACTOR
    } else {
        distance <= spatial_threshold
    }
}

/// A candidate that classified as a duplicate of an incoming report.
#[derive(Debug, Clone, Copy)]
pub struct DuplicateMatch<'a> {
    /// The matched stored record.
    pub record: &'a EarthquakeRecord,
    /// Great-circle distance between report and record epicenters.
    pub distance_km: f64,
    /// Absolute origin-time difference, in minutes.
    pub time_difference_minutes: f64,
}

/// Select the duplicate for `report` among `candidates`, if any.
///
/// Every candidate is classified and the closest match wins; distance
/// ties go to the candidate with the most recent origin time. The
/// result therefore depends only on the candidate *set*, not on the
/// order the store returned it in.
pub fn find_duplicate<'a>(
    report: &EventReport,
    candidates: &'a [EarthquakeRecord],
    config: &DedupConfig,
) -> Option<DuplicateMatch<'a>> {
    let mut best: Option<DuplicateMatch<'a>> = None;

    for candidate in candidates {
        let dt = time_difference_minutes(report.timestamp, candidate.timestamp);
        if !is_duplicate(report, candidate, dt, config) {
            continue;
        }
        let distance_km = haversine_distance_km(
            report.latitude,
            report.longitude,
            candidate.latitude,
            candidate.longitude,
        );
        let candidate_match = DuplicateMatch {
            record: candidate,
            distance_km,
            time_difference_minutes: dt,
        };
        best = match best {
            None => Some(candidate_match),
            Some(current) => {
                let closer = match distance_km.total_cmp(&current.distance_km) {
                    std::cmp::Ordering::Less => true,
                    std::cmp::Ordering::Equal => {
                        candidate.timestamp > current.record.timestamp
                    }
                    std::cmp::Ordering::Greater => false,
                };
                if closer { Some(candidate_match) } else { Some(current) }
            }
        };
    }

    best
}
