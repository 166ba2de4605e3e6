//! Core entity structs for the seismic catalog.
//!
//! Covers the incoming [`EventReport`] and the persisted
//! [`EarthquakeRecord`]. Coordinates are decimal degrees, depth is
//! kilometers, magnitude is whatever scale the reporting network uses
//! (the catalog treats it as a dimensionless real and only compares
//! values from different reports of the same event).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::EarthquakeId;

/// Open string-keyed metadata attached to a report or record.
///
/// Networks attach arbitrary extras here (station counts, review
/// status, source URLs). The merge policy shallow-merges these maps.
pub type AdditionalData = serde_json::Map<String, serde_json::Value>;

// ---------------------------------------------------------------------------
// EventReport
// ---------------------------------------------------------------------------

/// An incoming seismic-event report from one upstream network.
///
/// Reports are not persisted directly. Each one is either merged into
/// an existing [`EarthquakeRecord`] or becomes the seed of a new one.
/// Field validation (coordinate ranges, non-empty source) is the
/// boundary layer's responsibility; by the time a report reaches the
/// dedup engine its required fields are assumed well-formed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventReport {
    /// Identifier of the reporting seismic network.
    pub source_id: String,
    /// Origin time of the event as estimated by the source.
    pub timestamp: DateTime<Utc>,
    /// Epicenter latitude in decimal degrees, -90 to 90.
    pub latitude: f64,
    /// Epicenter longitude in decimal degrees, -180 to 180.
    pub longitude: f64,
    /// Magnitude estimate from the source.
    pub magnitude: f64,
    /// Hypocenter depth in kilometers, if the source provides one.
    pub depth: Option<f64>,
    /// Free-form source metadata.
    pub additional_data: Option<AdditionalData>,
}

// ---------------------------------------------------------------------------
// EarthquakeRecord
// ---------------------------------------------------------------------------

/// The canonical, deduplicated representation of one physical event.
///
/// At most one record should exist per physically distinct earthquake
/// within the detection tolerance. This is best-effort: the duplicate
/// classifier is a heuristic and can miss merges or merge incorrectly
/// by design trade-off. Records are mutated in place by merges and are
/// never deleted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarthquakeRecord {
    /// Unique record identifier, assigned by the store.
    pub id: EarthquakeId,
    /// Network that first reported the event.
    pub source_id: String,
    /// Origin time of the event.
    pub timestamp: DateTime<Utc>,
    /// Epicenter latitude in decimal degrees.
    pub latitude: f64,
    /// Epicenter longitude in decimal degrees.
    pub longitude: f64,
    /// Highest magnitude estimate seen for this event.
    pub magnitude: f64,
    /// Hypocenter depth in kilometers, if known.
    pub depth: Option<f64>,
    /// Merged free-form metadata from all contributing reports.
    pub additional_data: Option<AdditionalData>,
    /// When the record was first created.
    pub created_at: DateTime<Utc>,
    /// When the record was last modified by a merge.
    pub updated_at: DateTime<Utc>,
}

impl EarthquakeRecord {
    /// Build a record verbatim from a report, as the store does when no
    /// duplicate is found.
    ///
    /// The store normally assigns `id` and the audit timestamps itself;
    /// this constructor exists for the in-memory store and tests.
    pub fn from_report(report: EventReport, id: EarthquakeId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            source_id: report.source_id,
            timestamp: report.timestamp,
            latitude: report.latitude,
            longitude: report.longitude,
            magnitude: report.magnitude,
            depth: report.depth,
            additional_data: report.additional_data,
            created_at: now,
            updated_at: now,
        }
    }
}
