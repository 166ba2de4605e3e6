//! Merge policy for confirmed duplicate reports.
//!
//! The catalog always reflects the highest magnitude estimate seen for
//! an event. A duplicate report only touches the stored record when it
//! raises the magnitude; lower or equal estimates leave the record
//! untouched, including its depth and metadata.

use seismic_types::{EarthquakeRecord, EventReport};

/// Result of applying the merge policy to a (record, report) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    /// The record after the policy was applied. Identical to the input
    /// record when `updated` is false.
    pub record: EarthquakeRecord,
    /// Whether any field changed.
    pub updated: bool,
}

/// Apply the monotonic-maximum merge policy.
///
/// When `report.magnitude > existing.magnitude`:
/// - magnitude is replaced,
/// - depth is replaced only if the report carries one,
/// - `additional_data` is shallow-merged, report keys winning on
///   conflict.
///
/// Otherwise the existing record is returned unchanged. The caller is
/// responsible for persisting an updated record; this function is pure.
pub fn apply_merge(existing: &EarthquakeRecord, report: &EventReport) -> MergeOutcome {
    if report.magnitude <= existing.magnitude {
        return MergeOutcome {
            record: existing.clone(),
            updated: false,
        };
    }

    let mut record = existing.clone();
    record.magnitude = report.magnitude;

    if let Some(depth) = report.depth {
        record.depth = Some(depth);
    }

    if let Some(extra) = &report.additional_data {
        let mut merged = record.additional_data.take().unwrap_or_default();
        for (key, value) in extra {
            merged.insert(key.clone(), value.clone());
        }
        record.additional_data = Some(merged);
    }

    MergeOutcome {
        record,
        updated: true,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::float_cmp)]

    use chrono::Utc;
    use seismic_types::{AdditionalData, EarthquakeId};
    use serde_json::json;

    use super::*;

    fn existing_record(magnitude: f64) -> EarthquakeRecord {
        let now = Utc::now();
        EarthquakeRecord {
            id: EarthquakeId::new(),
            source_id: String::from("net-a"),
            timestamp: now,
            latitude: 35.0,
            longitude: 139.0,
            magnitude,
            depth: Some(10.0),
            additional_data: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn report(magnitude: f64) -> EventReport {
        EventReport {
            source_id: String::from("net-b"),
            timestamp: Utc::now(),
            latitude: 35.1,
            longitude: 139.1,
            magnitude,
            depth: None,
            additional_data: None,
        }
    }

    fn metadata(pairs: &[(&str, &str)]) -> AdditionalData {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), json!(v)))
            .collect()
    }

    #[test]
    fn magnitude_is_monotonic_maximum() {
        let existing = existing_record(5.0);

        let raised = apply_merge(&existing, &report(5.5));
        assert!(raised.updated);
        assert_eq!(raised.record.magnitude, 5.5);

        let lowered = apply_merge(&existing, &report(4.5));
        assert!(!lowered.updated);
        assert_eq!(lowered.record.magnitude, 5.0);
    }

    #[test]
    fn equal_magnitude_is_not_an_update() {
        let existing = existing_record(5.0);
        let outcome = apply_merge(&existing, &report(5.0));
        assert!(!outcome.updated);
        assert_eq!(outcome.record, existing);
    }

    #[test]
    fn lower_magnitude_changes_nothing() {
        // Scenario E: the report carries depth and metadata, but the
        // lower magnitude means none of it lands.
        let existing = existing_record(6.0);
        let mut incoming = report(5.0);
        incoming.depth = Some(99.0);
        incoming.additional_data = Some(metadata(&[("reviewed", "yes")]));

        let outcome = apply_merge(&existing, &incoming);
        assert!(!outcome.updated);
        assert_eq!(outcome.record, existing);
    }

    #[test]
    fn depth_replaced_only_when_present() {
        let existing = existing_record(5.0);

        let without_depth = apply_merge(&existing, &report(5.5));
        assert_eq!(without_depth.record.depth, Some(10.0));

        let mut with_depth = report(5.5);
        with_depth.depth = Some(42.0);
        let outcome = apply_merge(&existing, &with_depth);
        assert_eq!(outcome.record.depth, Some(42.0));
    }

    #[test]
    fn metadata_merge_is_shallow_with_report_winning() {
        let mut existing = existing_record(5.0);
        existing.additional_data = Some(metadata(&[("agency", "jma"), ("quality", "A")]));

        let mut incoming = report(5.5);
        incoming.additional_data = Some(metadata(&[("quality", "B"), ("stations", "44")]));

        let outcome = apply_merge(&existing, &incoming);
        let merged = outcome.record.additional_data.unwrap();
        // Keys only in the existing record survive.
        assert_eq!(merged.get("agency"), Some(&json!("jma")));
        // Conflicting keys take the report's value.
        assert_eq!(merged.get("quality"), Some(&json!("B")));
        // New report keys are added.
        assert_eq!(merged.get("stations"), Some(&json!("44")));
    }

    #[test]
    fn missing_report_metadata_leaves_existing_untouched() {
        let mut existing = existing_record(5.0);
        existing.additional_data = Some(metadata(&[("agency", "jma")]));

        let outcome = apply_merge(&existing, &report(5.5));
        assert_eq!(
            outcome.record.additional_data,
            Some(metadata(&[("agency", "jma")]))
        );
    }

    #[test]
    fn metadata_merge_into_empty_existing() {
        let existing = existing_record(5.0);
        let mut incoming = report(5.5);
        incoming.additional_data = Some(metadata(&[("stations", "44")]));

        let outcome = apply_merge(&existing, &incoming);
        assert_eq!(
            outcome.record.additional_data,
            Some(metadata(&[("stations", "44")]))
        );
    }
}
