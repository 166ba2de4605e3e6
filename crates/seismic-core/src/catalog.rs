//! The registration flow and the narrow store seam it runs against.
//!
//! [`CatalogService`] is stateless: every invocation fetches its
//! candidate set from the store, runs the pure classifier and merge
//! policy, and delegates the resulting write back to the store. All
//! state lives behind [`CatalogStore`]; the engine holds nothing
//! between calls and performs no blocking I/O itself.

use chrono::{DateTime, Duration, Utc};
use seismic_types::{EarthquakeRecord, EventReport};

use crate::classify::find_duplicate;
use crate::config::DedupConfig;
use crate::merge::apply_merge;

/// The store collaborator consumed by the engine.
///
/// Implementations own record identity and persistence. Errors
/// propagate unchanged through the service; the engine performs no
/// retries and no partial-failure recovery.
pub trait CatalogStore: Send + Sync {
    /// The store's failure type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch records with `timestamp` in `[start, end]`, both ends
    /// inclusive. Return order is irrelevant to the engine.
    fn find_in_time_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<EarthquakeRecord>, Self::Error>> + Send;

    /// Persist a brand-new record built verbatim from the report,
    /// assigning its identifier and creation timestamp.
    fn create(
        &self,
        report: EventReport,
    ) -> impl Future<Output = Result<EarthquakeRecord, Self::Error>> + Send;

    /// Persist an in-place mutation of an existing record, updating its
    /// modification timestamp.
    fn save(
        &self,
        record: EarthquakeRecord,
    ) -> impl Future<Output = Result<EarthquakeRecord, Self::Error>> + Send;

    /// List records ordered by origin time descending, optionally
    /// restricted to `timestamp >= since`.
    fn list_all(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> impl Future<Output = Result<Vec<EarthquakeRecord>, Self::Error>> + Send;
}

/// How a registration was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterDisposition {
    /// No candidate matched; a new canonical record was created.
    Created,
    /// A duplicate was found and the stored record was updated.
    Merged,
    /// A duplicate was found but the report did not raise the stored
    /// magnitude; the record is unchanged.
    Unchanged,
}

/// Outcome of [`CatalogService::register`].
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterOutcome {
    /// The canonical record the report resolved to.
    pub record: EarthquakeRecord,
    /// How the report was resolved.
    pub disposition: RegisterDisposition,
}

/// The deduplicating catalog engine over a store collaborator.
#[derive(Debug, Clone)]
pub struct CatalogService<S> {
    store: S,
    config: DedupConfig,
}

impl<S: CatalogStore> CatalogService<S> {
    /// Create a service over `store` with the given thresholds.
    pub const fn new(store: S, config: DedupConfig) -> Self {
        Self { store, config }
    }

    /// The thresholds in effect.
    pub const fn config(&self) -> &DedupConfig {
        &self.config
    }

    /// Register an incoming report against the catalog.
    ///
    /// Fetches candidates in the trailing time window, classifies them,
    /// and either merges into the closest duplicate or creates a new
    /// canonical record.
    ///
    /// Candidate fetch and the eventual write are separate store calls:
    /// two concurrent registrations of the same physical event can each
    /// miss the other and both create records. This weak-consistency
    /// window is accepted; the catalog is best-effort, not exactly-once.
    pub async fn register(&self, report: EventReport) -> Result<RegisterOutcome, S::Error> {
        let window_start = report
            .timestamp
            .checked_sub_signed(Duration::minutes(self.config.time_window_minutes))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);

        let candidates = self
            .store
            .find_in_time_range(window_start, report.timestamp)
            .await?;
        tracing::debug!(
            source_id = report.source_id,
            candidates = candidates.len(),
            "Fetched dedup candidates"
        );

        let Some(matched) = find_duplicate(&report, &candidates, &self.config) else {
            let created = self.store.create(report).await?;
            tracing::info!(id = %created.id, magnitude = created.magnitude, "Created canonical record");
            return Ok(RegisterOutcome {
                record: created,
                disposition: RegisterDisposition::Created,
            });
        };

        let distance_km = matched.distance_km;
        let outcome = apply_merge(matched.record, &report);
        if outcome.updated {
            let saved = self.store.save(outcome.record).await?;
            tracing::info!(
                id = %saved.id,
                distance_km,
                magnitude = saved.magnitude,
                "Merged report into existing record"
            );
            Ok(RegisterOutcome {
                record: saved,
                disposition: RegisterDisposition::Merged,
            })
        } else {
            tracing::info!(
                id = %outcome.record.id,
                distance_km,
                "Duplicate report did not raise magnitude; record unchanged"
            );
            Ok(RegisterOutcome {
                record: outcome.record,
                disposition: RegisterDisposition::Unchanged,
            })
        }
    }

    /// List catalog records, newest origin time first.
    ///
    /// With `last_24_hours` set, restricts to records whose origin time
    /// is within the trailing day.
    pub async fn list(&self, last_24_hours: bool) -> Result<Vec<EarthquakeRecord>, S::Error> {
        let since = if last_24_hours {
            Utc::now().checked_sub_signed(Duration::hours(24))
        } else {
            None
        };
        self.store.list_all(since).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(
        clippy::unwrap_used,
        clippy::float_cmp,
        clippy::arithmetic_side_effects
    )]

    use chrono::TimeZone;
    use serde_json::json;

    use super::*;
    use crate::memory::MemoryStore;

    fn service() -> CatalogService<MemoryStore> {
        CatalogService::new(MemoryStore::new(), DedupConfig::default())
    }

    fn lon_for_km(km: f64) -> f64 {
        km / crate::distance::EARTH_RADIUS_KM.to_radians()
    }

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).single().unwrap()
    }

    fn report(km_east: f64, magnitude: f64, timestamp: DateTime<Utc>) -> EventReport {
        EventReport {
            source_id: String::from("net-a"),
            timestamp,
            latitude: 0.0,
            longitude: lon_for_km(km_east),
            magnitude,
            depth: None,
            additional_data: None,
        }
    }

    #[tokio::test]
    async fn first_report_creates_a_record() {
        let service = service();
        let outcome = service.register(report(0.0, 5.0, base_time())).await.unwrap();
        assert_eq!(outcome.disposition, RegisterDisposition::Created);
        assert_eq!(outcome.record.magnitude, 5.0);
        assert_eq!(service.list(false).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn close_duplicate_merges_and_raises_magnitude() {
        // Scenario A: 10 km and 1 minute apart, 5.0 then 5.5.
        let service = service();
        let first = service.register(report(0.0, 5.0, base_time())).await.unwrap();

        let second = service
            .register(report(10.0, 5.5, base_time() + Duration::minutes(1)))
            .await
            .unwrap();
        assert_eq!(second.disposition, RegisterDisposition::Merged);
        assert_eq!(second.record.id, first.record.id);
        assert_eq!(second.record.magnitude, 5.5);
        assert_eq!(service.list(false).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn magnitude_gap_in_strict_branch_creates_second_record() {
        // Scenario B: same geometry, magnitudes 5.0 then 7.0.
        let service = service();
        service.register(report(0.0, 5.0, base_time())).await.unwrap();

        let outcome = service
            .register(report(10.0, 7.0, base_time() + Duration::minutes(1)))
            .await
            .unwrap();
        assert_eq!(outcome.disposition, RegisterDisposition::Created);
        assert_eq!(service.list(false).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn divergent_magnitudes_merge_with_tight_location() {
        // Scenario C: 20 km and 8 minutes apart, 5.0 then 6.5.
        let service = service();
        let first = service.register(report(0.0, 5.0, base_time())).await.unwrap();

        let outcome = service
            .register(report(20.0, 6.5, base_time() + Duration::minutes(8)))
            .await
            .unwrap();
        assert_eq!(outcome.disposition, RegisterDisposition::Merged);
        assert_eq!(outcome.record.id, first.record.id);
        assert_eq!(outcome.record.magnitude, 6.5);
    }

    #[tokio::test]
    async fn agreeing_magnitudes_merge_at_base_radius() {
        // Scenario D: 45 km and 8 minutes apart, magnitude diff 0.5.
        let service = service();
        let first = service.register(report(0.0, 5.0, base_time())).await.unwrap();

        let outcome = service
            .register(report(45.0, 5.5, base_time() + Duration::minutes(8)))
            .await
            .unwrap();
        assert_eq!(outcome.disposition, RegisterDisposition::Merged);
        assert_eq!(outcome.record.id, first.record.id);
    }

    #[tokio::test]
    async fn lower_magnitude_duplicate_leaves_record_unchanged() {
        // Scenario E.
        let service = service();
        let first = service.register(report(0.0, 6.0, base_time())).await.unwrap();

        let mut lower = report(5.0, 5.0, base_time() + Duration::minutes(1));
        lower.depth = Some(77.0);
        lower.additional_data =
            Some([(String::from("note"), json!("late"))].into_iter().collect());

        let outcome = service.register(lower).await.unwrap();
        assert_eq!(outcome.disposition, RegisterDisposition::Unchanged);
        assert_eq!(outcome.record, first.record);

        let stored = service.list(false).await.unwrap();
        assert_eq!(stored, vec![first.record]);
    }

    #[tokio::test]
    async fn window_is_inclusive_at_both_ends() {
        let service = service();
        // Candidate exactly 10 minutes before the report.
        service.register(report(0.0, 5.0, base_time())).await.unwrap();
        let at_edge = service
            .register(report(5.0, 5.2, base_time() + Duration::minutes(10)))
            .await
            .unwrap();
        assert_eq!(at_edge.disposition, RegisterDisposition::Merged);
    }

    #[tokio::test]
    async fn candidate_outside_window_is_not_considered() {
        let service = service();
        service.register(report(0.0, 5.0, base_time())).await.unwrap();
        let outside = service
            .register(report(5.0, 5.2, base_time() + Duration::seconds(601)))
            .await
            .unwrap();
        assert_eq!(outside.disposition, RegisterDisposition::Created);
    }

    #[tokio::test]
    async fn merges_into_closest_of_two_qualifying_candidates() {
        let service = service();
        let near = service.register(report(5.0, 5.0, base_time())).await.unwrap();
        // Far enough from the first record to stay distinct (strict
        // branch, 35 km radius).
        let far = service.register(report(45.0, 5.0, base_time())).await.unwrap();
        assert_ne!(near.record.id, far.record.id);

        // A report at 27 km qualifies against both candidates (22 km
        // and 18 km away) and must merge into the closer one.
        let outcome = service
            .register(report(27.0, 5.3, base_time() + Duration::minutes(1)))
            .await
            .unwrap();
        assert_eq!(outcome.disposition, RegisterDisposition::Merged);
        assert_eq!(outcome.record.id, far.record.id);
    }

    #[tokio::test]
    async fn list_last_24_hours_filters_old_records() {
        let service = service();
        let now = Utc::now();
        service
            .register(report(0.0, 5.0, now - Duration::days(3)))
            .await
            .unwrap();
        service
            .register(report(300.0, 5.5, now - Duration::hours(1)))
            .await
            .unwrap();

        assert_eq!(service.list(false).await.unwrap().len(), 2);
        let recent = service.list(true).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent.first().unwrap().magnitude, 5.5);
    }

    #[tokio::test]
    async fn list_orders_by_timestamp_descending() {
        let service = service();
        let t = base_time();
        service.register(report(0.0, 5.0, t)).await.unwrap();
        service
            .register(report(300.0, 4.0, t + Duration::hours(2)))
            .await
            .unwrap();
        service
            .register(report(600.0, 6.0, t + Duration::hours(1)))
            .await
            .unwrap();

        let listed = service.list(false).await.unwrap();
        let times: Vec<_> = listed.iter().map(|r| r.timestamp).collect();
        assert_eq!(
            times,
            vec![t + Duration::hours(2), t + Duration::hours(1), t]
        );
    }
}
