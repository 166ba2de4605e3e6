//! In-process catalog store for tests and local development.
//!
//! [`MemoryStore`] keeps records in a mutex-guarded `Vec` and mirrors
//! the semantics the `PostgreSQL` store provides: inclusive time-range
//! queries, store-assigned identifiers and audit timestamps, and
//! descending-by-origin-time listing.

use std::convert::Infallible;

use chrono::{DateTime, Utc};
use seismic_types::{EarthquakeId, EarthquakeRecord, EventReport};
use tokio::sync::Mutex;

use crate::catalog::CatalogStore;

/// An in-memory [`CatalogStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<EarthquakeRecord>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub const fn new() -> Self {
        Self {
            records: Mutex::const_new(Vec::new()),
        }
    }

    /// Number of records currently held.
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

impl CatalogStore for MemoryStore {
    type Error = Infallible;

    async fn find_in_time_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<EarthquakeRecord>, Infallible> {
        let records = self.records.lock().await;
        Ok(records
            .iter()
            .filter(|r| r.timestamp >= start && r.timestamp <= end)
            .cloned()
            .collect())
    }

    async fn create(&self, report: EventReport) -> Result<EarthquakeRecord, Infallible> {
        let record = EarthquakeRecord::from_report(report, EarthquakeId::new(), Utc::now());
        self.records.lock().await.push(record.clone());
        Ok(record)
    }

    async fn save(&self, mut record: EarthquakeRecord) -> Result<EarthquakeRecord, Infallible> {
        record.updated_at = Utc::now();
        let mut records = self.records.lock().await;
        if let Some(stored) = records.iter_mut().find(|r| r.id == record.id) {
            *stored = record.clone();
        } else {
            // Unknown id: treat as an upsert, matching the Postgres
            // store's save-by-id semantics as closely as possible.
            records.push(record.clone());
        }
        Ok(record)
    }

    async fn list_all(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<EarthquakeRecord>, Infallible> {
        let records = self.records.lock().await;
        let mut listed: Vec<EarthquakeRecord> = records
            .iter()
            .filter(|r| since.is_none_or(|s| r.timestamp >= s))
            .cloned()
            .collect();
        listed.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(listed)
    }
}
