//! Catalog store operations on the `earthquakes` table.
//!
//! [`EarthquakeStore`] is the `PostgreSQL` implementation of the
//! engine's [`CatalogStore`] seam. The store owns record identity
//! (UUID v7, app-generated for index locality) and the audit
//! timestamps (`created_at`/`updated_at`, set by the database).

use chrono::{DateTime, Utc};
use seismic_core::catalog::CatalogStore;
use seismic_types::{EarthquakeId, EarthquakeRecord, EventReport};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbError;
use crate::postgres::PostgresPool;

/// Columns selected for every record-returning query.
const RECORD_COLUMNS: &str = "id, source_id, timestamp, latitude, longitude, magnitude, \
                              depth, additional_data, created_at, updated_at";

/// Operations on the `earthquakes` table.
#[derive(Debug, Clone)]
pub struct EarthquakeStore {
    pool: PgPool,
}

impl EarthquakeStore {
    /// Create a store over an existing connection pool.
    pub fn new(pool: &PostgresPool) -> Self {
        Self {
            pool: pool.pool().clone(),
        }
    }

    /// Create a store directly from a raw [`PgPool`].
    pub const fn from_pg_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CatalogStore for EarthquakeStore {
    type Error = DbError;

    async fn find_in_time_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<EarthquakeRecord>, DbError> {
        let rows = sqlx::query_as::<_, EarthquakeRow>(&format!(
            "SELECT {RECORD_COLUMNS} FROM earthquakes WHERE timestamp >= $1 AND timestamp <= $2"
        ))
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(EarthquakeRow::into_record).collect()
    }

    async fn create(&self, report: EventReport) -> Result<EarthquakeRecord, DbError> {
        let id = EarthquakeId::new();
        let additional_data = report
            .additional_data
            .map(serde_json::Value::Object);

        let row = sqlx::query_as::<_, EarthquakeRow>(&format!(
            r"INSERT INTO earthquakes (id, source_id, timestamp, latitude, longitude, magnitude, depth, additional_data)
              VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
              RETURNING {RECORD_COLUMNS}"
        ))
        .bind(id.into_inner())
        .bind(&report.source_id)
        .bind(report.timestamp)
        .bind(report.latitude)
        .bind(report.longitude)
        .bind(report.magnitude)
        .bind(report.depth)
        .bind(additional_data)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = %id, source_id = report.source_id, "Inserted earthquake record");
        row.into_record()
    }

    async fn save(&self, record: EarthquakeRecord) -> Result<EarthquakeRecord, DbError> {
        let additional_data = record
            .additional_data
            .map(serde_json::Value::Object);

        let row = sqlx::query_as::<_, EarthquakeRow>(&format!(
            r"UPDATE earthquakes
              SET magnitude = $2, depth = $3, additional_data = $4, updated_at = now()
              WHERE id = $1
              RETURNING {RECORD_COLUMNS}"
        ))
        .bind(record.id.into_inner())
        .bind(record.magnitude)
        .bind(record.depth)
        .bind(additional_data)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = %record.id, "Updated earthquake record");
        row.into_record()
    }

    async fn list_all(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<EarthquakeRecord>, DbError> {
        let rows = if let Some(since) = since {
            sqlx::query_as::<_, EarthquakeRow>(&format!(
                "SELECT {RECORD_COLUMNS} FROM earthquakes WHERE timestamp >= $1 ORDER BY timestamp DESC"
            ))
            .bind(since)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, EarthquakeRow>(&format!(
                "SELECT {RECORD_COLUMNS} FROM earthquakes ORDER BY timestamp DESC"
            ))
            .fetch_all(&self.pool)
            .await?
        };

        rows.into_iter().map(EarthquakeRow::into_record).collect()
    }
}

/// A row from the `earthquakes` table.
///
/// Uses runtime types rather than compile-time checked types to avoid
/// requiring a live database during builds.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EarthquakeRow {
    /// Record identifier.
    pub id: Uuid,
    /// Network that first reported the event.
    pub source_id: String,
    /// Origin time of the event.
    pub timestamp: DateTime<Utc>,
    /// Epicenter latitude in decimal degrees.
    pub latitude: f64,
    /// Epicenter longitude in decimal degrees.
    pub longitude: f64,
    /// Highest magnitude estimate seen.
    pub magnitude: f64,
    /// Hypocenter depth in kilometers.
    pub depth: Option<f64>,
    /// Merged free-form metadata.
    pub additional_data: Option<serde_json::Value>,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

impl EarthquakeRow {
    /// Convert a database row into the shared record type.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Serialization`] if the stored JSONB payload
    /// is not an object.
    pub fn into_record(self) -> Result<EarthquakeRecord, DbError> {
        let additional_data = self
            .additional_data
            .map(serde_json::from_value)
            .transpose()?;

        Ok(EarthquakeRecord {
            id: EarthquakeId::from(self.id),
            source_id: self.source_id,
            timestamp: self.timestamp,
            latitude: self.latitude,
            longitude: self.longitude,
            magnitude: self.magnitude,
            depth: self.depth,
            additional_data,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::float_cmp)]

    use serde_json::json;

    use super::*;

    fn sample_row(additional_data: Option<serde_json::Value>) -> EarthquakeRow {
        let now = Utc::now();
        EarthquakeRow {
            id: Uuid::now_v7(),
            source_id: String::from("usgs"),
            timestamp: now,
            latitude: 35.7,
            longitude: 139.7,
            magnitude: 5.2,
            depth: Some(33.0),
            additional_data,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn row_converts_to_record() {
        let row = sample_row(Some(json!({"stations": 12})));
        let id = row.id;
        let record = row.into_record().unwrap();
        assert_eq!(record.id.into_inner(), id);
        assert_eq!(record.magnitude, 5.2);
        let extra = record.additional_data.unwrap();
        assert_eq!(extra.get("stations"), Some(&json!(12)));
    }

    #[test]
    fn null_metadata_converts_to_none() {
        let record = sample_row(None).into_record().unwrap();
        assert!(record.additional_data.is_none());
    }

    #[test]
    fn non_object_metadata_is_rejected() {
        let row = sample_row(Some(json!([1, 2, 3])));
        assert!(matches!(
            row.into_record(),
            Err(DbError::Serialization(_))
        ));
    }
}
