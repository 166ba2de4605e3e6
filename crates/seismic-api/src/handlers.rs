//! REST API endpoint handlers for the catalog server.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `POST` | `/api/earthquakes` | Register an event report |
//! | `GET` | `/api/earthquakes` | List catalog records |
//!
//! Boundary validation happens here: coordinate ranges, a non-empty
//! source id, and a sane magnitude are enforced before a report
//! reaches the engine, which assumes well-formed inputs.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use chrono::{DateTime, Utc};
use seismic_core::{CatalogStore, RegisterDisposition};
use seismic_types::{AdditionalData, EventReport};
use serde::Deserialize;
use validator::Validate;

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request bodies and query parameters
// ---------------------------------------------------------------------------

/// Request body for `POST /api/earthquakes`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterEarthquakeRequest {
    /// Identifier of the reporting seismic network.
    #[validate(length(min = 1, message = "source_id must not be empty"))]
    pub source_id: String,
    /// Origin time of the event.
    pub timestamp: DateTime<Utc>,
    /// Epicenter latitude in decimal degrees.
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    /// Epicenter longitude in decimal degrees.
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    /// Magnitude estimate. The range check doubles as a finiteness
    /// check, since NaN fails any range comparison.
    #[validate(range(min = -10.0, max = 12.0))]
    pub magnitude: f64,
    /// Hypocenter depth in kilometers.
    pub depth: Option<f64>,
    /// Free-form source metadata.
    pub additional_data: Option<AdditionalData>,
}

impl RegisterEarthquakeRequest {
    fn into_report(self) -> EventReport {
        EventReport {
            source_id: self.source_id,
            timestamp: self.timestamp,
            latitude: self.latitude,
            longitude: self.longitude,
            magnitude: self.magnitude,
            depth: self.depth,
            additional_data: self.additional_data,
        }
    }
}

/// Query parameters for `GET /api/earthquakes`.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Restrict the listing to the trailing 24 hours.
    #[serde(default)]
    pub last24h: bool,
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page with API links.
#[allow(clippy::unused_async)]
pub async fn index() -> impl IntoResponse {
    Html(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Seismic Catalog</title>
</head>
<body>
    <h1>Seismic Catalog</h1>
    <p>Deduplicated earthquake catalog.</p>
    <ul>
        <li>POST /api/earthquakes -- register an event report</li>
        <li><a href="/api/earthquakes">/api/earthquakes</a> -- full catalog</li>
        <li><a href="/api/earthquakes?last24h=true">/api/earthquakes?last24h=true</a> -- last 24 hours</li>
    </ul>
</body>
</html>"#,
    )
}

// ---------------------------------------------------------------------------
// POST /api/earthquakes -- register a report
// ---------------------------------------------------------------------------

/// Register an incoming event report against the catalog.
///
/// Returns `201 Created` with the new canonical record when no
/// duplicate was found, or `200 OK` with the (possibly updated)
/// existing record when the report merged into one.
pub async fn register<S: CatalogStore>(
    State(state): State<AppState<S>>,
    Json(body): Json<RegisterEarthquakeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    body.validate()?;

    let outcome = state
        .catalog
        .register(body.into_report())
        .await
        .map_err(|e| ApiError::Store(e.to_string()))?;

    let status = match outcome.disposition {
        RegisterDisposition::Created => StatusCode::CREATED,
        RegisterDisposition::Merged | RegisterDisposition::Unchanged => StatusCode::OK,
    };
    Ok((status, Json(outcome.record)))
}

// ---------------------------------------------------------------------------
// GET /api/earthquakes -- list records
// ---------------------------------------------------------------------------

/// List catalog records, newest origin time first.
///
/// # Query Parameters
///
/// - `last24h`: when `true`, restrict to records from the trailing day.
pub async fn list<S: CatalogStore>(
    State(state): State<AppState<S>>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let records = state
        .catalog
        .list(query.last24h)
        .await
        .map_err(|e| ApiError::Store(e.to_string()))?;
    Ok(Json(records))
}
