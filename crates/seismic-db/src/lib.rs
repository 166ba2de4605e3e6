//! `PostgreSQL` data layer for the seismic catalog.
//!
//! A single `earthquakes` table holds the canonical records. This
//! crate provides the connection pool, schema migrations, and the
//! [`EarthquakeStore`] implementation of the engine's
//! [`CatalogStore`](seismic_core::CatalogStore) seam.
//!
//! # Modules
//!
//! - [`postgres`] -- Connection pool and configuration
//! - [`earthquake_store`] -- Catalog store operations
//! - [`error`] -- Shared error types

pub mod earthquake_store;
pub mod error;
pub mod postgres;

// Re-export primary types for convenience.
pub use earthquake_store::{EarthquakeRow, EarthquakeStore};
pub use error::DbError;
pub use postgres::{PostgresConfig, PostgresPool};
