//! Shared type definitions for the seismic catalog.
//!
//! This crate is the single source of truth for the data model used
//! across the workspace: the incoming report shape, the persisted
//! canonical record, and the typed identifiers.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for entity identifiers
//! - [`structs`] -- The [`EventReport`] and [`EarthquakeRecord`] entities

pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use ids::EarthquakeId;
pub use structs::{AdditionalData, EarthquakeRecord, EventReport};
