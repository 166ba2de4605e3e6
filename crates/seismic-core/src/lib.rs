//! Event deduplication and merge engine for the seismic catalog.
//!
//! The same physical earthquake is frequently reported by several
//! networks with slightly different timestamps, coordinates, and
//! magnitude estimates. This crate decides, for each incoming report,
//! whether it describes an event already in the catalog and how the
//! stored record should change if so.
//!
//! The engine is pure decision logic over explicit inputs. All I/O
//! lives behind the [`CatalogStore`] trait; the `PostgreSQL`
//! implementation is in `seismic-db`, and [`MemoryStore`] backs tests
//! and local development.
//!
//! # Modules
//!
//! - [`config`] -- Tunable classifier thresholds
//! - [`distance`] -- Haversine great-circle distance
//! - [`classify`] -- The adaptive duplicate classifier
//! - [`merge`] -- The monotonic-maximum merge policy
//! - [`catalog`] -- Registration flow and the store seam
//! - [`memory`] -- In-process store for tests

pub mod catalog;
pub mod classify;
pub mod config;
pub mod distance;
pub mod memory;
pub mod merge;

// Re-export primary types for convenience.
pub use catalog::{CatalogService, CatalogStore, RegisterDisposition, RegisterOutcome};
pub use classify::{DuplicateMatch, find_duplicate, is_duplicate, time_difference_minutes};
pub use config::DedupConfig;
pub use distance::{EARTH_RADIUS_KM, haversine_distance_km};
pub use memory::MemoryStore;
pub use merge::{MergeOutcome, apply_merge};
