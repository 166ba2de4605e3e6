//! Ingest and query API server for the seismic catalog.
//!
//! This crate provides an Axum HTTP server exposing the two engine
//! operations: registering an incoming event report and listing the
//! catalog. It is the boundary layer: request bodies are validated
//! here (coordinate ranges, non-empty source id) before a report
//! reaches the dedup engine, and engine/store failures are formatted
//! into JSON error responses here.
//!
//! The layer is generic over the engine's store seam, so the same
//! router runs against `PostgreSQL` in production and the in-memory
//! store in tests.
//!
//! # Modules
//!
//! - [`handlers`] -- REST endpoint handlers and request DTOs
//! - [`router`] -- Route assembly with CORS and request tracing
//! - [`server`] -- TCP bind and serve lifecycle
//! - [`state`] -- Shared application state
//! - [`error`] -- HTTP error mapping

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
