//! Shared application state for the catalog API server.
//!
//! [`AppState`] wraps the dedup engine behind its store seam. The API
//! layer is generic over the store so the same router serves the
//! `PostgreSQL` store in production and the in-memory store in tests.

use std::sync::Arc;

use seismic_core::{CatalogService, CatalogStore, DedupConfig};

/// Shared state for the Axum application.
///
/// Injected via Axum's `State` extractor. Holds the catalog service,
/// which is stateless per invocation; the only shared resource is the
/// store behind it.
#[derive(Debug)]
pub struct AppState<S> {
    /// The deduplicating catalog engine.
    pub catalog: Arc<CatalogService<S>>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
        }
    }
}

impl<S: CatalogStore> AppState<S> {
    /// Create application state over a store with the given thresholds.
    pub fn new(store: S, config: DedupConfig) -> Self {
        Self {
            catalog: Arc::new(CatalogService::new(store, config)),
        }
    }
}
