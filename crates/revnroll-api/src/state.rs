//! Shared application state for the API server.
//!
//! [`AppState`] bundles the storage backend with the proximity filter.
//! It is wrapped in an [`Arc`](std::sync::Arc) and handed to every handler
//! through Axum's `State` extractor.

use revnroll_db::PostgresPool;
use revnroll_proximity::ProximityEventFilter;

use crate::repository::Repository;

/// Shared state for the Axum application.
#[derive(Clone)]
pub struct AppState {
    /// Where meets and races are stored.
    pub repository: Repository,
    /// Filter applied by the `nearby` endpoints.
    pub filter: ProximityEventFilter,
}

impl AppState {
    /// State backed by the given repository and the system clock.
    pub const fn new(repository: Repository) -> Self {
        Self {
            repository,
            filter: ProximityEventFilter::new(),
        }
    }

    /// State backed by `PostgreSQL`.
    pub const fn postgres(pool: PostgresPool) -> Self {
        Self::new(Repository::Postgres(pool))
    }

    /// State backed by an empty in-memory catalog.
    pub fn in_memory() -> Self {
        Self::new(Repository::in_memory())
    }

    /// Replace the proximity filter (e.g. one with a fixed clock).
    #[must_use]
    pub const fn with_filter(mut self, filter: ProximityEventFilter) -> Self {
        self.filter = filter;
        self
    }
}
