//! REST API for the Rev-n-Roll car-meet platform.
//!
//! Serves CRUD, join and proximity-search endpoints for meets and races.
//! Storage is either `PostgreSQL` (production) or an in-memory catalog
//! (tests), selected through [`Repository`].
//!
//! # Architecture
//!
//! ```text
//! HTTP client --> Axum Router --> meets / races handlers
//!                                    |
//!                                    +--> Repository (Postgres | Memory)
//!                                    +--> ProximityEventFilter (nearby)
//! ```
//!
//! # Modules
//!
//! - [`config`] -- Layered settings (file, environment)
//! - [`state`] -- Shared application state
//! - [`repository`] -- Storage backends
//! - [`caller`] -- Caller identity extractor
//! - [`handlers`] -- Health probe and shared list / nearby logic
//! - [`meets`] / [`races`] -- Endpoint handlers
//! - [`router`] -- Axum router construction
//! - [`server`] -- Server lifecycle
//! - [`extract`] -- Extractors rejecting with [`ApiError`]
//! - [`error`] -- API error types

pub mod caller;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod meets;
pub mod races;
pub mod repository;
pub mod router;
pub mod server;
pub mod state;

pub use config::{ConfigError, DatabaseSettings, LoggingSettings, ServerSettings, Settings};
pub use error::ApiError;
pub use repository::{MemoryCatalog, Repository};
pub use router::build_router;
pub use server::{ServerError, start_server};
pub use state::AppState;
