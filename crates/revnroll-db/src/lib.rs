//! `PostgreSQL` data layer for the Rev-n-Roll platform.
//!
//! Meets and races live in their own tables with a participants join table
//! each. Proximity queries do not push any predicate into SQL: the
//! [`EventStore`] hands every row of one kind to the caller, which runs the
//! proximity filter in memory.
//!
//! ```text
//! API handlers
//!     |
//!     +-- MeetStore   (create / update / get meets)
//!     +-- RaceStore   (create / update / get races)
//!     +-- EventStore  (list, delete, join, proximity candidates)
//!             |
//!             +-- PostgreSQL (PostgresPool)
//! ```
//!
//! # Modules
//!
//! - [`postgres`] -- Connection pool, configuration and migrations
//! - [`meet_store`] -- Meet persistence
//! - [`race_store`] -- Race persistence
//! - [`event_store`] -- Kind-agnostic operations
//! - [`error`] -- Shared error types

pub mod error;
pub mod event_store;
pub mod meet_store;
pub mod postgres;
pub mod race_store;

// Re-export primary types for convenience.
pub use error::DbError;
pub use event_store::{CandidateRow, EventStore, JoinOutcome, SummaryRow};
pub use meet_store::{MeetRow, MeetStore};
pub use postgres::{PostgresConfig, PostgresPool};
pub use race_store::{RaceRow, RaceStore};
