//! Shared type definitions for the Rev-n-Roll platform.
//!
//! This crate is the single source of truth for the types used across the
//! workspace. Types flow downstream to `TypeScript` via `ts-rs` for the
//! Angular SPA.
//!
//! # Modules
//!
//! - [`ids`] -- Integer id wrappers for meets, races, users and crews
//! - [`enums`] -- Event kind, meet tags and race types
//! - [`geo`] -- [`GeoPoint`] and the stored `"lat,lon"` format
//! - [`structs`] -- Meets, races, summaries and proximity filter input
//! - [`requests`] -- Validated create/update payloads

pub mod enums;
pub mod geo;
pub mod ids;
pub mod requests;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{EventKind, MeetTag, RaceType, UnknownVariant};
pub use geo::{CoordinateError, GeoPoint};
pub use ids::{CrewId, MeetId, RaceId, UserId};
pub use requests::{MeetRequest, RaceRequest};
pub use structs::{DEFAULT_RADIUS_KM, EventRecord, EventSummary, Meet, ProximityQuery, Race};
