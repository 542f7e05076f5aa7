//! Proximity filtering for the Rev-n-Roll platform.
//!
//! Given a reference point, a radius and an optional tag set, the
//! [`ProximityEventFilter`] selects the meets or races that are close
//! enough, share a tag, and have not already happened.
//!
//! The filter is a pure function over records the caller already loaded.
//! It owns no state, does no I/O and performs no authorization: private
//! events are returned like public ones.
//!
//! # Modules
//!
//! - [`distance`] -- Haversine great-circle distance
//! - [`filter`] -- The filter itself
//! - [`error`] -- [`ProximityError`]

pub mod distance;
pub mod error;
pub mod filter;

pub use distance::{EARTH_RADIUS_KM, haversine_km};
pub use error::ProximityError;
pub use filter::{ProximityEventFilter, start_of_day};
