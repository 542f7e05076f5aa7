//! The proximity filter over meets and races.
//!
//! A candidate is kept when all three predicates hold:
//!
//! 1. Its haversine distance to the query center is at most the radius
//!    (inclusive).
//! 2. The query has no tags, or the candidate shares at least one tag with
//!    it. Tagless candidates (races) never satisfy a non-empty tag filter.
//! 3. It occurs no earlier than the start of the current UTC day.
//!
//! Candidate order is preserved. The filter does not rank by distance.

use chrono::{DateTime, NaiveTime, Utc};
use revnroll_types::{EventRecord, ProximityQuery};
use tracing::{debug, trace};

use crate::distance::haversine_km;
use crate::error::ProximityError;

/// Source of the current time.
pub type Clock = fn() -> DateTime<Utc>;

/// Stateless filter selecting events near a point.
///
/// Safe to share between tasks; every call works on local state only.
#[derive(Debug, Clone, Copy)]
pub struct ProximityEventFilter {
    clock: Clock,
}

impl ProximityEventFilter {
    /// Filter using the system clock.
    pub const fn new() -> Self {
        Self { clock: Utc::now }
    }

    /// Filter using a custom clock, e.g. a fixed instant in tests.
    pub const fn with_clock(clock: Clock) -> Self {
        Self { clock }
    }

    /// Return the candidates matching `query`, in their original order.
    ///
    /// The query is validated before any candidate is looked at. The clock
    /// is read once, so every candidate is judged against the same
    /// start-of-day cutoff.
    ///
    /// # Errors
    ///
    /// Returns [`ProximityError::InvalidQuery`] if the center is outside
    /// the valid latitude/longitude ranges or the radius is not a strictly
    /// positive finite number.
    pub fn filter(
        &self,
        query: &ProximityQuery,
        candidates: Vec<EventRecord>,
    ) -> Result<Vec<EventRecord>, ProximityError> {
        validate_query(query)?;

        let cutoff = start_of_day((self.clock)());
        let total = candidates.len();

        let matched: Vec<EventRecord> = candidates
            .into_iter()
            .filter(|record| matches(query, record, cutoff))
            .collect();

        debug!(
            center = %query.center,
            radius_km = query.radius_km,
            tags = query.tags.len(),
            total,
            matched = matched.len(),
            "Proximity filter applied"
        );

        Ok(matched)
    }
}

impl Default for ProximityEventFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// Midnight UTC of the day containing `now`.
pub fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(NaiveTime::MIN).and_utc()
}

fn validate_query(query: &ProximityQuery) -> Result<(), ProximityError> {
    if !query.center.is_valid() {
        return Err(ProximityError::InvalidQuery(format!(
            "center out of range: latitude {}, longitude {}",
            query.center.latitude, query.center.longitude
        )));
    }
    if !(query.radius_km.is_finite() && query.radius_km > 0.0) {
        return Err(ProximityError::InvalidQuery(format!(
            "radius must be a positive number of kilometers, got {}",
            query.radius_km
        )));
    }
    Ok(())
}

fn matches(query: &ProximityQuery, record: &EventRecord, cutoff: DateTime<Utc>) -> bool {
    let location = match record.location() {
        Ok(point) => point,
        Err(e) => {
            trace!(
                kind = %record.kind,
                id = record.id,
                coordinates = %record.coordinates,
                error = %e,
                "Skipping event with unparseable coordinates"
            );
            return false;
        }
    };

    haversine_km(location, query.center) <= query.radius_km
        && (query.tags.is_empty() || !query.tags.is_disjoint(&record.tags))
        && record.occurs_at >= cutoff
}
