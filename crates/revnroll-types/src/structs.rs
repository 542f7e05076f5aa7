//! Core entity structs: meets, races, and the flattened records consumed by
//! the proximity filter.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{EventKind, MeetTag, RaceType};
use crate::geo::{CoordinateError, GeoPoint};
use crate::ids::{CrewId, MeetId, RaceId, UserId};

/// Radius used by proximity queries that do not specify one.
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

// ---------------------------------------------------------------------------
// Meet
// ---------------------------------------------------------------------------

/// A casual car gathering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Meet {
    /// Store-assigned identifier.
    pub id: MeetId,
    /// Display name (at most 64 characters).
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// User who created the meet.
    pub creator_id: UserId,
    /// Hosting crew, if any.
    pub crew_id: Option<CrewId>,
    /// Human-readable venue (at most 128 characters).
    pub location: String,
    /// Stored `"lat,lon"` string.
    pub coordinates: String,
    /// When the meet takes place.
    pub date: DateTime<Utc>,
    /// Whether the meet is private.
    pub private: bool,
    /// Descriptive tags.
    pub tags: Vec<MeetTag>,
    /// Users who joined, in join order.
    pub participants: Vec<UserId>,
}

// ---------------------------------------------------------------------------
// Race
// ---------------------------------------------------------------------------

/// A competitive timed event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Race {
    /// Store-assigned identifier.
    pub id: RaceId,
    /// Display name (at most 64 characters).
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// User who created the race.
    pub creator_id: UserId,
    /// Hosting crew, if any.
    pub crew_id: Option<CrewId>,
    /// Race format.
    pub race_type: RaceType,
    /// Human-readable venue (at most 128 characters).
    pub location: String,
    /// Stored `"lat,lon"` string.
    pub coordinates: String,
    /// When the race takes place.
    pub date: DateTime<Utc>,
    /// Whether the race is private.
    pub private: bool,
    /// Users who joined, in join order.
    pub participants: Vec<UserId>,
}

// ---------------------------------------------------------------------------
// Summaries
// ---------------------------------------------------------------------------

/// Compact listing entry shared by meets and races.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EventSummary {
    /// Meet or race id.
    #[ts(type = "number")]
    pub id: i64,
    /// Display name.
    pub name: String,
    /// When the event takes place.
    pub date: DateTime<Utc>,
    /// Whether the event is private.
    pub private: bool,
    /// `true` for meets, `false` for races.
    pub is_meet: bool,
}

// ---------------------------------------------------------------------------
// Proximity filter input
// ---------------------------------------------------------------------------

/// One candidate row handed to the proximity filter.
///
/// Coordinates stay in their stored string form; the filter parses them
/// per record and drops the record if they are malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Meet or race id.
    pub id: i64,
    /// Meet or race.
    pub kind: EventKind,
    /// Display name.
    pub name: String,
    /// Stored `"lat,lon"` string.
    pub coordinates: String,
    /// When the event takes place (UTC).
    pub occurs_at: DateTime<Utc>,
    /// Whether the event is private.
    pub private: bool,
    /// Tag names. Always empty for races.
    pub tags: BTreeSet<String>,
}

impl EventRecord {
    /// Parse the stored coordinates.
    pub fn location(&self) -> Result<GeoPoint, CoordinateError> {
        self.coordinates.parse()
    }

    /// Project the record into a listing entry.
    pub fn summary(&self) -> EventSummary {
        EventSummary {
            id: self.id,
            name: self.name.clone(),
            date: self.occurs_at,
            private: self.private,
            is_meet: self.kind == EventKind::Meet,
        }
    }
}

impl From<&Meet> for EventRecord {
    fn from(meet: &Meet) -> Self {
        Self {
            id: meet.id.into_inner(),
            kind: EventKind::Meet,
            name: meet.name.clone(),
            coordinates: meet.coordinates.clone(),
            occurs_at: meet.date,
            private: meet.private,
            tags: meet.tags.iter().map(|t| t.as_str().to_owned()).collect(),
        }
    }
}

impl From<&Race> for EventRecord {
    fn from(race: &Race) -> Self {
        Self {
            id: race.id.into_inner(),
            kind: EventKind::Race,
            name: race.name.clone(),
            coordinates: race.coordinates.clone(),
            occurs_at: race.date,
            private: race.private,
            tags: BTreeSet::new(),
        }
    }
}

/// A proximity search: center, radius and optional tag filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProximityQuery {
    /// Reference point. Not range-checked until the filter runs.
    pub center: GeoPoint,
    /// Search radius in kilometers; must be strictly positive.
    pub radius_km: f64,
    /// Requested tag names. Empty means no tag filter.
    pub tags: BTreeSet<String>,
}

impl ProximityQuery {
    /// Query around `center` with the default radius and no tag filter.
    pub const fn new(center: GeoPoint) -> Self {
        Self {
            center,
            radius_km: DEFAULT_RADIUS_KM,
            tags: BTreeSet::new(),
        }
    }

    /// Set the search radius.
    #[must_use]
    pub const fn with_radius_km(mut self, radius_km: f64) -> Self {
        self.radius_km = radius_km;
        self
    }

    /// Set the requested tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn sample_meet() -> Meet {
        Meet {
            id: MeetId(3),
            name: String::from("Sunday Cruise"),
            description: String::new(),
            creator_id: UserId(1),
            crew_id: None,
            location: String::from("Heroes' Square"),
            coordinates: String::from("47.5149,19.0779"),
            date: Utc.with_ymd_and_hms(2030, 5, 1, 18, 0, 0).single().unwrap_or_default(),
            private: false,
            tags: vec![MeetTag::Show, MeetTag::Street],
            participants: Vec::new(),
        }
    }

    #[test]
    fn meet_record_carries_tag_names() {
        let record = EventRecord::from(&sample_meet());
        assert_eq!(record.kind, EventKind::Meet);
        assert!(record.tags.contains("Show"));
        assert!(record.tags.contains("Street"));
        assert_eq!(record.tags.len(), 2);
    }

    #[test]
    fn race_record_is_tagless() {
        let race = Race {
            id: RaceId(9),
            name: String::from("Quarter Mile"),
            description: String::new(),
            creator_id: UserId(1),
            crew_id: None,
            race_type: RaceType::Drag,
            location: String::from("Airfield"),
            coordinates: String::from("47.0,19.0"),
            date: Utc::now(),
            private: true,
            participants: Vec::new(),
        };
        let record = EventRecord::from(&race);
        assert_eq!(record.kind, EventKind::Race);
        assert!(record.tags.is_empty());
        assert!(!record.summary().is_meet);
    }

    #[test]
    fn summary_projects_listing_fields() {
        let meet = sample_meet();
        let summary = EventRecord::from(&meet).summary();
        assert_eq!(summary.id, 3);
        assert_eq!(summary.name, "Sunday Cruise");
        assert_eq!(summary.date, meet.date);
        assert!(summary.is_meet);
    }

    #[test]
    fn query_defaults_to_ten_km_without_tags() {
        let query = ProximityQuery::new(GeoPoint::new(47.4979, 19.0402));
        assert!((query.radius_km - 10.0).abs() < f64::EPSILON);
        assert!(query.tags.is_empty());

        let tagged = query.with_tags(["Drift"]).with_radius_km(25.0);
        assert!(tagged.tags.contains("Drift"));
        assert!((tagged.radius_km - 25.0).abs() < f64::EPSILON);
    }
}
