//! Request payloads for creating and updating meets and races.
//!
//! Field rules are declared with `validator` so the API layer can reject a
//! payload before it reaches the store.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::{Validate, ValidationError};

use crate::enums::{MeetTag, RaceType};
use crate::geo::GeoPoint;
use crate::ids::CrewId;

/// Body of `POST /api/v1/meets` and `PUT /api/v1/meets/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, Validate)]
#[ts(export, export_to = "bindings/")]
pub struct MeetRequest {
    /// Display name.
    #[validate(length(min = 1, max = 64, message = "Name must be 1-64 characters."))]
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    #[validate(length(max = 500, message = "Description must not exceed 500 characters."))]
    pub description: String,
    /// Hosting crew, if any.
    #[serde(default)]
    pub crew_id: Option<CrewId>,
    /// Human-readable venue.
    #[validate(length(min = 1, max = 128, message = "Location must be 1-128 characters."))]
    pub location: String,
    /// `"lat,lon"` string.
    #[validate(custom(function = "validate_coordinates"))]
    pub coordinates: String,
    /// When the meet takes place; must be in the future.
    #[validate(custom(function = "validate_future_date"))]
    pub date: DateTime<Utc>,
    /// Whether the meet is private.
    #[serde(default)]
    pub private: bool,
    /// Descriptive tags; at least one is required.
    #[validate(length(min = 1, message = "At least one tag is required."))]
    pub tags: Vec<MeetTag>,
}

/// Body of `POST /api/v1/races` and `PUT /api/v1/races/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, Validate)]
#[ts(export, export_to = "bindings/")]
pub struct RaceRequest {
    /// Display name.
    #[validate(length(min = 1, max = 64, message = "Name must be 1-64 characters."))]
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    #[validate(length(max = 500, message = "Description must not exceed 500 characters."))]
    pub description: String,
    /// Hosting crew, if any.
    #[serde(default)]
    pub crew_id: Option<CrewId>,
    /// Race format.
    pub race_type: RaceType,
    /// Human-readable venue.
    #[validate(length(min = 1, max = 128, message = "Location must be 1-128 characters."))]
    pub location: String,
    /// `"lat,lon"` string.
    #[validate(custom(function = "validate_coordinates"))]
    pub coordinates: String,
    /// When the race takes place; must be in the future.
    #[validate(custom(function = "validate_future_date"))]
    pub date: DateTime<Utc>,
    /// Whether the race is private.
    #[serde(default)]
    pub private: bool,
}

fn validate_coordinates(value: &str) -> Result<(), ValidationError> {
    value.parse::<GeoPoint>().map(drop).map_err(|e| {
        ValidationError::new("coordinates").with_message(Cow::Owned(format!(
            "Invalid coordinates, expected 'latitude,longitude': {e}"
        )))
    })
}

fn validate_future_date(value: &DateTime<Utc>) -> Result<(), ValidationError> {
    if *value > Utc::now() {
        Ok(())
    } else {
        Err(ValidationError::new("future_date")
            .with_message(Cow::Borrowed("Date must be in the future.")))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn meet_request() -> MeetRequest {
        MeetRequest {
            name: String::from("Friday Night Lights"),
            description: String::from("Bring snacks."),
            crew_id: None,
            location: String::from("Budapest, Hungary"),
            coordinates: String::from("47.4979,19.0402"),
            date: Utc::now() + Duration::days(3),
            private: false,
            tags: vec![MeetTag::Show],
        }
    }

    fn race_request() -> RaceRequest {
        RaceRequest {
            name: String::from("Hungaroring Sprint"),
            description: String::new(),
            crew_id: None,
            race_type: RaceType::Sprint,
            location: String::from("Mogyorod"),
            coordinates: String::from("47.5789,19.2486"),
            date: Utc::now() + Duration::days(10),
            private: false,
        }
    }

    fn failed_fields(result: Result<(), validator::ValidationErrors>) -> Vec<String> {
        let mut fields: Vec<String> = result
            .err()
            .map(|e| e.field_errors().keys().map(ToString::to_string).collect())
            .unwrap_or_default();
        fields.sort();
        fields
    }

    #[test]
    fn valid_meet_request_passes() {
        assert!(meet_request().validate().is_ok());
    }

    #[test]
    fn meet_name_length_is_enforced() {
        let mut req = meet_request();
        req.name = "x".repeat(65);
        assert_eq!(failed_fields(req.validate()), vec!["name"]);

        req.name = String::new();
        assert_eq!(failed_fields(req.validate()), vec!["name"]);
    }

    #[test]
    fn meet_requires_a_tag() {
        let mut req = meet_request();
        req.tags.clear();
        assert_eq!(failed_fields(req.validate()), vec!["tags"]);
    }

    #[test]
    fn meet_rejects_malformed_coordinates() {
        let mut req = meet_request();
        req.coordinates = String::from("somewhere,nice");
        assert_eq!(failed_fields(req.validate()), vec!["coordinates"]);

        req.coordinates = String::from("91,19");
        assert_eq!(failed_fields(req.validate()), vec!["coordinates"]);
    }

    #[test]
    fn past_dates_are_rejected() {
        let mut req = meet_request();
        req.date = Utc::now() - Duration::hours(1);
        assert_eq!(failed_fields(req.validate()), vec!["date"]);

        let mut race = race_request();
        race.date = Utc::now() - Duration::days(1);
        assert_eq!(failed_fields(race.validate()), vec!["date"]);
    }

    #[test]
    fn multiple_failures_are_reported_together() {
        let mut req = meet_request();
        req.location = "y".repeat(129);
        req.description = "z".repeat(501);
        assert_eq!(
            failed_fields(req.validate()),
            vec!["description", "location"]
        );
    }

    #[test]
    fn valid_race_request_passes() {
        assert!(race_request().validate().is_ok());
    }

    #[test]
    fn race_type_must_be_known() {
        let json = serde_json::json!({
            "name": "Night Run",
            "race_type": "Rally",
            "location": "Szeged",
            "coordinates": "46.2530,20.1414",
            "date": "2099-01-01T20:00:00Z",
        });
        assert!(serde_json::from_value::<RaceRequest>(json).is_err());
    }

    #[test]
    fn optional_fields_default_when_absent() {
        let json = serde_json::json!({
            "name": "Night Run",
            "race_type": "Drag",
            "location": "Szeged",
            "coordinates": "46.2530,20.1414",
            "date": "2099-01-01T20:00:00Z",
        });
        let req: Option<RaceRequest> = serde_json::from_value(json).ok();
        assert!(req.as_ref().is_some_and(|r| r.description.is_empty()));
        assert!(req.as_ref().is_some_and(|r| r.crew_id.is_none() && !r.private));
    }
}
