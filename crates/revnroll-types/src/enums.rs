//! Enumeration types for the Rev-n-Roll platform.
//!
//! Variant names double as the stored and wire representation, so the
//! `as_str` / `FromStr` pairs below must stay in sync with the serde names.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Event kind
// ---------------------------------------------------------------------------

/// Discriminates the two event classes on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum EventKind {
    /// A casual, non-competitive gathering. Carries tags.
    Meet,
    /// A competitive timed event. Never carries tags.
    Race,
}

impl EventKind {
    /// Lowercase name used in routes and log fields.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Meet => "meet",
            Self::Race => "race",
        }
    }
}

impl core::fmt::Display for EventKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Meet tags
// ---------------------------------------------------------------------------

/// Descriptive tag attached to a meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum MeetTag {
    /// Drifting sessions.
    Drift,
    /// Car shows.
    Show,
    /// Off-road driving.
    Offroad,
    /// Street cruising.
    Street,
    /// Track days.
    Track,
}

impl MeetTag {
    /// Every tag, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Drift,
        Self::Show,
        Self::Offroad,
        Self::Street,
        Self::Track,
    ];

    /// The tag's canonical name, as stored and as matched by proximity queries.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Drift => "Drift",
            Self::Show => "Show",
            Self::Offroad => "Offroad",
            Self::Street => "Street",
            Self::Track => "Track",
        }
    }
}

impl core::fmt::Display for MeetTag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeetTag {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Race types
// ---------------------------------------------------------------------------

/// Format of a race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum RaceType {
    /// Straight-line acceleration.
    Drag,
    /// Multiple laps of a closed course.
    Circuit,
    /// Point-to-point run.
    Sprint,
}

impl RaceType {
    /// The race type's canonical stored name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Drag => "Drag",
            Self::Circuit => "Circuit",
            Self::Sprint => "Sprint",
        }
    }
}

impl core::fmt::Display for RaceType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RaceType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Drag" => Ok(Self::Drag),
            "Circuit" => Ok(Self::Circuit),
            "Sprint" => Ok(Self::Sprint),
            other => Err(UnknownVariant(other.to_owned())),
        }
    }
}

/// A stored string did not name any variant of the target enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown variant: {0}")]
pub struct UnknownVariant(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meet_tag_names_match_serde() {
        for tag in MeetTag::ALL {
            let json = serde_json::to_string(&tag).unwrap_or_default();
            assert_eq!(json, format!("\"{}\"", tag.as_str()));
            assert_eq!(tag.as_str().parse::<MeetTag>().ok(), Some(tag));
        }
    }

    #[test]
    fn meet_tag_parse_is_case_sensitive() {
        assert!("drift".parse::<MeetTag>().is_err());
        assert!("Drifting".parse::<MeetTag>().is_err());
    }

    #[test]
    fn race_type_roundtrips_through_stored_name() {
        for rt in [RaceType::Drag, RaceType::Circuit, RaceType::Sprint] {
            assert_eq!(rt.as_str().parse::<RaceType>().ok(), Some(rt));
        }
        assert_eq!(
            "Rally".parse::<RaceType>(),
            Err(UnknownVariant(String::from("Rally")))
        );
    }

    #[test]
    fn event_kind_display_is_lowercase() {
        assert_eq!(EventKind::Meet.to_string(), "meet");
        assert_eq!(EventKind::Race.to_string(), "race");
    }
}
