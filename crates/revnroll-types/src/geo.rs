//! Geographic points and the stored `"lat,lon"` coordinate format.
//!
//! Meets and races persist their position as a single string of the form
//! `"<lat>,<lon>"`. [`GeoPoint::from_str`] is the only parser for that
//! format; both request validation and the proximity filter go through it.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Valid latitude range in degrees.
pub const LATITUDE_RANGE: core::ops::RangeInclusive<f64> = -90.0..=90.0;

/// Valid longitude range in degrees.
pub const LONGITUDE_RANGE: core::ops::RangeInclusive<f64> = -180.0..=180.0;

/// Errors produced when reading a coordinate pair.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoordinateError {
    /// The string has no comma separating latitude from longitude.
    #[error("missing comma in coordinates: {0:?}")]
    MissingSeparator(String),

    /// One half of the pair is not a floating-point number.
    #[error("invalid number in coordinates: {0:?}")]
    InvalidNumber(String),

    /// Latitude outside `[-90, 90]` (or not finite).
    #[error("latitude out of range: {0}")]
    LatitudeOutOfRange(f64),

    /// Longitude outside `[-180, 180]` (or not finite).
    #[error("longitude out of range: {0}")]
    LongitudeOutOfRange(f64),
}

/// A point on the Earth's surface in decimal degrees.
///
/// [`GeoPoint::new`] does not check ranges so that callers can carry
/// user-supplied values to the component that reports the error;
/// [`GeoPoint::try_new`] and the string parser always check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GeoPoint {
    /// Latitude in degrees, positive north.
    pub latitude: f64,
    /// Longitude in degrees, positive east.
    pub longitude: f64,
}

impl GeoPoint {
    /// Build a point without range checks.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build a point, rejecting out-of-range or non-finite values.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !LATITUDE_RANGE.contains(&latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(latitude));
        }
        if !LONGITUDE_RANGE.contains(&longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(longitude));
        }
        Ok(Self::new(latitude, longitude))
    }

    /// Whether both components are within their valid ranges.
    ///
    /// `NaN` is never in range.
    pub fn is_valid(&self) -> bool {
        LATITUDE_RANGE.contains(&self.latitude) && LONGITUDE_RANGE.contains(&self.longitude)
    }
}

impl core::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

impl FromStr for GeoPoint {
    type Err = CoordinateError;

    /// Parse `"<lat>,<lon>"`, splitting on the first comma.
    ///
    /// Whitespace around either number is ignored, so `"47.5, 19.04"` is
    /// accepted even though stored coordinates never contain spaces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| CoordinateError::MissingSeparator(s.to_owned()))?;
        let latitude = parse_component(lat)?;
        let longitude = parse_component(lon)?;
        Self::try_new(latitude, longitude)
    }
}

fn parse_component(raw: &str) -> Result<f64, CoordinateError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_parse| CoordinateError::InvalidNumber(raw.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let point = " 47.5 , 19.04 ".parse::<GeoPoint>().ok();
        assert!(point.is_some_and(|p| close(p.latitude, 47.5) && close(p.longitude, 19.04)));
        assert_eq!(
            "47.5, 19.04".parse::<GeoPoint>().map(|p| p.to_string()).ok(),
            Some(String::from("47.5,19.04"))
        );
    }

    #[test]
    fn parses_lat_lon_pair() {
        let point: GeoPoint = "47.4979,19.0402".parse().unwrap_or(GeoPoint::new(0.0, 0.0));
        assert!(close(point.latitude, 47.4979));
        assert!(close(point.longitude, 19.0402));
    }

    #[test]
    fn parses_negative_components() {
        let point = "-33.8688,-151.2093".parse::<GeoPoint>();
        assert!(point.is_ok());
    }

    #[test]
    fn rejects_malformed_strings() {
        assert!(matches!(
            "not,valid".parse::<GeoPoint>(),
            Err(CoordinateError::InvalidNumber(_))
        ));
        assert!(matches!(
            "47.4979".parse::<GeoPoint>(),
            Err(CoordinateError::MissingSeparator(_))
        ));
        assert!(matches!(
            "".parse::<GeoPoint>(),
            Err(CoordinateError::MissingSeparator(_))
        ));
        // Only the first comma splits; the remainder is not a number.
        assert!(matches!(
            "1,2,3".parse::<GeoPoint>(),
            Err(CoordinateError::InvalidNumber(_))
        ));
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(matches!(
            "95,10".parse::<GeoPoint>(),
            Err(CoordinateError::LatitudeOutOfRange(_))
        ));
        assert!(matches!(
            "10,181".parse::<GeoPoint>(),
            Err(CoordinateError::LongitudeOutOfRange(_))
        ));
        assert!(matches!(
            "NaN,10".parse::<GeoPoint>(),
            Err(CoordinateError::LatitudeOutOfRange(_))
        ));
    }

    #[test]
    fn boundary_values_are_valid() {
        assert!(GeoPoint::try_new(90.0, 180.0).is_ok());
        assert!(GeoPoint::try_new(-90.0, -180.0).is_ok());
        assert!(!GeoPoint::new(90.5, 0.0).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn display_matches_stored_format() {
        let point = GeoPoint::new(46.253, 20.1414);
        assert_eq!(point.to_string(), "46.253,20.1414");
        assert_eq!(point.to_string().parse::<GeoPoint>().ok(), Some(point));
    }
}
