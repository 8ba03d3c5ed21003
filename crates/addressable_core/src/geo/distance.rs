//! Great-circle distance via the spherical law of cosines.
//!
//! One degree of arc is `60 * 1.1515` statute miles.

use crate::geo::coordinates::Coordinates;

const STATUTE_MILES_PER_DEGREE: f64 = 60.0 * 1.1515;
const KILOMETRES_PER_MILE: f64 = 1.609344;
const NAUTICAL_MILES_PER_MILE: f64 = 0.8684;

/// Output unit for distance calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceUnit {
    #[default]
    Miles,
    Kilometres,
    NauticalMiles,
}

impl DistanceUnit {
    /// Maps a unit code case-insensitively: `K`, `N`, anything else miles.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "K" => Self::Kilometres,
            "N" => Self::NauticalMiles,
            _ => Self::Miles,
        }
    }

    /// Single-letter code accepted by [`DistanceUnit::from_code`].
    pub fn code(self) -> &'static str {
        match self {
            Self::Miles => "M",
            Self::Kilometres => "K",
            Self::NauticalMiles => "N",
        }
    }

    fn scale_miles(self, miles: f64) -> f64 {
        match self {
            Self::Miles => miles,
            Self::Kilometres => miles * KILOMETRES_PER_MILE,
            Self::NauticalMiles => miles * NAUTICAL_MILES_PER_MILE,
        }
    }
}

/// Distance between two positions in `unit`.
pub fn great_circle_distance(from: Coordinates, to: Coordinates, unit: DistanceUnit) -> f64 {
    if from == to {
        return 0.0;
    }

    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let theta = (from.lon - to.lon).to_radians();

    // Rounding can push the cosine slightly outside [-1, 1] for near-identical
    // or antipodal points.
    let cosine = (lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * theta.cos()).clamp(-1.0, 1.0);
    let miles = cosine.acos().to_degrees() * STATUTE_MILES_PER_DEGREE;

    unit.scale_miles(miles)
}
