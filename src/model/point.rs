//! Geographic point and the planar chord distance.
//!
//! The distance contract is fixed: a flat-earth chord over
//! `(latitude, longitude)` measured in degrees,
//!
//! ```text
//! d(a, b) = sqrt((a.lat - b.lat)² + (a.lon - b.lon)²)
//! ```
//!
//! It is symmetric, `d(p, p) = 0`, and satisfies the triangle inequality,
//! which is all the Gabriel test and the shortest-path completer rely on.
//! No geodesic correction is applied.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in degrees. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Planar chord distance in degrees.
    #[inline]
    pub fn distance(&self, other: &GeoPoint) -> f64 {
        let dlat = self.lat - other.lat;
        let dlon = self.lon - other.lon;
        (dlat * dlat + dlon * dlon).sqrt()
    }

    /// Midpoint of the segment `self → other`.
    ///
    /// Halves before adding, so it stays finite for any finite pair.
    #[inline]
    pub fn midpoint(&self, other: &GeoPoint) -> GeoPoint {
        GeoPoint {
            lat: self.lat / 2.0 + other.lat / 2.0,
            lon: self.lon / 2.0 + other.lon / 2.0,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// Latitude in [-90, 90] and longitude in [-180, 180].
    pub fn in_geographic_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lat, lon): (f64, f64)) -> Self {
        GeoPoint::new(lat, lon)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}

/// Anything with a position the engine can read.
///
/// Implemented for [`GeoPoint`] itself and for [`Region`](super::Region),
/// so callers can hand their own descriptors to the engine without copying
/// coordinates out first.
pub trait Located {
    fn location(&self) -> GeoPoint;
}

impl Located for GeoPoint {
    fn location(&self) -> GeoPoint {
        *self
    }
}

impl<T: Located + ?Sized> Located for &T {
    fn location(&self) -> GeoPoint {
        (**self).location()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_symmetric_and_zero_on_self() {
        let a = GeoPoint::new(1.0, 2.0);
        let b = GeoPoint::new(4.0, 6.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.distance(&a), 5.0);
        assert_eq!(a.distance(&a), 0.0);
    }

    #[test]
    fn midpoint_is_mean_of_coordinates() {
        let m = GeoPoint::new(0.0, 0.0).midpoint(&GeoPoint::new(2.0, -4.0));
        assert_eq!(m, GeoPoint::new(1.0, -2.0));

        let far = GeoPoint::new(1.5e308, -1.5e308).midpoint(&GeoPoint::new(1.7e308, -1.7e308));
        assert!(far.is_finite());
        assert!(far.lat > 1.5e308 && far.lat < 1.7e308);
    }

    #[test]
    fn range_check() {
        assert!(GeoPoint::new(90.0, -180.0).in_geographic_range());
        assert!(!GeoPoint::new(90.5, 0.0).in_geographic_range());
        assert!(!GeoPoint::new(0.0, 181.0).in_geographic_range());
        assert!(!GeoPoint::new(f64::NAN, 0.0).in_geographic_range());
    }

    #[test]
    fn finiteness() {
        assert!(GeoPoint::new(0.0, 0.0).is_finite());
        assert!(!GeoPoint::new(f64::INFINITY, 0.0).is_finite());
        assert!(!GeoPoint::new(0.0, f64::NAN).is_finite());
    }
}
