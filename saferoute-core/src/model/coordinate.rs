//! Validated geographic coordinates

use std::fmt;

use geo::{Coord, Distance, Geodesic, Point};

use crate::Error;

/// A (latitude, longitude) pair in decimal degrees.
///
/// Values are checked on construction, so every `Coordinate` in the crate is
/// finite and within geographic range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    geometry: Point<f64>,
}

impl Coordinate {
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if either value is not finite or lies
    /// outside `[-90, 90]` / `[-180, 180]`.
    pub fn new(lat: f64, lng: f64) -> Result<Self, Error> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(Error::InvalidInput(format!(
                "latitude {lat} is outside [-90, 90]"
            )));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(Error::InvalidInput(format!(
                "longitude {lng} is outside [-180, 180]"
            )));
        }

        Ok(Self {
            geometry: Point::new(lng, lat),
        })
    }

    pub fn lat(&self) -> f64 {
        self.geometry.y()
    }

    pub fn lng(&self) -> f64 {
        self.geometry.x()
    }

    pub fn geometry(&self) -> Point<f64> {
        self.geometry
    }

    /// Geodesic distance on the WGS-84 ellipsoid, in kilometers
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        Geodesic.distance(self.geometry, other.geometry) / 1000.0
    }

    /// Bit pattern of both components, used for hashing cache keys
    pub(crate) fn to_bits(self) -> (u64, u64) {
        (self.lat().to_bits(), self.lng().to_bits())
    }
}

impl TryFrom<(f64, f64)> for Coordinate {
    type Error = Error;

    fn try_from((lat, lng): (f64, f64)) -> Result<Self, Self::Error> {
        Coordinate::new(lat, lng)
    }
}

impl From<Coordinate> for Coord<f64> {
    fn from(value: Coordinate) -> Self {
        value.geometry.into()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat(), self.lng())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_range_boundaries() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range_and_non_finite() {
        assert!(matches!(
            Coordinate::new(90.5, 0.0),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            Coordinate::new(0.0, -180.01),
            Err(Error::InvalidInput(_))
        ));
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn stores_lat_lng_in_geo_order() {
        let c = Coordinate::new(28.6139, 77.2090).unwrap();
        assert_eq!(c.geometry().x(), 77.2090);
        assert_eq!(c.geometry().y(), 28.6139);
    }

    #[test]
    fn distance_is_symmetric_and_plausible() {
        let a = Coordinate::new(28.6139, 77.2090).unwrap();
        let b = Coordinate::new(28.6129, 77.2295).unwrap();

        let ab = a.distance_km(&b);
        let ba = b.distance_km(&a);
        assert!((ab - ba).abs() < 1e-9);
        // Roughly 2 km across central Delhi
        assert!(ab > 1.9 && ab < 2.1, "unexpected distance {ab}");
        assert!(a.distance_km(&a).abs() < 1e-9);
    }
}
