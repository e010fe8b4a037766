use serde::{Deserialize, Serialize};

use super::GeoError;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point on the globe in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate", into = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

#[derive(Serialize, Deserialize)]
struct RawCoordinate {
    #[serde(alias = "lat")]
    latitude: f64,
    #[serde(alias = "lng")]
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = GeoError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.latitude, raw.longitude)
    }
}

impl From<Coordinate> for RawCoordinate {
    fn from(c: Coordinate) -> Self {
        Self {
            latitude: c.latitude,
            longitude: c.longitude,
        }
    }
}

impl Coordinate {
    /// Build a coordinate, rejecting non-finite or out-of-range values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in kilometres.
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        haversine_km(*self, *other)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// Haversine distance between two coordinates, in kilometres.
///
/// `a` is clamped to `[0, 1]` so rounding near antipodal points never feeds
/// a negative value into `sqrt`.
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lng = (to.longitude - from.longitude).to_radians();
    let a = ((d_lat / 2.0).sin().powi(2)
        + from.latitude.to_radians().cos()
            * to.latitude.to_radians().cos()
            * (d_lng / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paulista() -> Coordinate {
        Coordinate::new(-23.561684, -46.655981).unwrap()
    }

    #[test]
    fn test_known_distance_near_paulista() {
        let provider = Coordinate::new(-23.564, -46.652).unwrap();
        let d = haversine_km(paulista(), provider);
        assert!((d - 0.4806).abs() < 0.001, "distance was {d}");
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        assert_eq!(haversine_km(paulista(), paulista()), 0.0);
        let pole = Coordinate::new(90.0, 180.0).unwrap();
        assert_eq!(haversine_km(pole, pole), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let points = [
            paulista(),
            Coordinate::new(-23.558, -46.660).unwrap(),
            Coordinate::new(51.5074, -0.1278).unwrap(),
            Coordinate::new(35.6762, 139.6503).unwrap(),
            Coordinate::new(-90.0, 0.0).unwrap(),
        ];
        for a in points {
            for b in points {
                assert!(
                    (haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9,
                    "{a} vs {b}"
                );
            }
        }
    }

    #[test]
    fn test_antipodal_points_are_finite() {
        let a = Coordinate::new(0.0, 0.0).unwrap();
        let b = Coordinate::new(0.0, 180.0).unwrap();
        let d = haversine_km(a, b);
        assert!(d.is_finite());
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((d - half_circumference).abs() < 1e-3, "distance was {d}");

        let c = Coordinate::new(-23.561684, -46.655981).unwrap();
        let c_anti = Coordinate::new(23.561684, 133.344019).unwrap();
        assert!(haversine_km(c, c_anti).is_finite());
    }

    #[test]
    fn test_longitude_wrap_across_antimeridian() {
        let west = Coordinate::new(0.0, 179.5).unwrap();
        let east = Coordinate::new(0.0, -179.5).unwrap();
        let d = haversine_km(west, east);
        assert!(d < 112.0 && d > 110.0, "distance was {d}");
    }

    #[test]
    fn test_rejects_invalid_coordinates() {
        assert_eq!(
            Coordinate::new(91.0, 0.0),
            Err(GeoError::InvalidLatitude(91.0))
        );
        assert_eq!(
            Coordinate::new(0.0, -180.5),
            Err(GeoError::InvalidLongitude(-180.5))
        );
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_deserializes_short_and_long_field_names() {
        let short: Coordinate = serde_json::from_str(r#"{"lat":-23.564,"lng":-46.652}"#).unwrap();
        let long: Coordinate =
            serde_json::from_str(r#"{"latitude":-23.564,"longitude":-46.652}"#).unwrap();
        assert_eq!(short, long);
        assert!(serde_json::from_str::<Coordinate>(r#"{"lat":120,"lng":0}"#).is_err());
    }
}
