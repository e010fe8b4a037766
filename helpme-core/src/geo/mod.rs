//! Great-circle geometry and radius filtering.
//!
//! Everything here is synchronous and side-effect free, so it can be called
//! from render paths on every tick.

pub mod coordinate;
pub mod filter;

pub use coordinate::{Coordinate, EARTH_RADIUS_KM, haversine_km};
pub use filter::{Located, Nearby, filter_by_radius, filter_by_radius_matching, validate_radius};

use thiserror::Error;

/// Contract violations raised by the geo engine.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeoError {
    #[error("latitude {0} is outside [-90, 90]")]
    InvalidLatitude(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    InvalidLongitude(f64),

    /// Radius must be finite and strictly positive.
    #[error("search radius must be positive, got {0} km")]
    InvalidRadius(f64),
}
