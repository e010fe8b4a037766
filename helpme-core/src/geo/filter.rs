use super::{Coordinate, GeoError, haversine_km};

/// Anything with a position on the map.
pub trait Located {
    fn location(&self) -> Coordinate;
}

impl Located for Coordinate {
    fn location(&self) -> Coordinate {
        *self
    }
}

impl<T: Located + ?Sized> Located for &T {
    fn location(&self) -> Coordinate {
        (**self).location()
    }
}

/// An entity retained by a radius filter, with its distance from the
/// reference point at the time of filtering.
#[derive(Debug, PartialEq)]
pub struct Nearby<'a, T> {
    pub entity: &'a T,
    pub distance_km: f64,
}

impl<T> Clone for Nearby<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Nearby<'_, T> {}

/// Reject radii that are not finite and strictly positive.
pub fn validate_radius(radius_km: f64) -> Result<f64, GeoError> {
    if radius_km.is_finite() && radius_km > 0.0 {
        Ok(radius_km)
    } else {
        Err(GeoError::InvalidRadius(radius_km))
    }
}

/// Keep the entities whose distance from `reference` is `<= radius_km`.
///
/// The result preserves the input order. Distances are computed fresh on
/// every call.
pub fn filter_by_radius<'a, T: Located>(
    reference: Coordinate,
    radius_km: f64,
    entities: &'a [T],
) -> Result<Vec<Nearby<'a, T>>, GeoError> {
    filter_by_radius_matching(reference, radius_km, entities, |_| true)
}

/// Same as [`filter_by_radius`], additionally requiring `predicate` to hold.
///
/// The predicate runs first so excluded entities never pay for the
/// trigonometry.
pub fn filter_by_radius_matching<'a, T, P>(
    reference: Coordinate,
    radius_km: f64,
    entities: &'a [T],
    predicate: P,
) -> Result<Vec<Nearby<'a, T>>, GeoError>
where
    T: Located,
    P: Fn(&T) -> bool,
{
    let radius_km = validate_radius(radius_km)?;

    Ok(entities
        .iter()
        .filter(|entity| predicate(*entity))
        .filter_map(|entity| {
            let distance_km = haversine_km(reference, entity.location());
            (distance_km <= radius_km).then_some(Nearby {
                entity,
                distance_km,
            })
        })
        .collect())
}
