//! Ordering helpers. The radius filter keeps catalog order; screens that
//! want a different order re-sort here.

use itertools::Itertools;

use crate::entities::Provider;
use crate::geo::Nearby;

/// Nearest first. Ties keep their input order.
pub fn by_distance<'a, T>(found: Vec<Nearby<'a, T>>) -> Vec<Nearby<'a, T>> {
    found
        .into_iter()
        .sorted_by(|a, b| a.distance_km.total_cmp(&b.distance_km))
        .collect()
}

/// Best rated first, then nearest.
pub fn by_rating(found: Vec<Nearby<'_, Provider>>) -> Vec<Nearby<'_, Provider>> {
    found
        .into_iter()
        .sorted_by(|a, b| {
            b.entity
                .rating
                .total_cmp(&a.entity.rating)
                .then(a.distance_km.total_cmp(&b.distance_km))
        })
        .collect()
}

/// Highest rating; the first one wins a tie.
pub fn best_rated<'a>(providers: impl Iterator<Item = &'a Provider>) -> Option<&'a Provider> {
    providers.fold(None, |best: Option<&Provider>, p| match best {
        Some(b) if b.rating >= p.rating => Some(b),
        _ => Some(p),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogSource, StaticCatalog};
    use crate::geo::{Coordinate, filter_by_radius};

    fn ids<'a>(found: &'a [Nearby<'a, Provider>]) -> Vec<&'a str> {
        found.iter().map(|n| n.entity.id.as_str()).collect()
    }

    #[test]
    fn test_sort_orders() {
        let catalog = StaticCatalog::builtin();
        let reference = Coordinate::new(-23.561684, -46.655981).unwrap();
        let found = filter_by_radius(reference, 5.0, catalog.providers()).unwrap();
        assert_eq!(ids(&found), vec!["p1", "p2", "p3", "p4"]);

        let nearest = by_distance(found.clone());
        assert_eq!(ids(&nearest), vec!["p4", "p1", "p2", "p3"]);
        assert!(nearest.windows(2).all(|w| w[0].distance_km <= w[1].distance_km));

        let best = by_rating(found);
        assert_eq!(ids(&best), vec!["p4", "p2", "p1", "p3"]);
    }

    #[test]
    fn test_best_rated_prefers_first_on_tie() {
        let catalog = StaticCatalog::builtin();
        let mut providers = catalog.providers().to_vec();
        providers[1].rating = 5.0;
        let best = best_rated(providers.iter()).unwrap();
        assert_eq!(best.id, "p2");
        assert!(best_rated(std::iter::empty()).is_none());
    }
}
