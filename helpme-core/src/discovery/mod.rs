//! Location-filtered discovery for the list and map screens.
//!
//! - [`SearchContext`]: the immutable inputs of one search
//! - [`DiscoverySession`]: holds the current context and notifies watchers
//!   whenever a new one is published
//! - [`Discovery`]: runs a context against a [`CatalogSource`]
//! - [`MapView`]: the marker set handed to the drawing surface

pub mod context;
pub mod map;
pub mod rank;
pub mod session;

pub use context::{AppMode, SearchContext};
pub use map::{MapMarker, MarkerKind, MapView};
pub use session::DiscoverySession;

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::catalog::CatalogSource;
use crate::entities::{
    Listing, LocatedEntity, OpenTask, Provider, ServiceCategory, ServicePackage,
};
use crate::geo::{GeoError, Nearby, filter_by_radius_matching};

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DiscoveryError {
    #[error(transparent)]
    Geo(#[from] GeoError),

    #[error("radius {radius_km} km is outside the allowed range [{min_km}, {max_km}]")]
    RadiusOutOfRange {
        radius_km: f64,
        min_km: f64,
        max_km: f64,
    },
}

/// Results of one search, depending on who is looking.
#[derive(Debug, Clone, PartialEq)]
pub enum DiscoveryResults<'a> {
    /// Client mode: providers offering the selected category.
    Providers(Vec<Nearby<'a, Provider>>),
    /// Executor mode: open tasks waiting for pickup.
    Tasks(Vec<Nearby<'a, OpenTask>>),
}

impl DiscoveryResults<'_> {
    pub fn len(&self) -> usize {
        match self {
            DiscoveryResults::Providers(v) => v.len(),
            DiscoveryResults::Tasks(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Runs searches against a catalog.
pub struct Discovery<C: CatalogSource> {
    catalog: Arc<C>,
}

impl<C: CatalogSource> Clone for Discovery<C> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
        }
    }
}

impl<C: CatalogSource> Discovery<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Providers within radius. With no category selected every provider
    /// qualifies.
    pub fn nearby_providers(
        &self,
        ctx: &SearchContext,
    ) -> Result<Vec<Nearby<'_, Provider>>, GeoError> {
        let category = ctx.category();
        let found = filter_by_radius_matching(
            ctx.reference(),
            ctx.radius_km(),
            self.catalog.providers(),
            |p| category.is_none_or(|c| p.matches_category(c)),
        )?;
        debug!(
            reference = %ctx.reference(),
            radius_km = ctx.radius_km(),
            ?category,
            found = found.len(),
            "Filtered providers"
        );
        Ok(found)
    }

    /// Open tasks within radius, optionally restricted to a category.
    pub fn nearby_tasks(
        &self,
        ctx: &SearchContext,
    ) -> Result<Vec<Nearby<'_, OpenTask>>, GeoError> {
        let category = ctx.category();
        let found = filter_by_radius_matching(
            ctx.reference(),
            ctx.radius_km(),
            self.catalog.open_tasks(),
            |t| category.is_none_or(|c| t.matches_category(c)),
        )?;
        debug!(
            reference = %ctx.reference(),
            radius_km = ctx.radius_km(),
            ?category,
            found = found.len(),
            "Filtered open tasks"
        );
        Ok(found)
    }

    /// Run the search appropriate for the context's mode.
    pub fn search(&self, ctx: &SearchContext) -> Result<DiscoveryResults<'_>, GeoError> {
        match ctx.mode() {
            AppMode::Client => self.nearby_providers(ctx).map(DiscoveryResults::Providers),
            AppMode::Executor => self.nearby_tasks(ctx).map(DiscoveryResults::Tasks),
        }
    }

    /// Highest-rated provider offering `category`, regardless of distance.
    pub fn best_provider_for(&self, category: ServiceCategory) -> Option<&Provider> {
        rank::best_rated(self.catalog.providers().iter().filter(|p| p.offers(category)))
    }

    /// The default package for a category (first in catalog order).
    pub fn default_service_for(&self, category: ServiceCategory) -> Option<&ServicePackage> {
        self.catalog.services().iter().find(|s| s.category == category)
    }

    /// Marker set for the map screen.
    pub fn map_view(&self, ctx: &SearchContext) -> Result<MapView, GeoError> {
        Ok(MapView::from_results(ctx, &self.search(ctx)?))
    }

    /// Resolve a tapped marker back to its entity.
    pub fn select_marker(&self, marker: &MapMarker) -> Option<LocatedEntity<'_>> {
        match marker.kind {
            MarkerKind::Provider => self
                .catalog
                .provider(&marker.id)
                .map(LocatedEntity::Provider),
            MarkerKind::Task => self
                .catalog
                .open_task(&marker.id)
                .map(LocatedEntity::OpenTask),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::geo::Coordinate;

    fn paulista() -> Coordinate {
        Coordinate::new(-23.561684, -46.655981).unwrap()
    }

    fn discovery() -> Discovery<StaticCatalog> {
        Discovery::new(Arc::new(StaticCatalog::builtin()))
    }

    fn ids<T: Listing>(found: &[Nearby<'_, T>]) -> Vec<String> {
        found.iter().map(|n| n.entity.id().to_string()).collect()
    }

    #[test]
    fn test_client_mode_filters_by_category_then_radius() {
        let d = discovery();
        let ctx = SearchContext::new(paulista(), 5.0)
            .unwrap()
            .with_category(Some(ServiceCategory::Pet));
        let found = d.nearby_providers(&ctx).unwrap();
        assert_eq!(ids(&found), vec!["p2", "p3", "p4"]);
        for n in &found {
            assert!(n.distance_km <= 5.0);
        }
    }

    #[test]
    fn test_small_radius_narrows_results() {
        let d = discovery();
        let ctx = SearchContext::new(paulista(), 0.4)
            .unwrap()
            .with_category(Some(ServiceCategory::Queue));
        let found = d.nearby_providers(&ctx).unwrap();
        assert!(found.is_empty(), "got {:?}", ids(&found));

        let ctx = ctx.with_radius(1.0).unwrap();
        assert_eq!(ids(&d.nearby_providers(&ctx).unwrap()), vec!["p1"]);
    }

    #[test]
    fn test_executor_mode_lists_open_tasks() {
        let d = discovery();
        let ctx = SearchContext::new(paulista(), 5.0)
            .unwrap()
            .with_mode(AppMode::Executor);
        match d.search(&ctx).unwrap() {
            DiscoveryResults::Tasks(tasks) => assert_eq!(ids(&tasks), vec!["t1", "t2", "t3"]),
            other => panic!("expected tasks, got {other:?}"),
        }

        let queue_only = ctx.with_category(Some(ServiceCategory::Queue));
        assert_eq!(ids(&d.nearby_tasks(&queue_only).unwrap()), vec!["t1", "t3"]);
    }

    #[test]
    fn test_far_reference_finds_nothing() {
        let d = discovery();
        let rio = Coordinate::new(-22.9068, -43.1729).unwrap();
        let ctx = SearchContext::new(rio, 20.0).unwrap();
        assert!(d.search(&ctx).unwrap().is_empty());
    }

    #[test]
    fn test_best_provider_is_highest_rated_in_category() {
        let d = discovery();
        assert_eq!(d.best_provider_for(ServiceCategory::Pet).unwrap().id, "p4");
        assert_eq!(d.best_provider_for(ServiceCategory::Queue).unwrap().id, "p1");
        assert_eq!(d.default_service_for(ServiceCategory::Pet).unwrap().id, "s3");
    }

    #[test]
    fn test_marker_selection_resolves_entities() {
        let d = discovery();
        let ctx = SearchContext::new(paulista(), 5.0)
            .unwrap()
            .with_category(Some(ServiceCategory::Queue));
        let view = d.map_view(&ctx).unwrap();
        assert_eq!(view.markers.len(), 2);

        let picked = d.select_marker(&view.markers[0]).unwrap();
        assert!(matches!(picked, LocatedEntity::Provider(p) if p.id == "p1"));

        let bogus = MapMarker {
            id: "t99".into(),
            label: String::new(),
            coordinate: paulista(),
            distance_km: 0.0,
            kind: MarkerKind::Task,
        };
        assert!(d.select_marker(&bogus).is_none());
    }
}
