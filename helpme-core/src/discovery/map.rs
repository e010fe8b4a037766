//! Data handed to the map drawing surface.

use compact_str::CompactString;
use serde::Serialize;

use super::{DiscoveryResults, SearchContext};
use crate::geo::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Provider,
    Task,
}

/// One interactive pin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub id: CompactString,
    pub label: String,
    pub coordinate: Coordinate,
    pub distance_km: f64,
    pub kind: MarkerKind,
}

/// Everything the drawing surface needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: Coordinate,
    /// Radius of the highlight circle around `center`, in metres.
    pub highlight_radius_m: f64,
    pub markers: Vec<MapMarker>,
}

impl MapView {
    pub fn from_results(ctx: &SearchContext, results: &DiscoveryResults<'_>) -> Self {
        let markers = match results {
            DiscoveryResults::Providers(found) => found
                .iter()
                .map(|n| MapMarker {
                    id: n.entity.id.clone(),
                    label: n.entity.name.clone(),
                    coordinate: n.entity.location,
                    distance_km: n.distance_km,
                    kind: MarkerKind::Provider,
                })
                .collect(),
            DiscoveryResults::Tasks(found) => found
                .iter()
                .map(|n| MapMarker {
                    id: n.entity.id.clone(),
                    label: n.entity.description.clone(),
                    coordinate: n.entity.location,
                    distance_km: n.distance_km,
                    kind: MarkerKind::Task,
                })
                .collect(),
        };

        Self {
            center: ctx.reference(),
            highlight_radius_m: ctx.radius_km() * 1000.0,
            markers,
        }
    }
}
