use serde::{Deserialize, Serialize};

use crate::entities::ServiceCategory;
use crate::geo::{Coordinate, GeoError, validate_radius};

/// Whether the user is hiring (client) or picking up jobs (executor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppMode {
    #[default]
    Client,
    Executor,
}

/// Inputs of a single search.
///
/// Values are never mutated: every `with_*` call returns a fresh context,
/// so results computed from an older one cannot leak into a newer one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchContext {
    reference: Coordinate,
    radius_km: f64,
    category: Option<ServiceCategory>,
    mode: AppMode,
}

impl SearchContext {
    pub fn new(reference: Coordinate, radius_km: f64) -> Result<Self, GeoError> {
        Ok(Self {
            reference,
            radius_km: validate_radius(radius_km)?,
            category: None,
            mode: AppMode::Client,
        })
    }

    pub fn reference(&self) -> Coordinate {
        self.reference
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    pub fn category(&self) -> Option<ServiceCategory> {
        self.category
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn with_reference(&self, reference: Coordinate) -> Self {
        Self { reference, ..*self }
    }

    pub fn with_radius(&self, radius_km: f64) -> Result<Self, GeoError> {
        Ok(Self {
            radius_km: validate_radius(radius_km)?,
            ..*self
        })
    }

    pub fn with_category(&self, category: Option<ServiceCategory>) -> Self {
        Self { category, ..*self }
    }

    pub fn with_mode(&self, mode: AppMode) -> Self {
        Self { mode, ..*self }
    }
}
