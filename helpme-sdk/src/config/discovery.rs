//! Discovery configuration.

/// Default reference point: Av. Paulista, São Paulo.
pub const DEFAULT_CENTER: (f64, f64) = (-23.561684, -46.655981);

/// Geo search defaults with runtime values.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryConfig {
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub default_radius_km: f64,
    /// Bounds of the radius slider.
    pub min_radius_km: f64,
    pub max_radius_km: f64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            center_latitude: DEFAULT_CENTER.0,
            center_longitude: DEFAULT_CENTER.1,
            default_radius_km: 5.0,
            min_radius_km: 1.0,
            max_radius_km: 20.0,
        }
    }
}
