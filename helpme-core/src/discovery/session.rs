//! Current search state with change notification.
//!
//! The session publishes a fresh [`SearchContext`] through a
//! `tokio::sync::watch` channel on every accepted change, so list and map
//! views can recompute without polling.

use tokio::sync::watch;
use tracing::debug;

use super::{AppMode, DiscoveryError, SearchContext};
use crate::entities::ServiceCategory;
use crate::geo::{Coordinate, validate_radius};

pub struct DiscoverySession {
    context_tx: watch::Sender<SearchContext>,
    min_radius_km: f64,
    max_radius_km: f64,
}

impl DiscoverySession {
    /// Create a session. The initial radius must lie in
    /// `[min_radius_km, max_radius_km]`.
    pub fn new(
        initial: SearchContext,
        min_radius_km: f64,
        max_radius_km: f64,
    ) -> Result<Self, DiscoveryError> {
        let min_radius_km = validate_radius(min_radius_km)?;
        let max_radius_km = validate_radius(max_radius_km)?;
        check_bounds(initial.radius_km(), min_radius_km, max_radius_km)?;
        let (context_tx, _) = watch::channel(initial);
        Ok(Self {
            context_tx,
            min_radius_km,
            max_radius_km,
        })
    }

    /// Snapshot of the current context.
    pub fn context(&self) -> SearchContext {
        *self.context_tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchContext> {
        self.context_tx.subscribe()
    }

    pub fn set_reference(&self, reference: Coordinate) {
        self.publish(self.context().with_reference(reference));
    }

    /// Change the radius. Out-of-range values are rejected and the current
    /// context is left as it was.
    pub fn set_radius(&self, radius_km: f64) -> Result<(), DiscoveryError> {
        let next = self.context().with_radius(radius_km)?;
        check_bounds(radius_km, self.min_radius_km, self.max_radius_km)?;
        self.publish(next);
        Ok(())
    }

    pub fn set_category(&self, category: Option<ServiceCategory>) {
        self.publish(self.context().with_category(category));
    }

    pub fn set_mode(&self, mode: AppMode) {
        self.publish(self.context().with_mode(mode));
    }

    fn publish(&self, next: SearchContext) {
        debug!(
            reference = %next.reference(),
            radius_km = next.radius_km(),
            category = ?next.category(),
            mode = ?next.mode(),
            "Publishing search context"
        );
        self.context_tx.send_replace(next);
    }
}

fn check_bounds(radius_km: f64, min_km: f64, max_km: f64) -> Result<(), DiscoveryError> {
    if radius_km < min_km || radius_km > max_km {
        return Err(DiscoveryError::RadiusOutOfRange {
            radius_km,
            min_km,
            max_km,
        });
    }
    Ok(())
}
