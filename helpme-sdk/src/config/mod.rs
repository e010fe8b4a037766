//! Configuration types for Help-Me.
//!
//! These types represent the validated runtime configuration and can be
//! shared across crates. Loading and parsing the TOML file is handled by the
//! binary crate.

mod assistant;
mod discovery;
mod payment;

pub use assistant::{AssistantConfig, DEFAULT_ASSISTANT_MODEL};
pub use discovery::{DEFAULT_CENTER, DiscoveryConfig};
pub use payment::{PaymentConfig, PollingConfig, StatusErrorPolicy};

/// Complete runtime configuration.
#[derive(Debug, Clone)]
pub struct HelpMeConfig {
    pub payment: PaymentConfig,
    pub discovery: DiscoveryConfig,
    /// `None` when no assistant backend is configured; report generation
    /// then always yields the fallback text.
    pub assistant: Option<AssistantConfig>,
    /// Optional JSON catalog replacing the built-in fixtures.
    pub catalog_path: Option<std::path::PathBuf>,
}
