//! TOML file configuration structures.
//!
//! These structs directly map to the `helpme-config.toml` file format.

use helpme_sdk::config::{DEFAULT_ASSISTANT_MODEL, DEFAULT_CENTER, StatusErrorPolicy};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub payment: PaymentConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub assistant: Option<AssistantConfig>,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Payment backend section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfig {
    /// Root URL hosting the `create-pix` and `check-payment` functions.
    pub base_url: Url,
    pub api_key: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    #[serde(default)]
    pub status_error_policy: StatusErrorPolicy,
    #[serde(default)]
    pub polling: PollingConfig,
}

fn default_request_timeout_secs() -> u64 {
    15
}

fn default_settle_delay_ms() -> u64 {
    2000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_initial_interval_ms")]
    pub initial_interval_ms: u64,
    #[serde(default = "default_max_interval_ms")]
    pub max_interval_ms: u64,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_initial_interval_ms() -> u64 {
    2000
}

fn default_max_interval_ms() -> u64 {
    30_000
}

fn default_max_attempts() -> u32 {
    20
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            initial_interval_ms: default_initial_interval_ms(),
            max_interval_ms: default_max_interval_ms(),
            max_attempts: default_max_attempts(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CenterConfig {
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for CenterConfig {
    fn default() -> Self {
        Self {
            latitude: DEFAULT_CENTER.0,
            longitude: DEFAULT_CENTER.1,
        }
    }
}

/// Discovery section: where searches start and how far they may reach.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    #[serde(default)]
    pub center: CenterConfig,
    #[serde(default = "default_radius_km")]
    pub default_radius_km: f64,
    #[serde(default = "default_min_radius_km")]
    pub min_radius_km: f64,
    #[serde(default = "default_max_radius_km")]
    pub max_radius_km: f64,
}

fn default_radius_km() -> f64 {
    5.0
}

fn default_min_radius_km() -> f64 {
    1.0
}

fn default_max_radius_km() -> f64 {
    20.0
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            center: CenterConfig::default(),
            default_radius_km: default_radius_km(),
            min_radius_km: default_min_radius_km(),
            max_radius_km: default_max_radius_km(),
        }
    }
}

/// Text-generation assistant. Reports and advice are unavailable without it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    pub base_url: Url,
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_model() -> String {
    DEFAULT_ASSISTANT_MODEL.to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON catalog file. The built-in fixtures are used when absent.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let toml_str = r#"
[payment]
base_url = "https://xyz.supabase.co"
api_key = "anon-key"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.payment.settle_delay_ms, 2000);
        assert_eq!(config.payment.request_timeout_secs, 15);
        assert_eq!(config.payment.status_error_policy, StatusErrorPolicy::Surface);
        assert!(!config.payment.polling.enabled);
        assert_eq!(config.payment.polling.max_attempts, 20);
        assert_eq!(config.discovery.default_radius_km, 5.0);
        assert_eq!(config.discovery.center, CenterConfig::default());
        assert!(config.assistant.is_none());
        assert!(config.catalog.path.is_none());
    }

    #[test]
    fn test_full_config_parsing() {
        let toml_str = r#"
[payment]
base_url = "https://xyz.supabase.co"
api_key = "anon-key"
settle_delay_ms = 500
status_error_policy = "treat_as_pending"

[payment.polling]
enabled = true
initial_interval_ms = 1000
max_attempts = 5

[discovery]
center = { latitude = -23.55, longitude = -46.63 }
default_radius_km = 3.0
max_radius_km = 10.0

[assistant]
base_url = "https://generativelanguage.googleapis.com"
api_key = "g-key"

[catalog]
path = "catalog.json"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.payment.status_error_policy,
            StatusErrorPolicy::TreatAsPending
        );
        assert!(config.payment.polling.enabled);
        assert_eq!(config.payment.polling.initial_interval_ms, 1000);
        assert_eq!(config.payment.polling.max_interval_ms, 30_000);
        assert_eq!(config.discovery.center.latitude, -23.55);
        assert_eq!(config.discovery.min_radius_km, 1.0);
        let assistant = config.assistant.unwrap();
        assert_eq!(assistant.model, DEFAULT_ASSISTANT_MODEL);
        assert_eq!(config.catalog.path, Some(PathBuf::from("catalog.json")));
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let toml_str = r#"
[payment]
base_url = "https://xyz.supabase.co"
api_key = "k"
status_error_policy = "ignore"
"#;
        assert!(toml::from_str::<FileConfig>(toml_str).is_err());
    }
}
