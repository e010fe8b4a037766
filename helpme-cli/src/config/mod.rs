//! Configuration module for the helpme binary.
//!
//! Handles loading configuration from TOML files and CLI overrides, then
//! converts it into the runtime types from `helpme-sdk::config`.

pub mod file;
pub mod runtime;

use crate::config::file::FileConfig;
use crate::config::runtime::{
    AssistantConfig, DiscoveryConfig, HelpMeConfig, PaymentConfig, PollingConfig,
};
use helpme_core::geo::Coordinate;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Values given on the command line that take precedence over the file.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius_km: Option<f64>,
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: PathBuf,
    overrides: Overrides,
}

impl ConfigLoader {
    pub fn new(config_path: impl AsRef<Path>, overrides: Overrides) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            overrides,
        }
    }

    /// Read the TOML file, apply CLI overrides, validate, and build the
    /// runtime configuration.
    pub fn load(&self) -> Result<HelpMeConfig, ConfigError> {
        let config_content = std::fs::read_to_string(&self.config_path)?;
        self.load_str(&config_content)
    }

    fn load_str(&self, config_content: &str) -> Result<HelpMeConfig, ConfigError> {
        let mut file_config: FileConfig = toml::from_str(config_content)?;

        if let Some(latitude) = self.overrides.latitude {
            file_config.discovery.center.latitude = latitude;
        }
        if let Some(longitude) = self.overrides.longitude {
            file_config.discovery.center.longitude = longitude;
        }
        if let Some(radius_km) = self.overrides.radius_km {
            file_config.discovery.default_radius_km = radius_km;
        }

        validate(&file_config)?;
        Ok(build_config(file_config, &self.config_path))
    }
}

fn validate(config: &FileConfig) -> Result<(), ConfigError> {
    if config.payment.api_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "payment.api_key must not be empty".to_string(),
        ));
    }

    let polling = &config.payment.polling;
    if polling.max_attempts == 0 {
        return Err(ConfigError::ValidationError(
            "payment.polling.max_attempts must be at least 1".to_string(),
        ));
    }
    if polling.initial_interval_ms == 0 || polling.initial_interval_ms > polling.max_interval_ms {
        return Err(ConfigError::ValidationError(format!(
            "payment.polling intervals must satisfy 0 < initial ({}) <= max ({})",
            polling.initial_interval_ms, polling.max_interval_ms
        )));
    }

    let discovery = &config.discovery;
    Coordinate::new(discovery.center.latitude, discovery.center.longitude)
        .map_err(|e| ConfigError::ValidationError(format!("discovery.center: {e}")))?;
    for (name, value) in [
        ("default_radius_km", discovery.default_radius_km),
        ("min_radius_km", discovery.min_radius_km),
        ("max_radius_km", discovery.max_radius_km),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "discovery.{name} must be positive, got {value}"
            )));
        }
    }
    if discovery.min_radius_km > discovery.max_radius_km {
        return Err(ConfigError::ValidationError(format!(
            "discovery.min_radius_km ({}) exceeds max_radius_km ({})",
            discovery.min_radius_km, discovery.max_radius_km
        )));
    }
    if !(discovery.min_radius_km..=discovery.max_radius_km).contains(&discovery.default_radius_km)
    {
        return Err(ConfigError::ValidationError(format!(
            "discovery.default_radius_km ({}) outside [{}, {}]",
            discovery.default_radius_km, discovery.min_radius_km, discovery.max_radius_km
        )));
    }

    if let Some(assistant) = &config.assistant {
        if assistant.api_key.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "assistant.api_key must not be empty".to_string(),
            ));
        }
    }
    Ok(())
}

fn build_config(file_config: FileConfig, config_path: &Path) -> HelpMeConfig {
    let payment = file_config.payment;
    let polling = payment.polling;
    let discovery = file_config.discovery;

    // Relative catalog paths are resolved against the config file.
    let catalog_path = file_config.catalog.path.map(|path| {
        match config_path.parent() {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path,
        }
    });

    HelpMeConfig {
        payment: PaymentConfig {
            base_url: payment.base_url,
            api_key: payment.api_key,
            request_timeout: Duration::from_secs(payment.request_timeout_secs),
            settle_delay: Duration::from_millis(payment.settle_delay_ms),
            status_error_policy: payment.status_error_policy,
            polling: PollingConfig {
                enabled: polling.enabled,
                initial_interval: Duration::from_millis(polling.initial_interval_ms),
                max_interval: Duration::from_millis(polling.max_interval_ms),
                max_attempts: polling.max_attempts,
            },
        },
        discovery: DiscoveryConfig {
            center_latitude: discovery.center.latitude,
            center_longitude: discovery.center.longitude,
            default_radius_km: discovery.default_radius_km,
            min_radius_km: discovery.min_radius_km,
            max_radius_km: discovery.max_radius_km,
        },
        assistant: file_config.assistant.map(|a| AssistantConfig {
            base_url: a.base_url,
            api_key: a.api_key,
            model: a.model,
        }),
        catalog_path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::runtime::StatusErrorPolicy;

    const BASE: &str = r#"
[payment]
base_url = "https://xyz.supabase.co"
api_key = "anon-key"
"#;

    fn loader(overrides: Overrides) -> ConfigLoader {
        ConfigLoader::new("/etc/helpme/helpme-config.toml", overrides)
    }

    fn validation_error(toml_str: &str) -> String {
        match loader(Overrides::default()).load_str(toml_str) {
            Err(ConfigError::ValidationError(msg)) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_build_runtime_config() {
        let config = loader(Overrides::default())
            .load_str(&format!("{BASE}\n[catalog]\npath = \"catalog.json\"\n"))
            .unwrap();
        assert_eq!(config.payment.settle_delay, Duration::from_secs(2));
        assert_eq!(config.payment.request_timeout, Duration::from_secs(15));
        assert_eq!(config.payment.status_error_policy, StatusErrorPolicy::Surface);
        assert_eq!(config.payment.polling, PollingConfig::default());
        assert_eq!(config.discovery, DiscoveryConfig::default());
        assert_eq!(
            config.catalog_path,
            Some(PathBuf::from("/etc/helpme/catalog.json"))
        );
    }

    #[test]
    fn test_cli_overrides_win() {
        let overrides = Overrides {
            latitude: Some(-23.0),
            longitude: None,
            radius_km: Some(2.5),
        };
        let config = loader(overrides).load_str(BASE).unwrap();
        assert_eq!(config.discovery.center_latitude, -23.0);
        assert_eq!(
            config.discovery.center_longitude,
            DiscoveryConfig::default().center_longitude
        );
        assert_eq!(config.discovery.default_radius_km, 2.5);
    }

    #[test]
    fn test_override_outside_bounds_rejected() {
        let overrides = Overrides {
            radius_km: Some(50.0),
            ..Overrides::default()
        };
        let err = loader(overrides).load_str(BASE).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validation_failures() {
        let msg = validation_error(
            "[payment]\nbase_url = \"https://x.example\"\napi_key = \" \"\n",
        );
        assert!(msg.contains("api_key"));

        let msg = validation_error(&format!("{BASE}\n[payment.polling]\nmax_attempts = 0\n"));
        assert!(msg.contains("max_attempts"));

        let msg = validation_error(&format!(
            "{BASE}\n[discovery]\nmin_radius_km = 10.0\nmax_radius_km = 5.0\n"
        ));
        assert!(msg.contains("exceeds"));

        let msg = validation_error(&format!("{BASE}\n[discovery]\nmin_radius_km = -1.0\n"));
        assert!(msg.contains("min_radius_km"));

        let msg = validation_error(&format!(
            "{BASE}\n[discovery]\ncenter = {{ latitude = 95.0, longitude = 0.0 }}\n"
        ));
        assert!(msg.contains("discovery.center"));
    }
}
