//! Payment backend configuration.

use std::time::Duration;
use url::Url;

/// How a transport failure on the status check is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusErrorPolicy {
    /// Report the failure as a distinct soft error; the flow stays in
    /// awaiting-payment.
    #[default]
    Surface,
    /// Report the failure as an ordinary `PENDING` status.
    TreatAsPending,
}

/// Settings for the optional background verification loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollingConfig {
    pub enabled: bool,
    pub initial_interval: Duration,
    pub max_interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            initial_interval: Duration::from_secs(2),
            max_interval: Duration::from_secs(30),
            max_attempts: 20,
        }
    }
}

/// Payment backend configuration with runtime values.
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    /// Root URL of the backend hosting `create-pix` and `check-payment`.
    pub base_url: Url,
    /// Bearer token sent on every request.
    pub api_key: String,
    pub request_timeout: Duration,
    /// Grace period between `PAID` and releasing the charge.
    pub settle_delay: Duration,
    pub status_error_policy: StatusErrorPolicy,
    pub polling: PollingConfig,
}
