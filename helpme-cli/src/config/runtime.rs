//! Runtime configuration re-exports.
//!
//! The actual config types are defined in `helpme-sdk::config`.
//! This module re-exports them for convenience.

pub use helpme_sdk::config::{
    AssistantConfig, DiscoveryConfig, HelpMeConfig, PaymentConfig, PollingConfig,
    StatusErrorPolicy,
};
