//! Assistant (text generation) configuration.

use url::Url;

pub const DEFAULT_ASSISTANT_MODEL: &str = "gemini-3-flash-preview";

#[derive(Debug, Clone)]
pub struct AssistantConfig {
    pub base_url: Url,
    pub api_key: String,
    pub model: String,
}
