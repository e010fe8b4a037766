//! Generated service reports and assistant advice.
//!
//! Text generation is best effort: every failure collapses into a fixed
//! Portuguese fallback so callers always get something to show.

mod prompt;

use std::sync::Arc;

use async_trait::async_trait;
use helpme_sdk::client::{AssistantClient, ClientError};
use helpme_sdk::config::AssistantConfig;
use helpme_sdk::objects::GenerateContentRequest;
use tracing::{debug, warn};

use crate::entities::{ServiceCategory, ServiceType};

pub use prompt::{PET_ADVISOR_INSTRUCTION, QUEUE_ADVISOR_INSTRUCTION, advisor_instruction};

pub const REPORT_EMPTY_FALLBACK: &str = "Relatório gerado automaticamente.";
pub const REPORT_ERROR_FALLBACK: &str = "Não foi possível gerar o relatório detalhado no momento.";
pub const ADVICE_EMPTY_FALLBACK: &str = "Sem sugestões no momento.";
pub const ADVICE_ERROR_FALLBACK: &str = "Desculpe, estou indisponível agora.";

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("assistant request failed: {0}")]
    Client(#[from] ClientError),
    #[error("assistant unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for `prompt`. `Ok(None)` means the model answered with
    /// nothing usable.
    async fn generate(
        &self,
        prompt: &str,
        system_instruction: Option<&str>,
    ) -> Result<Option<String>, ReportError>;
}

#[async_trait]
impl TextGenerator for AssistantClient {
    async fn generate(
        &self,
        prompt: &str,
        system_instruction: Option<&str>,
    ) -> Result<Option<String>, ReportError> {
        let request =
            GenerateContentRequest::new(prompt, system_instruction.map(str::to_string));
        let resp = self.generate_content(&request).await?;
        Ok(resp.text())
    }
}

/// Where a piece of report text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    Generated,
    EmptyFallback,
    ErrorFallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportText {
    pub text: String,
    pub source: TextSource,
}

pub struct Reporter {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl Reporter {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator: Some(generator),
        }
    }

    /// A reporter with no assistant behind it; always yields the error
    /// fallbacks.
    pub fn disabled() -> Self {
        Self { generator: None }
    }

    pub fn from_config(config: &AssistantConfig) -> Self {
        let client = AssistantClient::new(
            config.base_url.clone(),
            config.api_key.clone(),
            config.model.clone(),
        );
        Self::new(Arc::new(client))
    }

    /// Client-facing summary of a finished service, built from the
    /// provider's raw notes.
    pub async fn service_report(
        &self,
        service_type: ServiceType,
        raw_notes: &str,
        duration_minutes: u32,
    ) -> ReportText {
        let prompt = prompt::service_report(service_type, raw_notes, duration_minutes);
        debug!(%service_type, duration_minutes, "Requesting service report");
        self.generate_or_fallback(&prompt, None, REPORT_EMPTY_FALLBACK, REPORT_ERROR_FALLBACK)
            .await
    }

    pub async fn assistant_advice(&self, query: &str, category: ServiceCategory) -> ReportText {
        debug!(%category, "Requesting assistant advice");
        self.generate_or_fallback(
            query,
            Some(advisor_instruction(category)),
            ADVICE_EMPTY_FALLBACK,
            ADVICE_ERROR_FALLBACK,
        )
        .await
    }

    async fn generate_or_fallback(
        &self,
        prompt: &str,
        system_instruction: Option<&str>,
        on_empty: &str,
        on_error: &str,
    ) -> ReportText {
        let Some(generator) = &self.generator else {
            debug!("No assistant configured, using fallback");
            return ReportText {
                text: on_error.to_string(),
                source: TextSource::ErrorFallback,
            };
        };
        match generator.generate(prompt, system_instruction).await {
            Ok(Some(text)) => ReportText {
                text,
                source: TextSource::Generated,
            },
            Ok(None) => {
                debug!("Assistant returned no text, using fallback");
                ReportText {
                    text: on_empty.to_string(),
                    source: TextSource::EmptyFallback,
                }
            }
            Err(e) => {
                warn!(error = %e, "Assistant request failed, using fallback");
                ReportText {
                    text: on_error.to_string(),
                    source: TextSource::ErrorFallback,
                }
            }
        }
    }
}
