//! Generative-text client (`models/{model}:generateContent`).

use reqwest::Client;
use url::Url;

use super::{ClientError, parse_response};
use crate::objects::assistant::{GenerateContentRequest, GenerateContentResponse};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Clone)]
pub struct AssistantClient {
    http: Client,
    base_url: Url,
    api_key: String,
    model: String,
}

impl AssistantClient {
    pub fn new(base_url: Url, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url,
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Replace the default `reqwest::Client` with a custom one.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// `POST /v1beta/models/{model}:generateContent`.
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ClientError> {
        let url = self
            .base_url
            .join(&format!("/v1beta/models/{}:generateContent", self.model))?;

        let resp = self
            .http
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(request)
            .send()
            .await?;

        parse_response(resp).await
    }
}
