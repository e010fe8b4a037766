//! PIX payment backend client (Help-Me app → edge functions).
//!
//! Both endpoints authenticate with `Authorization: Bearer {api_key}`.

use reqwest::Client;
use url::Url;

use super::{ClientError, parse_response};
use crate::objects::pix::{CreatePixCharge, PaymentStatusResponse, PixChargeResponse};

const CREATE_PIX_PATH: &str = "/functions/v1/create-pix";
const CHECK_PAYMENT_PATH: &str = "/functions/v1/check-payment";

/// Typed HTTP client for the charge-creation and status-check functions.
#[derive(Debug, Clone)]
pub struct PixClient {
    http: Client,
    base_url: Url,
    api_key: String,
}

impl PixClient {
    /// Create a new `PixClient`.
    ///
    /// * `base_url` – root URL of the backend (e.g. `https://xyz.supabase.co`).
    /// * `api_key` – the bearer token sent on every request.
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url,
            api_key: api_key.into(),
        }
    }

    /// Replace the default `reqwest::Client` with a custom one (e.g. to
    /// configure timeouts or a proxy).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// `POST /functions/v1/create-pix` – create a PIX charge.
    pub async fn create_charge(
        &self,
        payload: &CreatePixCharge,
    ) -> Result<PixChargeResponse, ClientError> {
        let url = self.base_url.join(CREATE_PIX_PATH)?;

        let resp = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(payload)
            .send()
            .await?;

        parse_response(resp).await
    }

    /// `GET /functions/v1/check-payment?id={transaction_id}` – fetch the
    /// current status of a charge.
    pub async fn check_status(
        &self,
        transaction_id: &str,
    ) -> Result<PaymentStatusResponse, ClientError> {
        let url = self.base_url.join(&format!(
            "{CHECK_PAYMENT_PATH}?id={}",
            urlencoding::encode(transaction_id)
        ))?;

        let resp = self
            .http
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        parse_response(resp).await
    }
}
