//! Boundary between the checkout flow and the PIX backend.

use async_trait::async_trait;
use compact_str::CompactString;
use helpme_sdk::client::{ClientError, PixClient};
use helpme_sdk::config::PaymentConfig;
use helpme_sdk::objects::{CreatePixCharge, PaymentStatus, PixChargeResponse};
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The request never produced an HTTP answer.
    #[error("payment backend unreachable: {0}")]
    Unreachable(String),
    #[error("payment backend rejected the request with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("malformed payment backend response: {0}")]
    Malformed(String),
}

impl From<ClientError> for GatewayError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::Http(e) => GatewayError::Unreachable(e.to_string()),
            ClientError::Api { status, body } => GatewayError::Rejected {
                status: status.as_u16(),
                body,
            },
            ClientError::Json(e) => GatewayError::Malformed(e.to_string()),
            ClientError::Url(e) => GatewayError::Malformed(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeRequest {
    pub amount: Decimal,
    pub description: String,
    /// Client-side order reference, unique per checkout attempt.
    pub external_id: String,
}

impl ChargeRequest {
    pub fn new(amount: Decimal, description: impl Into<String>) -> Self {
        let millis = time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
        Self {
            amount,
            description: description.into(),
            external_id: format!("order_{millis}"),
        }
    }
}

/// What the backend hands back for a new charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedCharge {
    pub transaction_id: CompactString,
    pub qr_code_image: String,
    pub copy_paste_code: String,
    pub expires_in_secs: u32,
}

impl From<PixChargeResponse> for CreatedCharge {
    fn from(resp: PixChargeResponse) -> Self {
        Self {
            expires_in_secs: resp.expires_in_secs(),
            transaction_id: resp.transaction_id,
            qr_code_image: resp.qr_code,
            copy_paste_code: resp.copy_paste,
        }
    }
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_charge(&self, request: &ChargeRequest) -> Result<CreatedCharge, GatewayError>;

    async fn check_status(&self, transaction_id: &str) -> Result<PaymentStatus, GatewayError>;
}

/// [`PaymentGateway`] backed by the PIX edge functions.
#[derive(Debug, Clone)]
pub struct PixGateway {
    client: PixClient,
}

impl PixGateway {
    pub fn new(client: PixClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: &PaymentConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        let client = PixClient::new(config.base_url.clone(), config.api_key.clone())
            .with_http_client(http);
        Ok(Self::new(client))
    }
}

#[async_trait]
impl PaymentGateway for PixGateway {
    async fn create_charge(&self, request: &ChargeRequest) -> Result<CreatedCharge, GatewayError> {
        let payload = CreatePixCharge {
            amount: request.amount,
            description: request.description.clone(),
            external_id: request.external_id.clone(),
        };
        let resp = self.client.create_charge(&payload).await?;
        Ok(resp.into())
    }

    async fn check_status(&self, transaction_id: &str) -> Result<PaymentStatus, GatewayError> {
        let resp = self.client.check_status(transaction_id).await?;
        Ok(resp.status)
    }
}
