//! Charge-creation and status-check payloads for the PIX backend.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Default charge lifetime when the backend omits `expiresIn`.
pub const DEFAULT_EXPIRES_IN_SECS: u32 = 600;

/// Request body for `POST /functions/v1/create-pix`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePixCharge {
    /// Charge amount in BRL. Sent as a JSON number.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: rust_decimal::Decimal,
    pub description: String,
    /// Client-generated order reference, e.g. `order_1718000000000`.
    pub external_id: String,
}

/// Response of the charge-creation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixChargeResponse {
    /// Encoded QR image reference (usually a `data:image/png;base64,...` URL).
    pub qr_code: String,
    /// The textual "copia e cola" payment string.
    pub copy_paste: String,
    pub transaction_id: CompactString,
    #[serde(default)]
    pub expires_in: Option<u32>,
}

impl PixChargeResponse {
    /// Charge lifetime in seconds, falling back to [`DEFAULT_EXPIRES_IN_SECS`]
    /// when the backend left it out or sent zero.
    pub fn expires_in_secs(&self) -> u32 {
        match self.expires_in {
            Some(secs) if secs > 0 => secs,
            _ => DEFAULT_EXPIRES_IN_SECS,
        }
    }
}

/// Payment status reported by `GET /functions/v1/check-payment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Expired,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "PENDING"),
            PaymentStatus::Paid => write!(f, "PAID"),
            PaymentStatus::Expired => write!(f, "EXPIRED"),
        }
    }
}

/// Response of the status-check endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentStatusResponse {
    pub status: PaymentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_create_request_uses_camel_case_and_numeric_amount() {
        let req = CreatePixCharge {
            amount: Decimal::new(3500, 2),
            description: "Espera em Banco".to_string(),
            external_id: "order_1".to_string(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["amount"], serde_json::json!(35.0));
        assert_eq!(value["externalId"], "order_1");
        assert_eq!(value["description"], "Espera em Banco");
    }

    #[test]
    fn test_missing_expiry_falls_back_to_default() {
        let json = r#"{"qrCode":"data:image/png;base64,AAA","copyPaste":"000201","transactionId":"tx_1"}"#;
        let resp: PixChargeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.expires_in, None);
        assert_eq!(resp.expires_in_secs(), DEFAULT_EXPIRES_IN_SECS);

        let json = r#"{"qrCode":"q","copyPaste":"c","transactionId":"tx_2","expiresIn":0}"#;
        let resp: PixChargeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.expires_in_secs(), DEFAULT_EXPIRES_IN_SECS);
    }

    #[test]
    fn test_status_parsing() {
        let resp: PaymentStatusResponse = serde_json::from_str(r#"{"status":"PAID"}"#).unwrap();
        assert_eq!(resp.status, PaymentStatus::Paid);
        let resp: PaymentStatusResponse =
            serde_json::from_str(r#"{"status":"EXPIRED"}"#).unwrap();
        assert_eq!(resp.status, PaymentStatus::Expired);
        assert!(serde_json::from_str::<PaymentStatusResponse>(r#"{"status":"REFUNDED"}"#).is_err());
    }
}
