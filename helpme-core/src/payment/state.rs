//! Observable state of a checkout flow.

use std::sync::Arc;

use compact_str::CompactString;
use rust_decimal::Decimal;

/// Why a flow ended in [`PaymentFlowState::Failed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureReason {
    ChargeCreation,
}

impl FailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::ChargeCreation => "charge_creation_error",
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaymentFlowState {
    #[default]
    Idle,
    CreatingCharge,
    AwaitingPayment,
    /// Modal sub-state of `AwaitingPayment`; always returns to it, or moves
    /// on to `Confirmed`.
    VerifyingPayment,
    Confirmed,
    Failed(FailureReason),
}

impl std::fmt::Display for PaymentFlowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentFlowState::Idle => write!(f, "idle"),
            PaymentFlowState::CreatingCharge => write!(f, "creating_charge"),
            PaymentFlowState::AwaitingPayment => write!(f, "awaiting_payment"),
            PaymentFlowState::VerifyingPayment => write!(f, "verifying_payment"),
            PaymentFlowState::Confirmed => write!(f, "confirmed"),
            PaymentFlowState::Failed(reason) => write!(f, "failed({reason})"),
        }
    }
}

/// A PIX charge created for one checkout attempt. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixCharge {
    pub transaction_id: CompactString,
    /// Encoded QR image reference.
    pub qr_code_image: String,
    pub copy_paste_code: String,
    pub amount: Decimal,
    pub description: String,
    pub created_at: time::OffsetDateTime,
    pub expires_in_secs: u32,
}

impl PixCharge {
    pub fn expires_at(&self) -> time::OffsetDateTime {
        self.created_at + time::Duration::seconds(i64::from(self.expires_in_secs))
    }

    pub fn is_expired(&self, now: time::OffsetDateTime) -> bool {
        now >= self.expires_at()
    }
}

/// Result of the most recent status check that did not confirm payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LastCheck {
    Pending,
    Expired,
    /// The check itself failed; the payment may or may not have happened.
    TransportFailed,
}

/// What observers of a flow see.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlowSnapshot {
    pub state: PaymentFlowState,
    /// The active charge. At most one exists per flow.
    pub charge: Option<Arc<PixCharge>>,
    pub last_check: Option<LastCheck>,
    /// Bumped on every checkout start and reset. Responses that were
    /// requested under an older generation are discarded.
    pub generation: u64,
}

impl FlowSnapshot {
    /// Payment confirmed and the settle period has elapsed.
    pub fn is_complete(&self) -> bool {
        self.state == PaymentFlowState::Confirmed && self.charge.is_none()
    }
}

/// Non-error results of [`verify_payment`](super::PaymentFlowController::verify_payment).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Another verification for this charge is already running.
    AlreadyInProgress,
    Pending,
    Expired,
    Confirmed { transaction_id: CompactString },
}
