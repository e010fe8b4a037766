//! Checkout state machine.
//!
//! The flow state lives in a single `watch` channel. Every transition is one
//! atomic `send_if_modified` closure; nothing is held across an await. Each
//! checkout start and reset bumps the flow generation, and any backend answer
//! requested under an older generation (or for a different transaction) is
//! dropped instead of applied.

use std::sync::Arc;
use std::time::Duration;

use helpme_sdk::config::{PaymentConfig, StatusErrorPolicy};
use helpme_sdk::objects::PaymentStatus;
use rust_decimal::Decimal;
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};

use super::gateway::{ChargeRequest, GatewayError, PaymentGateway};
use super::state::{
    FailureReason, FlowSnapshot, LastCheck, PaymentFlowState, PixCharge, VerifyOutcome,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PaymentFlowError {
    #[error("charge amount must be positive, got {0}")]
    InvalidAmount(Decimal),
    #[error("charge creation failed: {0}")]
    ChargeCreationFailed(#[source] GatewayError),
    /// The status check itself failed. The flow is still awaiting payment.
    #[error("payment verification failed: {0}")]
    VerificationFailed(#[source] GatewayError),
    #[error("no charge to verify while {0}")]
    InvalidState(PaymentFlowState),
    /// The flow was reset or restarted while the request was in flight.
    #[error("response discarded, flow moved on while the request was in flight")]
    StaleResponseDiscarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowSettings {
    /// How long `Confirmed` keeps the charge before releasing it.
    pub settle_delay: Duration,
    pub status_error_policy: StatusErrorPolicy,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_secs(2),
            status_error_policy: StatusErrorPolicy::default(),
        }
    }
}

impl From<&PaymentConfig> for FlowSettings {
    fn from(config: &PaymentConfig) -> Self {
        Self {
            settle_delay: config.settle_delay,
            status_error_policy: config.status_error_policy,
        }
    }
}

pub struct PaymentFlowController {
    gateway: Arc<dyn PaymentGateway>,
    settings: FlowSettings,
    flow_tx: watch::Sender<FlowSnapshot>,
    /// Serializes charge creation; a queued start re-checks its generation
    /// once it gets through.
    creation_gate: Mutex<()>,
}

impl PaymentFlowController {
    pub fn new(gateway: Arc<dyn PaymentGateway>, settings: FlowSettings) -> Self {
        let (flow_tx, _) = watch::channel(FlowSnapshot::default());
        Self {
            gateway,
            settings,
            flow_tx,
            creation_gate: Mutex::new(()),
        }
    }

    pub fn snapshot(&self) -> FlowSnapshot {
        self.flow_tx.borrow().clone()
    }

    pub fn state(&self) -> PaymentFlowState {
        self.flow_tx.borrow().state
    }

    pub fn subscribe(&self) -> watch::Receiver<FlowSnapshot> {
        self.flow_tx.subscribe()
    }

    /// Create a fresh charge for `amount`. Any charge the flow already holds
    /// is discarded first, whatever the current state.
    pub async fn start_checkout(
        &self,
        amount: Decimal,
        description: &str,
    ) -> Result<Arc<PixCharge>, PaymentFlowError> {
        if amount <= Decimal::ZERO {
            return Err(PaymentFlowError::InvalidAmount(amount));
        }

        let mut generation = 0;
        self.flow_tx.send_modify(|flow| {
            if let Some(old) = flow.charge.take() {
                debug!(transaction_id = %old.transaction_id, "Discarding previous charge");
            }
            flow.generation += 1;
            flow.state = PaymentFlowState::CreatingCharge;
            flow.last_check = None;
            generation = flow.generation;
        });

        let _gate = self.creation_gate.lock().await;
        if self.flow_tx.borrow().generation != generation {
            debug!(generation, "Checkout superseded before charge creation");
            return Err(PaymentFlowError::StaleResponseDiscarded);
        }

        let request = ChargeRequest::new(amount, description);
        info!(%amount, external_id = %request.external_id, "Creating PIX charge");
        let result = self.gateway.create_charge(&request).await;

        let created_at = time::OffsetDateTime::now_utc();
        let mut outcome = Err(PaymentFlowError::StaleResponseDiscarded);
        self.flow_tx.send_if_modified(|flow| {
            if flow.generation != generation {
                return false;
            }
            match result {
                Ok(created) => {
                    let charge = Arc::new(PixCharge {
                        transaction_id: created.transaction_id,
                        qr_code_image: created.qr_code_image,
                        copy_paste_code: created.copy_paste_code,
                        amount,
                        description: request.description,
                        created_at,
                        expires_in_secs: created.expires_in_secs,
                    });
                    flow.state = PaymentFlowState::AwaitingPayment;
                    flow.charge = Some(charge.clone());
                    outcome = Ok(charge);
                }
                Err(e) => {
                    flow.state = PaymentFlowState::Failed(FailureReason::ChargeCreation);
                    outcome = Err(PaymentFlowError::ChargeCreationFailed(e));
                }
            }
            true
        });

        match &outcome {
            Ok(charge) => info!(
                transaction_id = %charge.transaction_id,
                expires_in_secs = charge.expires_in_secs,
                "PIX charge created"
            ),
            Err(PaymentFlowError::StaleResponseDiscarded) => {
                debug!(generation, "Discarding charge-creation response for a superseded checkout")
            }
            Err(e) => warn!(error = %e, "Charge creation failed"),
        }
        outcome
    }

    /// Ask the backend whether the active charge has been paid.
    ///
    /// A second call while one is outstanding returns
    /// [`VerifyOutcome::AlreadyInProgress`] without contacting the backend.
    /// On `PAID` the call returns only after the settle delay, at which point
    /// the charge has been released.
    pub async fn verify_payment(&self) -> Result<VerifyOutcome, PaymentFlowError> {
        let mut begin = Ok(None);
        self.flow_tx.send_if_modified(|flow| match (flow.state, &flow.charge) {
            (PaymentFlowState::VerifyingPayment, _) => {
                begin = Ok(None);
                false
            }
            (PaymentFlowState::AwaitingPayment, Some(charge)) => {
                begin = Ok(Some((flow.generation, charge.clone())));
                flow.state = PaymentFlowState::VerifyingPayment;
                true
            }
            (state, _) => {
                begin = Err(PaymentFlowError::InvalidState(state));
                false
            }
        });
        let Some((generation, charge)) = begin? else {
            debug!("Verification already in progress, ignoring");
            return Ok(VerifyOutcome::AlreadyInProgress);
        };

        let mut guard = VerifyGuard {
            flow_tx: &self.flow_tx,
            generation,
            transaction_id: &charge.transaction_id,
            armed: true,
        };

        debug!(transaction_id = %charge.transaction_id, "Checking payment status");
        let result = match self.gateway.check_status(&charge.transaction_id).await {
            Err(e) if self.settings.status_error_policy == StatusErrorPolicy::TreatAsPending => {
                warn!(
                    transaction_id = %charge.transaction_id,
                    error = %e,
                    "Status check failed, reporting as pending"
                );
                Ok(PaymentStatus::Pending)
            }
            other => other,
        };

        let mut applied = false;
        self.flow_tx.send_if_modified(|flow| {
            let same_charge = flow
                .charge
                .as_ref()
                .is_some_and(|c| c.transaction_id == charge.transaction_id);
            if flow.generation != generation
                || !same_charge
                || flow.state != PaymentFlowState::VerifyingPayment
            {
                return false;
            }
            match &result {
                Ok(PaymentStatus::Paid) => {
                    flow.state = PaymentFlowState::Confirmed;
                    flow.last_check = None;
                }
                Ok(PaymentStatus::Pending) => {
                    flow.state = PaymentFlowState::AwaitingPayment;
                    flow.last_check = Some(LastCheck::Pending);
                }
                Ok(PaymentStatus::Expired) => {
                    flow.state = PaymentFlowState::AwaitingPayment;
                    flow.last_check = Some(LastCheck::Expired);
                }
                Err(_) => {
                    flow.state = PaymentFlowState::AwaitingPayment;
                    flow.last_check = Some(LastCheck::TransportFailed);
                }
            }
            applied = true;
            true
        });
        guard.armed = false;

        if !applied {
            debug!(
                transaction_id = %charge.transaction_id,
                "Discarding status response for a superseded charge"
            );
            return Err(PaymentFlowError::StaleResponseDiscarded);
        }

        match result {
            Ok(PaymentStatus::Paid) => {
                info!(transaction_id = %charge.transaction_id, "Payment confirmed");
                self.settle(generation).await;
                Ok(VerifyOutcome::Confirmed {
                    transaction_id: charge.transaction_id.clone(),
                })
            }
            Ok(PaymentStatus::Pending) => Ok(VerifyOutcome::Pending),
            Ok(PaymentStatus::Expired) => {
                info!(transaction_id = %charge.transaction_id, "Charge expired");
                Ok(VerifyOutcome::Expired)
            }
            Err(e) => {
                warn!(transaction_id = %charge.transaction_id, error = %e, "Status check failed");
                Err(PaymentFlowError::VerificationFailed(e))
            }
        }
    }

    /// Return to `Idle` from any state, dropping the active charge. Responses
    /// still in flight are discarded when they arrive.
    pub fn reset(&self) {
        self.flow_tx.send_modify(|flow| {
            if flow.state != PaymentFlowState::Idle {
                debug!(from = %flow.state, "Resetting payment flow");
            }
            flow.generation += 1;
            flow.state = PaymentFlowState::Idle;
            flow.charge = None;
            flow.last_check = None;
        });
    }

    async fn settle(&self, generation: u64) {
        tokio::time::sleep(self.settings.settle_delay).await;
        self.flow_tx.send_if_modified(|flow| {
            if flow.generation != generation || flow.state != PaymentFlowState::Confirmed {
                return false;
            }
            flow.charge = None;
            true
        });
    }
}

/// Puts a dropped verification back to `AwaitingPayment` so the next call
/// reaches the backend again.
struct VerifyGuard<'a> {
    flow_tx: &'a watch::Sender<FlowSnapshot>,
    generation: u64,
    transaction_id: &'a str,
    armed: bool,
}

impl Drop for VerifyGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let reverted = self.flow_tx.send_if_modified(|flow| {
            let same_charge = flow
                .charge
                .as_ref()
                .is_some_and(|c| c.transaction_id.as_str() == self.transaction_id);
            if flow.generation != self.generation
                || !same_charge
                || flow.state != PaymentFlowState::VerifyingPayment
            {
                return false;
            }
            flow.state = PaymentFlowState::AwaitingPayment;
            true
        });
        if reverted {
            debug!(
                transaction_id = %self.transaction_id,
                "Verification cancelled, back to awaiting payment"
            );
        }
    }
}
