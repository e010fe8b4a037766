//! Background verification for flows that don't want a manual "I've paid"
//! step.

use std::sync::Arc;

use helpme_sdk::config::PollingConfig;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::controller::{PaymentFlowController, PaymentFlowError};
use super::state::{FlowSnapshot, PaymentFlowState, VerifyOutcome};
use crate::utils::backoff::{jittered, poll_interval};

/// Why a polling run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Confirmed,
    Expired,
    /// The flow was reset, restarted or otherwise left awaiting-payment.
    Superseded,
    AttemptsExhausted,
    Shutdown,
}

/// Calls [`PaymentFlowController::verify_payment`] on a growing interval
/// until the charge is settled one way or another.
pub struct PaymentPoller {
    controller: Arc<PaymentFlowController>,
    config: PollingConfig,
}

impl PaymentPoller {
    pub fn new(controller: Arc<PaymentFlowController>, config: PollingConfig) -> Self {
        Self { controller, config }
    }

    /// Poll the charge that is active when the run starts.
    pub async fn run(self, mut shutdown_rx: watch::Receiver<bool>) -> PollOutcome {
        let mut flow_rx = self.controller.subscribe();
        let generation = {
            let flow = flow_rx.borrow_and_update();
            if !is_awaiting(&flow) {
                debug!(state = %flow.state, "Nothing to poll");
                return PollOutcome::Superseded;
            }
            flow.generation
        };
        info!(
            generation,
            max_attempts = self.config.max_attempts,
            "PaymentPoller started"
        );

        for attempt in 0..self.config.max_attempts {
            let delay = jittered(poll_interval(
                attempt,
                self.config.initial_interval,
                self.config.max_interval,
            ));
            debug!(attempt, ?delay, "Waiting before next status check");

            let sleep = tokio::time::sleep(delay);
            tokio::pin!(sleep);
            loop {
                tokio::select! {
                    biased;

                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            info!("PaymentPoller received shutdown signal");
                            return PollOutcome::Shutdown;
                        }
                    }

                    changed = flow_rx.changed() => {
                        if changed.is_err() {
                            return PollOutcome::Superseded;
                        }
                        let flow = flow_rx.borrow_and_update();
                        if flow.generation != generation || !is_awaiting(&flow) {
                            info!(state = %flow.state, "Flow moved on, stopping poller");
                            return PollOutcome::Superseded;
                        }
                    }

                    _ = &mut sleep => break,
                }
            }

            match self.controller.verify_payment().await {
                Ok(VerifyOutcome::Confirmed { transaction_id }) => {
                    info!(%transaction_id, attempt, "Payment confirmed by poller");
                    return PollOutcome::Confirmed;
                }
                Ok(VerifyOutcome::Expired) => {
                    info!(attempt, "Charge expired, stopping poller");
                    return PollOutcome::Expired;
                }
                Ok(VerifyOutcome::Pending) | Ok(VerifyOutcome::AlreadyInProgress) => {}
                Err(PaymentFlowError::VerificationFailed(e)) => {
                    warn!(attempt, error = %e, "Status check failed, will retry");
                }
                Err(e) => {
                    debug!(attempt, error = %e, "Verification no longer applicable");
                    return PollOutcome::Superseded;
                }
            }
            // Skip the transitions our own check just caused.
            flow_rx.borrow_and_update();
        }

        warn!(
            attempts = self.config.max_attempts,
            "PaymentPoller gave up without a final status"
        );
        PollOutcome::AttemptsExhausted
    }
}

fn is_awaiting(flow: &FlowSnapshot) -> bool {
    flow.charge.is_some()
        && matches!(
            flow.state,
            PaymentFlowState::AwaitingPayment | PaymentFlowState::VerifyingPayment
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payment::controller::FlowSettings;
    use crate::payment::gateway::{ChargeRequest, CreatedCharge, GatewayError, PaymentGateway};
    use async_trait::async_trait;
    use helpme_sdk::config::StatusErrorPolicy;
    use helpme_sdk::objects::PaymentStatus;
    use rust_decimal::Decimal;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct SequenceGateway {
        statuses: Mutex<VecDeque<Result<PaymentStatus, GatewayError>>>,
        checks: AtomicUsize,
    }

    impl SequenceGateway {
        fn new(statuses: Vec<Result<PaymentStatus, GatewayError>>) -> Arc<Self> {
            Arc::new(Self {
                statuses: Mutex::new(statuses.into()),
                checks: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl PaymentGateway for SequenceGateway {
        async fn create_charge(&self, _: &ChargeRequest) -> Result<CreatedCharge, GatewayError> {
            Ok(CreatedCharge {
                transaction_id: "tx_poll".into(),
                qr_code_image: String::new(),
                copy_paste_code: String::new(),
                expires_in_secs: 600,
            })
        }

        async fn check_status(&self, _: &str) -> Result<PaymentStatus, GatewayError> {
            self.checks.fetch_add(1, Ordering::SeqCst);
            self.statuses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(PaymentStatus::Pending))
        }
    }

    fn polling(max_attempts: u32) -> PollingConfig {
        PollingConfig {
            enabled: true,
            initial_interval: Duration::from_secs(2),
            max_interval: Duration::from_secs(10),
            max_attempts,
        }
    }

    async fn started(gateway: Arc<SequenceGateway>) -> Arc<PaymentFlowController> {
        let settings = FlowSettings {
            settle_delay: Duration::from_secs(2),
            status_error_policy: StatusErrorPolicy::Surface,
        };
        let c = Arc::new(PaymentFlowController::new(gateway, settings));
        c.start_checkout(Decimal::ONE, "poll").await.unwrap();
        c
    }

    #[tokio::test(start_paused = true)]
    async fn test_polls_until_paid() {
        let gateway = SequenceGateway::new(vec![
            Ok(PaymentStatus::Pending),
            Err(GatewayError::Unreachable("timeout".into())),
            Ok(PaymentStatus::Paid),
        ]);
        let c = started(gateway.clone()).await;
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        let outcome = PaymentPoller::new(c.clone(), polling(10)).run(shutdown_rx).await;
        assert_eq!(outcome, PollOutcome::Confirmed);
        assert_eq!(gateway.checks.load(Ordering::SeqCst), 3);
        assert!(c.snapshot().is_complete());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_on_expired() {
        let gateway = SequenceGateway::new(vec![Ok(PaymentStatus::Expired)]);
        let c = started(gateway.clone()).await;
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        let outcome = PaymentPoller::new(c, polling(10)).run(shutdown_rx).await;
        assert_eq!(outcome, PollOutcome::Expired);
        assert_eq!(gateway.checks.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_max_attempts() {
        let gateway = SequenceGateway::new(vec![]);
        let c = started(gateway.clone()).await;
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        let outcome = PaymentPoller::new(c.clone(), polling(3)).run(shutdown_rx).await;
        assert_eq!(outcome, PollOutcome::AttemptsExhausted);
        assert_eq!(gateway.checks.load(Ordering::SeqCst), 3);
        assert_eq!(c.state(), PaymentFlowState::AwaitingPayment);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_stops_poller() {
        let gateway = SequenceGateway::new(vec![]);
        let c = started(gateway.clone()).await;
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        let poller = tokio::spawn(PaymentPoller::new(c.clone(), polling(10)).run(shutdown_rx));
        tokio::task::yield_now().await;
        c.reset();

        assert_eq!(poller.await.unwrap(), PollOutcome::Superseded);
        assert_eq!(gateway.checks.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_poller() {
        let gateway = SequenceGateway::new(vec![]);
        let c = started(gateway.clone()).await;
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let poller = tokio::spawn(PaymentPoller::new(c.clone(), polling(10)).run(shutdown_rx));
        tokio::task::yield_now().await;
        shutdown_tx.send(true).unwrap();

        assert_eq!(poller.await.unwrap(), PollOutcome::Shutdown);
        assert_eq!(c.state(), PaymentFlowState::AwaitingPayment);
    }

    #[tokio::test]
    async fn test_idle_flow_has_nothing_to_poll() {
        let gateway = SequenceGateway::new(vec![]);
        let c = Arc::new(PaymentFlowController::new(gateway, FlowSettings::default()));
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        let outcome = PaymentPoller::new(c, polling(3)).run(shutdown_rx).await;
        assert_eq!(outcome, PollOutcome::Superseded);
    }
}
