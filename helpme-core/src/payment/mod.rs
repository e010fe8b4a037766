//! PIX checkout flow: one charge per flow, verified manually or by a
//! background poller.

mod controller;
mod gateway;
mod poller;
mod state;

pub use controller::{FlowSettings, PaymentFlowController, PaymentFlowError};
pub use gateway::{ChargeRequest, CreatedCharge, GatewayError, PaymentGateway, PixGateway};
pub use poller::{PaymentPoller, PollOutcome};
pub use state::{
    FailureReason, FlowSnapshot, LastCheck, PaymentFlowState, PixCharge, VerifyOutcome,
};
