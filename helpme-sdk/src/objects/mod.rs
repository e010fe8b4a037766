pub mod assistant;
pub mod pix;

pub use assistant::{Candidate, Content, GenerateContentRequest, GenerateContentResponse, Part};
pub use pix::{CreatePixCharge, PaymentStatus, PaymentStatusResponse, PixChargeResponse};
