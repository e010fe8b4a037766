//! Subcommand handlers.

pub mod checkout;
pub mod discover;
pub mod report;

pub use checkout::CheckoutArgs;
pub use discover::DiscoverArgs;
pub use report::{AdviceArgs, ReportArgs};
