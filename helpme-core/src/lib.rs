//! Help-Me core: location-filtered discovery over the service catalog and
//! the PIX checkout flow.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod catalog;
pub mod discovery;
pub mod entities;
pub mod geo;
pub mod payment;
pub mod report;
pub mod utils;
