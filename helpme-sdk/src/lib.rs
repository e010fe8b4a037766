//! Help-Me SDK
//!
//! Wire types for the two external services the Help-Me client talks to
//! (the PIX payment backend and the generative-text assistant), the runtime
//! configuration shared between crates, and, behind the `client` feature,
//! typed HTTP clients for both services.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

#[cfg(feature = "client")]
pub mod client;
pub mod config;
pub mod objects;
