use std::time::Duration;

use rand::Rng;

/// Largest doubling exponent; `initial * 2^16` is already beyond any sane cap.
const MAX_DOUBLINGS: u32 = 16;

/// Interval before the `attempt`-th status check (zero based): `initial`
/// doubled once per previous attempt, capped at `max`.
pub fn poll_interval(attempt: u32, initial: Duration, max: Duration) -> Duration {
    let factor = 2u32.pow(attempt.min(MAX_DOUBLINGS));
    initial.saturating_mul(factor).min(max)
}

/// Spread `interval` by up to ±10% so concurrent flows don't hit the backend
/// in lockstep.
pub fn jittered(interval: Duration) -> Duration {
    let factor = rand::rng().random_range(0.9..=1.1);
    interval.mul_f64(factor)
}
