//! Human-facing order and return number generation.
//!
//! Numbers are `{prefix}{millisecond timestamp}{4 random digits}`. The
//! random suffix only makes collisions unlikely; the tables carry unique
//! constraints and the workflows retry on conflict.

use jiff::Timestamp;
use rand::Rng;

pub(crate) const ORDER_PREFIX: &str = "DC";
pub(crate) const RETURN_PREFIX: &str = "RT";

pub(crate) fn generate(prefix: &str) -> String {
    let millis = Timestamp::now().as_millisecond();
    let suffix: u32 = rand::thread_rng().gen_range(0..10_000);

    format!("{prefix}{millis}{suffix:04}")
}
