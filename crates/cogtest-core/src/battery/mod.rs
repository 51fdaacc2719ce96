//! Scoring for the rest of the self-test battery.
//!
//! Each test is a small state machine driven by the caller's timer and input.
//! Its result serializes to the field map stored in the results history.

pub mod digit_span;
pub mod nback;
pub mod reaction;
pub mod stroop;

pub use digit_span::{DigitSpanResult, DigitSpanRun};
pub use nback::{NBackResult, NBackRun};
pub use reaction::{ReactionResult, ReactionRun};
pub use stroop::{InkColor, StroopItem, StroopResult, StroopRun};

/// Round to three decimals, the precision stored for accuracies.
fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}
