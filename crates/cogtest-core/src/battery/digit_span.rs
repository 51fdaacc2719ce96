//! Forward digit span: recall ever longer digit strings until the first
//! mistake.

use std::time::Duration;

use rand::Rng;
use serde::Serialize;

pub const START_SPAN: usize = 4;

const MS_PER_DIGIT: u64 = 500;
const MIN_DISPLAY_MS: u64 = 1500;

pub fn generate_digits<R: Rng + ?Sized>(len: usize, rng: &mut R) -> String {
    (0..len)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

/// How long a sequence of `span` digits stays on screen.
pub fn display_time(span: usize) -> Duration {
    let ms = (span as u64).saturating_mul(MS_PER_DIGIT).max(MIN_DISPLAY_MS);
    Duration::from_millis(ms)
}

#[derive(Debug, Clone)]
pub struct DigitSpanRun {
    span: usize,
    best: usize,
    sequence: String,
    finished: bool,
}

impl Default for DigitSpanRun {
    fn default() -> Self {
        Self {
            span: START_SPAN,
            best: 0,
            sequence: String::new(),
            finished: false,
        }
    }
}

impl DigitSpanRun {
    pub fn new() -> Self {
        Self::default()
    }

    /// Length of the sequence being asked for.
    pub fn span(&self) -> usize {
        self.span
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Draw the sequence to show for the current span.
    pub fn next_sequence<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &str {
        self.sequence = generate_digits(self.span, rng);
        &self.sequence
    }

    /// Check a recall attempt. Anything but digits in `input` is ignored.
    /// A wrong answer ends the run; a right one moves up one digit.
    pub fn submit(&mut self, input: &str) -> bool {
        if self.finished {
            return false;
        }
        let recalled: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
        let correct = !self.sequence.is_empty() && recalled == self.sequence;
        if correct {
            self.best = self.best.max(self.span);
            self.span += 1;
        } else {
            self.finished = true;
        }
        self.sequence.clear();
        correct
    }

    pub fn result(&self) -> DigitSpanResult {
        DigitSpanResult {
            max_span: self.best.max(self.span - 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DigitSpanResult {
    pub max_span: usize,
}
