//! 2-back letter memory: respond when the letter on screen matches the one
//! shown two steps earlier.

use rand::Rng;
use serde::Serialize;

use super::round3;

pub const NBACK_LETTERS: &[u8] = b"BCDGHKLMNPRST";
pub const NBACK_DISTANCE: usize = 2;
pub const NBACK_TRIALS: usize = 20;

/// Whether the letter at `index` repeats the one [`NBACK_DISTANCE`] back.
pub fn is_target(seq: &[char], index: usize) -> bool {
    index >= NBACK_DISTANCE
        && index < seq.len()
        && seq[index] == seq[index - NBACK_DISTANCE]
}

pub fn count_targets(seq: &[char]) -> usize {
    (0..seq.len()).filter(|&i| is_target(seq, i)).count()
}

#[derive(Debug, Clone, Default)]
pub struct NBackRun {
    seq: Vec<char>,
    responded: bool,
    hits: u32,
    misses: u32,
    false_alarms: u32,
}

impl NBackRun {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sequence(&self) -> &[char] {
        &self.seq
    }

    pub fn is_complete(&self) -> bool {
        self.seq.len() >= NBACK_TRIALS
    }

    /// Draw and show the next letter. `None` once every trial was shown.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<char> {
        let letter = char::from(NBACK_LETTERS[rng.random_range(0..NBACK_LETTERS.len())]);
        self.show(letter).then_some(letter)
    }

    /// Show `letter` next, closing out the current one: a target left
    /// without a response is a miss.
    pub fn show(&mut self, letter: char) -> bool {
        if self.is_complete() {
            return false;
        }
        self.close_current();
        self.seq.push(letter);
        self.responded = false;
        true
    }

    /// "Match" for the letter on screen. Only the first press per letter
    /// counts; `Some(true)` is a hit, `Some(false)` a false alarm.
    pub fn respond(&mut self) -> Option<bool> {
        if self.seq.is_empty() || self.responded {
            return None;
        }
        self.responded = true;
        let hit = is_target(&self.seq, self.seq.len() - 1);
        if hit {
            self.hits += 1;
        } else {
            self.false_alarms += 1;
        }
        Some(hit)
    }

    pub fn finish(mut self) -> NBackResult {
        self.close_current();
        let total_targets = count_targets(&self.seq);
        let accuracy = if total_targets > 0 {
            f64::from(self.hits) / total_targets as f64
        } else {
            0.0
        };
        NBackResult {
            accuracy: round3(accuracy),
            hits: self.hits,
            misses: self.misses,
            false_alarms: self.false_alarms,
            total_targets,
        }
    }

    fn close_current(&mut self) {
        if let Some(last) = self.seq.len().checked_sub(1) {
            if !self.responded && is_target(&self.seq, last) {
                self.misses += 1;
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NBackResult {
    pub accuracy: f64,
    pub hits: u32,
    pub misses: u32,
    pub false_alarms: u32,
    pub total_targets: usize,
}
