//! Simple visual reaction time.

use std::time::Duration;

use rand::Rng;
use serde::Serialize;

use crate::history::{mean, stdev};

pub const REACTION_TRIALS: usize = 7;

/// Latency recorded for a response made before the go signal.
pub const EARLY_PENALTY_MS: u64 = 1000;

const MIN_DELAY_MS: u64 = 800;
const DELAY_SPREAD_MS: u64 = 2000;

/// Random wait between the ready and go signals.
pub fn go_delay<R: Rng + ?Sized>(rng: &mut R) -> Duration {
    Duration::from_millis(MIN_DELAY_MS + rng.random_range(0..DELAY_SPREAD_MS))
}

#[derive(Debug, Clone)]
pub struct ReactionRun {
    penalize_early: bool,
    latencies: Vec<u64>,
}

impl ReactionRun {
    /// With `penalize_early`, a response before the go signal still uses up
    /// the trial and is recorded as [`EARLY_PENALTY_MS`].
    pub fn new(penalize_early: bool) -> Self {
        Self {
            penalize_early,
            latencies: Vec::with_capacity(REACTION_TRIALS),
        }
    }

    /// Zero-based index of the trial in progress.
    pub fn trial(&self) -> usize {
        self.latencies.len()
    }

    pub fn is_complete(&self) -> bool {
        self.latencies.len() >= REACTION_TRIALS
    }

    /// Response after the go signal. Returns `false` once the run is complete.
    pub fn respond(&mut self, latency: Duration) -> bool {
        if self.is_complete() {
            return false;
        }
        let ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
        self.latencies.push(ms);
        true
    }

    /// Response before the go signal. Returns whether it counted as a trial.
    pub fn respond_early(&mut self) -> bool {
        if !self.penalize_early || self.is_complete() {
            return false;
        }
        self.latencies.push(EARLY_PENALTY_MS);
        true
    }

    pub fn result(&self) -> ReactionResult {
        let xs: Vec<f64> = self.latencies.iter().map(|&ms| ms as f64).collect();
        ReactionResult {
            mean_ms: mean(&xs).round() as u64,
            sd_ms: stdev(&xs).round() as u64,
            trials: self.latencies.len(),
            raw_times: self.latencies.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionResult {
    pub mean_ms: u64,
    pub sd_ms: u64,
    pub trials: usize,
    pub raw_times: Vec<u64>,
}
