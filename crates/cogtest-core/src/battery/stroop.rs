//! Stroop colour-word interference: name the ink colour, not the word.

use std::fmt;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::round3;
use crate::history::mean;

pub const STROOP_ITEMS: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InkColor {
    Red,
    Green,
    Blue,
    Yellow,
}

impl InkColor {
    pub const ALL: [InkColor; 4] = [Self::Red, Self::Green, Self::Blue, Self::Yellow];

    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

impl fmt::Display for InkColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Red => "RED",
            Self::Green => "GREEN",
            Self::Blue => "BLUE",
            Self::Yellow => "YELLOW",
        })
    }
}

impl std::str::FromStr for InkColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InkColor::ALL
            .into_iter()
            .find(|c| c.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown colour: {s}"))
    }
}

/// A colour word printed in some ink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StroopItem {
    pub word: InkColor,
    pub ink: InkColor,
}

impl StroopItem {
    pub fn is_congruent(&self) -> bool {
        self.word == self.ink
    }
}

/// Word and ink drawn independently, so roughly a quarter are congruent.
pub fn generate_items<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<StroopItem> {
    (0..count)
        .map(|_| StroopItem {
            word: InkColor::random(rng),
            ink: InkColor::random(rng),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StroopResponse {
    pub ms: f64,
    pub correct: bool,
    pub congruent: bool,
}

#[derive(Debug, Clone)]
pub struct StroopRun {
    items: Vec<StroopItem>,
    responses: Vec<StroopResponse>,
}

impl StroopRun {
    pub fn new(items: Vec<StroopItem>) -> Self {
        Self {
            responses: Vec::with_capacity(items.len()),
            items,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(generate_items(STROOP_ITEMS, rng))
    }

    pub fn current(&self) -> Option<&StroopItem> {
        self.items.get(self.responses.len())
    }

    pub fn is_complete(&self) -> bool {
        self.responses.len() >= self.items.len()
    }

    /// Record the colour picked for the current item, `elapsed` after the
    /// previous response. `None` once every item was answered.
    pub fn pick(&mut self, choice: InkColor, elapsed: Duration) -> Option<bool> {
        let item = *self.current()?;
        let correct = choice == item.ink;
        self.responses.push(StroopResponse {
            ms: elapsed.as_secs_f64() * 1000.0,
            correct,
            congruent: item.is_congruent(),
        });
        Some(correct)
    }

    pub fn responses(&self) -> &[StroopResponse] {
        &self.responses
    }

    pub fn result(&self) -> StroopResult {
        score_responses(&self.responses)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StroopResult {
    pub accuracy: f64,
    pub mean_ms: i64,
    /// Mean incongruent minus mean congruent response time.
    pub interference_ms: i64,
    pub score: u32,
}

/// Score is accuracy in percent less a tenth of the interference, floored
/// at zero. Without trials of one kind, the overall mean stands in for it.
pub fn score_responses(responses: &[StroopResponse]) -> StroopResult {
    if responses.is_empty() {
        return StroopResult {
            accuracy: 0.0,
            mean_ms: 0,
            interference_ms: 0,
            score: 0,
        };
    }
    let correct = responses.iter().filter(|r| r.correct).count();
    let accuracy = correct as f64 / responses.len() as f64;
    let times = |congruent: Option<bool>| -> Vec<f64> {
        responses
            .iter()
            .filter(|r| congruent.map_or(true, |c| r.congruent == c))
            .map(|r| r.ms)
            .collect()
    };
    let mean_all = mean(&times(None));
    let mean_of = |xs: Vec<f64>| if xs.is_empty() { mean_all } else { mean(&xs) };
    let interference = mean_of(times(Some(false))) - mean_of(times(Some(true)));
    let score = (accuracy * 100.0 - interference / 10.0).round().max(0.0) as u32;

    StroopResult {
        accuracy: round3(accuracy),
        mean_ms: mean_all.round() as i64,
        interference_ms: interference.round() as i64,
        score,
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn item(word: InkColor, ink: InkColor) -> StroopItem {
        StroopItem { word, ink }
    }

    #[test]
    fn test_colour_parse_and_display() {
        assert_eq!("green".parse::<InkColor>().unwrap(), InkColor::Green);
        assert_eq!(InkColor::Yellow.to_string(), "YELLOW");
        assert!("purple".parse::<InkColor>().is_err());
    }

    #[test]
    fn test_generated_run_has_full_length() {
        let mut rng = StdRng::seed_from_u64(5);
        let run = StroopRun::random(&mut rng);
        assert_eq!(run.items.len(), STROOP_ITEMS);
        assert!(!run.is_complete());
    }

    #[test]
    fn test_pick_grades_ink_not_word() {
        let mut run = StroopRun::new(vec![item(InkColor::Red, InkColor::Blue)]);
        assert_eq!(run.pick(InkColor::Red, ms(700)), Some(false));
        assert!(run.is_complete());
        assert_eq!(run.pick(InkColor::Blue, ms(700)), None);
        assert!(!run.responses()[0].congruent);
    }

    #[test]
    fn test_interference_lowers_score() {
        use InkColor::*;
        let mut run = StroopRun::new(vec![
            item(Red, Red),
            item(Blue, Blue),
            item(Red, Green),
            item(Yellow, Blue),
        ]);
        run.pick(Red, ms(400));
        run.pick(Blue, ms(400));
        run.pick(Green, ms(600));
        run.pick(Yellow, ms(600));

        let result = run.result();
        assert_eq!(result.accuracy, 0.75);
        assert_eq!(result.mean_ms, 500);
        assert_eq!(result.interference_ms, 200);
        // round(75 - 20)
        assert_eq!(result.score, 55);
    }

    #[test]
    fn test_single_kind_has_no_interference() {
        let mut run = StroopRun::new(vec![item(InkColor::Red, InkColor::Green); 2]);
        run.pick(InkColor::Green, ms(500));
        run.pick(InkColor::Green, ms(900));
        let result = run.result();
        assert_eq!(result.interference_ms, 0);
        assert_eq!(result.mean_ms, 700);
        assert_eq!(result.score, 100);
    }

    #[test]
    fn test_score_floors_at_zero() {
        let responses = [
            StroopResponse {
                ms: 300.0,
                correct: false,
                congruent: true,
            },
            StroopResponse {
                ms: 3000.0,
                correct: false,
                congruent: false,
            },
        ];
        assert_eq!(score_responses(&responses).score, 0);
        assert_eq!(score_responses(&[]).score, 0);
    }

    #[test]
    fn test_result_field_names() {
        let fields = serde_json::to_value(score_responses(&[])).unwrap();
        assert!(fields.get("meanMs").is_some());
        assert!(fields.get("interferenceMs").is_some());
    }
}
