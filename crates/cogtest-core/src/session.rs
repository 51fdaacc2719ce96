//! One run of the naming test: present each selected item, grade the typed
//! answers, and score the result.

use serde::Serialize;
use serde_json::{json, Value};

use crate::grader;
use crate::item::{CatalogItem, Tier};
use crate::progress::ProgressTracker;
use crate::resolver::{ImageReference, ImageResolver, LoadEvent, Resolution};
use crate::selection::{Difficulty, TestConfiguration};

/// What happened to a submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Blank input; nothing recorded.
    Blank,
    /// Every item already has an answer.
    Finished,
    Graded { correct: bool },
}

#[derive(Debug, Clone)]
struct Slot<'c> {
    item: &'c CatalogItem,
    image: Resolution,
    answer: Option<String>,
    correct: bool,
}

pub struct NamingSession<'c> {
    config: TestConfiguration,
    slots: Vec<Slot<'c>>,
    current: usize,
}

impl<'c> NamingSession<'c> {
    /// Pair each selected item with its already resolved image.
    pub fn new(config: TestConfiguration, items: Vec<(&'c CatalogItem, Resolution)>) -> Self {
        let slots = items
            .into_iter()
            .map(|(item, image)| Slot {
                item,
                image,
                answer: None,
                correct: false,
            })
            .collect();
        Self {
            config,
            slots,
            current: 0,
        }
    }

    /// Resolve images one by one, reporting progress, then start the session.
    pub fn prepare<F>(
        config: TestConfiguration,
        items: &[&'c CatalogItem],
        resolver: &ImageResolver<'_>,
        on_event: F,
    ) -> Self
    where
        F: FnMut(LoadEvent<'c>),
    {
        let images = resolver.load_sequential(items, on_event);
        Self::new(config, items.iter().copied().zip(images).collect())
    }

    pub fn config(&self) -> &TestConfiguration {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Zero-based index of the item awaiting an answer.
    pub fn position(&self) -> usize {
        self.current
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.slots.len()
    }

    pub fn current_item(&self) -> Option<&'c CatalogItem> {
        self.slots.get(self.current).map(|s| s.item)
    }

    pub fn current_image(&self) -> Option<&Resolution> {
        self.slots.get(self.current).map(|s| &s.image)
    }

    /// Ask for a different picture of the current item.
    pub fn reload_current_image(&mut self, resolver: &ImageResolver<'_>) -> Option<&ImageReference> {
        let slot = self.slots.get_mut(self.current)?;
        slot.image = resolver.resolve_traced(slot.item, true);
        Some(&slot.image.reference)
    }

    pub fn submit(&mut self, answer: &str) -> Submission {
        if answer.trim().is_empty() {
            return Submission::Blank;
        }
        let Some(slot) = self.slots.get_mut(self.current) else {
            return Submission::Finished;
        };
        let correct = grader::is_match(answer, &slot.item.accepted_names());
        slot.answer = Some(answer.to_string());
        slot.correct = correct;
        self.current += 1;
        Submission::Graded { correct }
    }

    /// Score the session. Items left unanswered count as wrong.
    pub fn finish(self) -> SessionResult<'c> {
        let entries: Vec<SessionEntry<'c>> = self
            .slots
            .into_iter()
            .map(|slot| SessionEntry {
                item: slot.item,
                answer: slot.answer.unwrap_or_default(),
                correct: slot.correct,
            })
            .collect();
        SessionResult {
            config: self.config,
            entries,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionEntry<'c> {
    pub item: &'c CatalogItem,
    pub answer: String,
    pub correct: bool,
}

/// Tier level, or `"mixed"`, matching the per-animal `difficulty` field.
fn difficulty_value(difficulty: Difficulty) -> Value {
    match difficulty.tier() {
        Some(tier) => json!(tier.level()),
        None => json!("mixed"),
    }
}

fn tier_weight(tier: Tier) -> u32 {
    u32::from(tier.level())
}

#[derive(Debug, Clone)]
pub struct SessionResult<'c> {
    pub config: TestConfiguration,
    pub entries: Vec<SessionEntry<'c>>,
}

impl SessionResult<'_> {
    pub fn raw_score(&self) -> usize {
        self.entries.iter().filter(|e| e.correct).count()
    }

    pub fn max_score(&self) -> usize {
        self.entries.len()
    }

    pub fn accuracy(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        self.raw_score() as f64 / self.max_score() as f64
    }

    /// Percentage of tier weight answered correctly, rounded.
    pub fn weighted_score(&self) -> u32 {
        let total: u32 = self.entries.iter().map(|e| tier_weight(e.item.tier)).sum();
        if total == 0 {
            return 0;
        }
        let earned: u32 = self
            .entries
            .iter()
            .filter(|e| e.correct)
            .map(|e| tier_weight(e.item.tier))
            .sum();
        (100.0 * f64::from(earned) / f64::from(total)).round() as u32
    }

    pub fn item_ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.item.id).collect()
    }

    pub fn correct_ids(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.correct)
            .map(|e| e.item.id)
            .collect()
    }

    pub fn record_into(&self, progress: &ProgressTracker<'_>) {
        progress.record_session(self.item_ids(), self.correct_ids());
    }

    /// Fields stored in the results history for this run.
    pub fn history_fields(&self) -> Value {
        let items: Vec<Value> = self
            .entries
            .iter()
            .map(|e| json!({"id": e.item.id, "name": e.item.name, "difficulty": e.item.tier.level()}))
            .collect();
        json!({
            "score": self.weighted_score(),
            "rawScore": self.raw_score(),
            "maxScore": self.max_score(),
            "accuracy": self.accuracy(),
            "answers": self.entries.iter().map(|e| e.answer.as_str()).collect::<Vec<_>>(),
            "correctAnswers": self.entries.iter().map(|e| e.correct).collect::<Vec<_>>(),
            "mode": self.config.mode,
            "difficulty": difficulty_value(self.config.difficulty),
            "animals": items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::resolver::ImageSource;
    use crate::selection::TestMode;
    use crate::store::MemoryKv;

    fn placeholder() -> Resolution {
        Resolution {
            reference: ImageReference::Remote("https://robohash.org/x".into()),
            source: ImageSource::Placeholder,
        }
    }

    fn session(ids: &[&str]) -> NamingSession<'static> {
        let catalog = Catalog::builtin();
        let items = ids
            .iter()
            .map(|id| (catalog.find(id).unwrap(), placeholder()))
            .collect();
        NamingSession::new(
            TestConfiguration::new(TestMode::Fixed, ids.len(), Difficulty::Mixed),
            items,
        )
    }

    #[test]
    fn test_submit_grades_and_advances() {
        let mut s = session(&["lion", "camel", "rhinoceros"]);
        assert_eq!(s.current_item().unwrap().id, "lion");
        assert_eq!(s.submit("  a LION "), Submission::Graded { correct: true });
        assert_eq!(s.submit("horse"), Submission::Graded { correct: false });
        assert_eq!(s.submit("rhino"), Submission::Graded { correct: true });
        assert!(s.is_complete());
        assert_eq!(s.submit("extra"), Submission::Finished);
    }

    #[test]
    fn test_blank_answer_rejected() {
        let mut s = session(&["lion"]);
        assert_eq!(s.submit("   "), Submission::Blank);
        assert_eq!(s.position(), 0);
    }

    #[test]
    fn test_scores() {
        // lion and camel are medium, okapi is hard.
        let mut s = session(&["lion", "camel", "okapi"]);
        s.submit("lion");
        s.submit("dog");
        s.submit("okapi");
        let result = s.finish();
        assert_eq!(result.raw_score(), 2);
        assert_eq!(result.max_score(), 3);
        assert!((result.accuracy() - 2.0 / 3.0).abs() < 1e-9);
        // (2 + 3) / (2 + 2 + 3)
        assert_eq!(result.weighted_score(), 71);
    }

    #[test]
    fn test_unanswered_items_count_as_wrong() {
        let mut s = session(&["cat", "dog"]);
        s.submit("cat");
        let result = s.finish();
        assert_eq!(result.correct_ids(), vec!["cat"]);
        assert_eq!(result.entries[1].answer, "");
        assert_eq!(result.weighted_score(), 50);
    }

    #[test]
    fn test_empty_session_scores_zero() {
        let result = session(&[]).finish();
        assert_eq!(result.weighted_score(), 0);
        assert_eq!(result.accuracy(), 0.0);
    }

    #[test]
    fn test_record_into_progress() {
        let kv = MemoryKv::new();
        let progress = ProgressTracker::new(&kv);
        let mut s = session(&["lion", "camel", "rhinoceros"]);
        s.submit("lion");
        s.submit("camel");
        s.submit("zebra");
        s.finish().record_into(&progress);

        let stats = progress.stats();
        assert_eq!(stats.seen_count, 3);
        assert_eq!(stats.correct_count, 2);
        assert_eq!(stats.tests_completed, 1);
    }

    #[test]
    fn test_history_fields() {
        let mut s = session(&["cat"]);
        s.submit("kitten");
        let fields = s.finish().history_fields();
        assert_eq!(fields["score"], 100);
        assert_eq!(fields["rawScore"], 1);
        assert_eq!(fields["mode"], "fixed");
        assert_eq!(fields["animals"][0]["id"], "cat");
        assert_eq!(fields["answers"][0], "kitten");
        assert_eq!(fields["difficulty"], "mixed");
    }

    #[test]
    fn test_history_difficulty_is_tier_level() {
        let catalog = Catalog::builtin();
        let s = NamingSession::new(
            TestConfiguration::new(TestMode::Random, 1, Tier::Hard.into()),
            vec![(catalog.find("okapi").unwrap(), placeholder())],
        );
        let fields = s.finish().history_fields();
        assert_eq!(fields["difficulty"], 3);
        assert_eq!(fields["animals"][0]["difficulty"], 3);
    }
}
