use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::store::KvStore;

pub const PROGRESS_KEY: &str = "progress";

pub const MIN_SKILL: f64 = 1.0;
pub const MAX_SKILL: f64 = 3.0;
const SKILL_STEP: f64 = 0.1;

/// Everything remembered about the user between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressRecord {
    pub seen: BTreeSet<String>,
    pub correct: BTreeSet<String>,
    pub skill: f64,
    pub tests_completed: u32,
}

impl Default for ProgressRecord {
    fn default() -> Self {
        Self {
            seen: BTreeSet::new(),
            correct: BTreeSet::new(),
            skill: MIN_SKILL,
            tests_completed: 0,
        }
    }
}

impl ProgressRecord {
    /// Fold one finished session into the record.
    ///
    /// Correct ids that were not part of the session are ignored so that
    /// `correct` stays a subset of `seen`.
    pub fn apply_session<I, C>(&mut self, item_ids: I, correct_ids: C)
    where
        I: IntoIterator,
        I::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let items: BTreeSet<String> = item_ids.into_iter().map(Into::into).collect();
        let answered: BTreeSet<String> = correct_ids.into_iter().map(Into::into).collect();
        let mut correct = 0usize;
        for id in answered {
            if items.contains(&id) {
                correct += 1;
                self.correct.insert(id);
            } else {
                warn!("ignoring correct id {id} that was not in the session");
            }
        }
        let total = items.len();
        self.seen.extend(items);
        self.tests_completed = self.tests_completed.saturating_add(1);

        if total == 0 {
            return;
        }
        let accuracy = correct as f64 / total as f64;
        if accuracy >= 0.8 && self.skill < MAX_SKILL {
            self.skill += SKILL_STEP;
        } else if accuracy < 0.5 && self.skill > MIN_SKILL {
            self.skill -= SKILL_STEP;
        }
        self.skill = self.skill.clamp(MIN_SKILL, MAX_SKILL);
    }

    pub fn stats(&self) -> ProgressStats {
        let seen_count = self.seen.len();
        let correct_count = self.correct.len();
        ProgressStats {
            seen_count,
            correct_count,
            accuracy: if seen_count > 0 {
                correct_count as f64 / seen_count as f64
            } else {
                0.0
            },
            skill_estimate: self.skill,
            tests_completed: self.tests_completed,
        }
    }

    fn sanitize(mut self) -> Self {
        let seen = &self.seen;
        self.correct.retain(|id| seen.contains(id));
        if !self.skill.is_finite() {
            self.skill = MIN_SKILL;
        }
        self.skill = self.skill.clamp(MIN_SKILL, MAX_SKILL);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressStats {
    pub seen_count: usize,
    pub correct_count: usize,
    pub accuracy: f64,
    pub skill_estimate: f64,
    pub tests_completed: u32,
}

/// Persistent progress over a [`KvStore`].
///
/// Loads the record lazily and keeps a single cached copy; every mutation is
/// written back before returning. Store failures are logged and the tracker
/// carries on with its in-memory state.
pub struct ProgressTracker<'s> {
    store: &'s dyn KvStore,
    cached: Mutex<Option<ProgressRecord>>,
}

impl<'s> ProgressTracker<'s> {
    pub fn new(store: &'s dyn KvStore) -> Self {
        Self {
            store,
            cached: Mutex::new(None),
        }
    }

    pub fn snapshot(&self) -> ProgressRecord {
        let mut guard = self.lock();
        self.loaded(&mut guard).clone()
    }

    pub fn record_session<I, C>(&self, item_ids: I, correct_ids: C)
    where
        I: IntoIterator,
        I::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let mut guard = self.lock();
        let record = self.loaded(&mut guard);
        record.apply_session(item_ids, correct_ids);
        debug!(
            skill = record.skill,
            tests = record.tests_completed,
            "progress updated"
        );
        self.save(record);
    }

    pub fn stats(&self) -> ProgressStats {
        let mut guard = self.lock();
        self.loaded(&mut guard).stats()
    }

    pub fn reset(&self) {
        let mut guard = self.lock();
        let record = guard.insert(ProgressRecord::default());
        self.save(record);
    }

    fn lock(&self) -> MutexGuard<'_, Option<ProgressRecord>> {
        // The record is plain data; a panic mid-update cannot leave it torn
        // in a way later readers care about.
        self.cached.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn loaded<'g>(&self, slot: &'g mut Option<ProgressRecord>) -> &'g mut ProgressRecord {
        slot.get_or_insert_with(|| self.load())
    }

    fn load(&self) -> ProgressRecord {
        match self.store.get(PROGRESS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<ProgressRecord>(&raw) {
                Ok(record) => record.sanitize(),
                Err(e) => {
                    warn!("unreadable progress record, starting fresh: {e}");
                    ProgressRecord::default()
                }
            },
            Ok(None) => ProgressRecord::default(),
            Err(e) => {
                warn!("cannot load progress: {e}");
                ProgressRecord::default()
            }
        }
    }

    fn save(&self, record: &ProgressRecord) {
        let raw = match serde_json::to_string(record) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("cannot serialize progress: {e}");
                return;
            }
        };
        if let Err(e) = self.store.set(PROGRESS_KEY, &raw) {
            warn!("cannot save progress: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CogError, CogResult};
    use crate::store::MemoryKv;

    struct BrokenKv;

    impl KvStore for BrokenKv {
        fn get(&self, _key: &str) -> CogResult<Option<String>> {
            Err(CogError::Store("disk on fire".into()))
        }
        fn set(&self, _key: &str, _value: &str) -> CogResult<()> {
            Err(CogError::Store("disk on fire".into()))
        }
        fn remove(&self, _key: &str) -> CogResult<()> {
            Err(CogError::Store("disk on fire".into()))
        }
        fn list_keys(&self) -> CogResult<Vec<String>> {
            Err(CogError::Store("disk on fire".into()))
        }
        fn remove_many(&self, _keys: &[String]) -> CogResult<usize> {
            Err(CogError::Store("disk on fire".into()))
        }
    }

    #[test]
    fn test_fresh_record_defaults() {
        let kv = MemoryKv::new();
        let tracker = ProgressTracker::new(&kv);
        let stats = tracker.stats();
        assert_eq!(stats.seen_count, 0);
        assert_eq!(stats.correct_count, 0);
        assert_eq!(stats.accuracy, 0.0);
        assert_eq!(stats.skill_estimate, 1.0);
        assert_eq!(stats.tests_completed, 0);
    }

    #[test]
    fn test_record_session_counts() {
        let kv = MemoryKv::new();
        let tracker = ProgressTracker::new(&kv);
        tracker.record_session(["a", "b", "c"], ["a", "b"]);

        let stats = tracker.stats();
        assert_eq!(stats.seen_count, 3);
        assert_eq!(stats.correct_count, 2);
        assert_eq!(stats.tests_completed, 1);
        assert!((stats.accuracy - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_union_semantics() {
        let kv = MemoryKv::new();
        let tracker = ProgressTracker::new(&kv);
        tracker.record_session(["a", "b", "c"], ["a", "b"]);
        tracker.record_session(["b", "c", "d"], ["b"]);

        let stats = tracker.stats();
        assert_eq!(stats.seen_count, 4);
        assert_eq!(stats.correct_count, 2);
        assert_eq!(stats.tests_completed, 2);
    }

    #[test]
    fn test_persisted_across_trackers() {
        let kv = MemoryKv::new();
        ProgressTracker::new(&kv).record_session(["a", "b"], ["a", "b"]);

        let reopened = ProgressTracker::new(&kv);
        let stats = reopened.stats();
        assert_eq!(stats.seen_count, 2);
        assert!((stats.skill_estimate - 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_skill_clamped_high() {
        let mut record = ProgressRecord::default();
        for _ in 0..50 {
            record.apply_session(["a"], ["a"]);
            assert!(record.skill <= MAX_SKILL);
        }
        assert!((record.skill - MAX_SKILL).abs() < 0.1 + 1e-9);
    }

    #[test]
    fn test_skill_clamped_low() {
        let mut record = ProgressRecord {
            skill: 1.25,
            ..ProgressRecord::default()
        };
        for _ in 0..10 {
            record.apply_session(["a", "b", "c"], Vec::<String>::new());
            assert!(record.skill >= MIN_SKILL);
        }
        assert_eq!(record.skill, MIN_SKILL);
    }

    #[test]
    fn test_middling_accuracy_keeps_skill() {
        let mut record = ProgressRecord::default();
        record.apply_session(["a", "b", "c", "d"], ["a", "b"]);
        assert_eq!(record.skill, MIN_SKILL);
    }

    #[test]
    fn test_stray_correct_ids_ignored() {
        let mut record = ProgressRecord::default();
        record.apply_session(["a"], ["a", "zzz"]);
        assert!(record.correct.is_subset(&record.seen));
        assert!(!record.correct.contains("zzz"));
    }

    #[test]
    fn test_repeated_correct_ids_count_once() {
        let mut record = ProgressRecord::default();
        // One of two right is below the raise threshold however often it repeats.
        record.apply_session(["a", "b"], ["a", "a"]);
        assert_eq!(record.skill, MIN_SKILL);
        assert_eq!(record.correct.len(), 1);

        let mut record = ProgressRecord {
            skill: 2.0,
            ..ProgressRecord::default()
        };
        record.apply_session(["a", "b", "c"], ["a", "a", "a"]);
        assert!((record.skill - 1.9).abs() < 1e-9);
    }

    #[test]
    fn test_empty_session_counts_but_keeps_skill() {
        let mut record = ProgressRecord::default();
        record.apply_session(Vec::<String>::new(), Vec::<String>::new());
        assert_eq!(record.tests_completed, 1);
        assert_eq!(record.skill, MIN_SKILL);
    }

    #[test]
    fn test_reset() {
        let kv = MemoryKv::new();
        let tracker = ProgressTracker::new(&kv);
        tracker.record_session(["a"], ["a"]);
        tracker.reset();
        assert_eq!(tracker.snapshot(), ProgressRecord::default());
        assert_eq!(ProgressTracker::new(&kv).snapshot(), ProgressRecord::default());
    }

    #[test]
    fn test_corrupt_record_falls_back_to_default() {
        let kv = MemoryKv::new();
        kv.set(PROGRESS_KEY, "{not json").unwrap();
        assert_eq!(ProgressTracker::new(&kv).snapshot(), ProgressRecord::default());
    }

    #[test]
    fn test_stored_record_is_sanitized() {
        let kv = MemoryKv::new();
        kv.set(
            PROGRESS_KEY,
            r#"{"seen":["a"],"correct":["a","b"],"skill":7.5,"tests_completed":3}"#,
        )
        .unwrap();
        let record = ProgressTracker::new(&kv).snapshot();
        assert_eq!(record.correct.len(), 1);
        assert_eq!(record.skill, MAX_SKILL);
        assert_eq!(record.tests_completed, 3);
    }

    #[test]
    fn test_broken_store_degrades_to_memory() {
        let tracker = ProgressTracker::new(&BrokenKv);
        tracker.record_session(["a", "b"], ["a"]);
        let stats = tracker.stats();
        assert_eq!(stats.seen_count, 2);
        assert_eq!(stats.tests_completed, 1);
    }
}
