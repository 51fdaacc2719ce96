//! Append-only log of finished test runs, grouped by test.
//!
//! Stored under [`RESULTS_KEY`] as `{"<test id>": [{"when": ..., ...}, ...]}`.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{CogError, CogResult};
use crate::store::KvStore;

pub const RESULTS_KEY: &str = "results";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TestKind {
    ReactionTime,
    NBack,
    DigitSpan,
    Stroop,
    AnimalNaming,
}

impl TestKind {
    pub const ALL: [TestKind; 5] = [
        TestKind::ReactionTime,
        TestKind::NBack,
        TestKind::DigitSpan,
        TestKind::Stroop,
        TestKind::AnimalNaming,
    ];

    /// Key used in the persisted log.
    pub fn id(self) -> &'static str {
        match self {
            Self::ReactionTime => "rt",
            Self::NBack => "nback",
            Self::DigitSpan => "digit",
            Self::Stroop => "stroop",
            Self::AnimalNaming => "animal",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::ReactionTime => "Reaction Time",
            Self::NBack => "2-Back Memory",
            Self::DigitSpan => "Digit Span",
            Self::Stroop => "Stroop Test",
            Self::AnimalNaming => "Animal Naming",
        }
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl std::str::FromStr for TestKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TestKind::ALL
            .into_iter()
            .find(|k| k.id() == s)
            .ok_or_else(|| format!("unknown test: {s}"))
    }
}

/// One finished run. Fields other than `when` are test-specific.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub when: DateTime<Utc>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl TestResult {
    fn number(&self, key: &str) -> Option<f64> {
        self.fields.get(key).and_then(Value::as_f64)
    }

    /// Single "higher is better" number summarizing a run.
    pub fn summary_score(&self, kind: TestKind) -> f64 {
        match kind {
            TestKind::ReactionTime => self
                .number("meanMs")
                .map(|ms| (1000.0 - ms).max(0.0))
                .unwrap_or(0.0),
            TestKind::NBack => self
                .number("accuracy")
                .map(|a| (a * 100.0).round())
                .unwrap_or(0.0),
            TestKind::DigitSpan => self.number("maxSpan").unwrap_or(0.0),
            TestKind::Stroop => self.number("score").unwrap_or(0.0),
            TestKind::AnimalNaming => self
                .number("score")
                .filter(|s| *s != 0.0)
                .or_else(|| self.number("rawScore"))
                .unwrap_or(0.0),
        }
    }
}

pub type ResultsLog = BTreeMap<String, Vec<TestResult>>;

pub struct ResultsHistory<'s> {
    store: &'s dyn KvStore,
}

impl<'s> ResultsHistory<'s> {
    pub fn new(store: &'s dyn KvStore) -> Self {
        Self { store }
    }

    /// The whole log. Unreadable data is logged and treated as empty.
    pub fn load(&self) -> ResultsLog {
        match self.store.get(RESULTS_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("unreadable results log, ignoring: {e}");
                ResultsLog::new()
            }),
            Ok(None) => ResultsLog::new(),
            Err(e) => {
                warn!("cannot load results: {e}");
                ResultsLog::new()
            }
        }
    }

    pub fn for_test(&self, kind: TestKind) -> Vec<TestResult> {
        self.load().remove(kind.id()).unwrap_or_default()
    }

    /// Append a run. `fields` must serialize to a JSON object.
    pub fn add(&self, kind: TestKind, fields: impl Serialize, when: DateTime<Utc>) -> CogResult<TestResult> {
        let fields = match serde_json::to_value(fields)? {
            Value::Object(map) => map,
            other => {
                return Err(CogError::InvalidInput(format!(
                    "result fields must be an object, got {other}"
                )))
            }
        };
        let result = TestResult { when, fields };
        let mut log = self.load();
        log.entry(kind.id().to_string())
            .or_default()
            .push(result.clone());
        self.save(&log)?;
        Ok(result)
    }

    /// Drop every run of one test. Returns how many were removed.
    pub fn clear_test(&self, kind: TestKind) -> CogResult<usize> {
        let mut log = self.load();
        let removed = log.remove(kind.id()).map_or(0, |runs| runs.len());
        if removed > 0 {
            self.save(&log)?;
        }
        Ok(removed)
    }

    pub fn clear_all(&self) -> CogResult<()> {
        self.store.remove(RESULTS_KEY)
    }

    fn save(&self, log: &ResultsLog) -> CogResult<()> {
        self.store.set(RESULTS_KEY, &serde_json::to_string(log)?)
    }
}

pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Population standard deviation.
pub fn stdev(xs: &[f64]) -> f64 {
    let m = mean(xs);
    let squares: Vec<f64> = xs.iter().map(|x| (x - m).powi(2)).collect();
    mean(&squares).sqrt()
}
