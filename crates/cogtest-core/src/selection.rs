//! Choosing which catalog items a naming test presents.

use std::fmt;

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Catalog;
use crate::item::{CatalogItem, Tier};
use crate::progress::ProgressRecord;

/// The canonical three-animal battery, in presentation order.
pub const FIXED_IDS: [&str; 3] = ["lion", "camel", "rhinoceros"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestMode {
    Fixed,
    Extended,
    Adaptive,
    Random,
}

impl fmt::Display for TestMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed => write!(f, "fixed"),
            Self::Extended => write!(f, "extended"),
            Self::Adaptive => write!(f, "adaptive"),
            Self::Random => write!(f, "random"),
        }
    }
}

impl std::str::FromStr for TestMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fixed" | "moca" => Ok(Self::Fixed),
            "extended" => Ok(Self::Extended),
            "adaptive" => Ok(Self::Adaptive),
            "random" => Ok(Self::Random),
            _ => Err(format!("invalid test mode: {s}")),
        }
    }
}

/// A single tier, or no tier filter at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Tier(Tier),
    Mixed,
}

impl Difficulty {
    pub fn tier(self) -> Option<Tier> {
        match self {
            Self::Tier(t) => Some(t),
            Self::Mixed => None,
        }
    }
}

impl From<Tier> for Difficulty {
    fn from(tier: Tier) -> Self {
        Self::Tier(tier)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tier(t) => write!(f, "{t}"),
            Self::Mixed => write!(f, "mixed"),
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("mixed") {
            return Ok(Self::Mixed);
        }
        s.parse::<Tier>()
            .map(Self::Tier)
            .map_err(|_| format!("invalid difficulty: {s}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestConfiguration {
    pub mode: TestMode,
    pub count: usize,
    pub difficulty: Difficulty,
    /// Carried for callers; no strategy samples with replacement.
    pub allow_repeats: bool,
}

impl TestConfiguration {
    pub fn new(mode: TestMode, count: usize, difficulty: Difficulty) -> Self {
        Self {
            mode,
            count,
            difficulty,
            allow_repeats: false,
        }
    }
}

/// Picks a configuration suited to how much the user has practised.
pub fn recommended_config(progress: &ProgressRecord) -> TestConfiguration {
    match progress.tests_completed {
        0 => TestConfiguration::new(TestMode::Fixed, 3, Tier::Medium.into()),
        1..=4 => TestConfiguration::new(TestMode::Extended, 5, Difficulty::Mixed),
        _ => TestConfiguration::new(
            TestMode::Adaptive,
            8,
            Tier::from_skill(progress.skill).into(),
        ),
    }
}

pub struct SelectionPolicy<'a> {
    catalog: Catalog<'a>,
}

impl<'a> SelectionPolicy<'a> {
    pub fn new(catalog: Catalog<'a>) -> Self {
        Self { catalog }
    }

    /// Ordered items for one test. Never longer than `config.count` except in
    /// fixed mode; shorter when the filtered pool is smaller.
    pub fn select_items<R: Rng + ?Sized>(
        &self,
        config: &TestConfiguration,
        progress: &ProgressRecord,
        rng: &mut R,
    ) -> Vec<&'a CatalogItem> {
        let items = match config.mode {
            TestMode::Fixed => self.fixed(),
            TestMode::Random => self.random(config.count, config.difficulty, rng),
            TestMode::Extended => self.extended(config.count, config.difficulty, rng),
            TestMode::Adaptive => self.adaptive(config.count, progress, rng),
        };
        debug!(
            mode = %config.mode,
            requested = config.count,
            selected = items.len(),
            "selected items"
        );
        items
    }

    fn fixed(&self) -> Vec<&'a CatalogItem> {
        FIXED_IDS
            .iter()
            .filter_map(|id| self.catalog.find(id))
            .collect()
    }

    fn random<R: Rng + ?Sized>(
        &self,
        count: usize,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Vec<&'a CatalogItem> {
        let pool = match difficulty.tier() {
            Some(tier) => self.catalog.by_tier(tier),
            None => self.catalog.all(),
        };
        shuffled_take(pool, count, rng)
    }

    fn extended<R: Rng + ?Sized>(
        &self,
        count: usize,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Vec<&'a CatalogItem> {
        let pool: Vec<&'a CatalogItem> = match difficulty.tier() {
            None => {
                // 40% from the core list, rounded up.
                let core_count = count.saturating_mul(2).div_ceil(5);
                let extended_count = count.saturating_sub(core_count);
                let mut pool = shuffled_take(self.catalog.core().iter().collect(), core_count, rng);
                pool.extend(shuffled_take(
                    self.catalog.extended().iter().collect(),
                    extended_count,
                    rng,
                ));
                pool
            }
            Some(tier) => self
                .catalog
                .core()
                .iter()
                .chain(self.catalog.extended())
                .filter(|item| item.tier == tier)
                .collect(),
        };
        shuffled_take(pool, count, rng)
    }

    fn adaptive<R: Rng + ?Sized>(
        &self,
        count: usize,
        progress: &ProgressRecord,
        rng: &mut R,
    ) -> Vec<&'a CatalogItem> {
        let tier = Tier::from_skill(progress.skill);
        let mut pool = self.catalog.by_tier(tier);

        if pool.len() > count && !progress.seen.is_empty() {
            let unseen: Vec<_> = pool
                .iter()
                .copied()
                .filter(|item| !progress.seen.contains(item.id))
                .collect();
            if unseen.len() >= count {
                pool = unseen;
            }
        }

        if pool.len() < count {
            debug!(%tier, pool = pool.len(), "tier pool too small, using random selection");
            return self.random(count, tier.into(), rng);
        }

        let mut selected = shuffled_take(pool, count, rng);
        if count >= 3 {
            let len = selected.len();
            if let Some(easier) = tier.easier() {
                if let Some(item) = self.catalog.by_tier(easier).choose(rng) {
                    selected[len - 1] = *item;
                }
            }
            if count >= 4 {
                if let Some(harder) = tier.harder() {
                    if let Some(item) = self.catalog.by_tier(harder).choose(rng) {
                        selected[len - 2] = *item;
                    }
                }
            }
        }
        selected
    }
}

fn shuffled_take<'a, R: Rng + ?Sized>(
    mut pool: Vec<&'a CatalogItem>,
    count: usize,
    rng: &mut R,
) -> Vec<&'a CatalogItem> {
    pool.shuffle(rng);
    pool.truncate(count);
    pool
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::item::Category;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    fn policy() -> SelectionPolicy<'static> {
        SelectionPolicy::new(Catalog::builtin())
    }

    fn ids(items: &[&CatalogItem]) -> Vec<&'static str> {
        items.iter().map(|i| i.id).collect()
    }

    const fn animal(id: &'static str, tier: Tier) -> CatalogItem {
        CatalogItem {
            id,
            name: id,
            synonyms: &[],
            tier,
            category: Category::Mammal,
            popularity: 5,
            asset: None,
            search_phrase: id,
        }
    }

    static SMALL_CORE: &[CatalogItem] = &[
        animal("e1", Tier::Easy),
        animal("e2", Tier::Easy),
        animal("m1", Tier::Medium),
        animal("m2", Tier::Medium),
        animal("m3", Tier::Medium),
        animal("m4", Tier::Medium),
        animal("m5", Tier::Medium),
    ];

    static SMALL_EXTENDED: &[CatalogItem] = &[
        animal("m6", Tier::Medium),
        animal("m7", Tier::Medium),
        animal("m8", Tier::Medium),
        animal("m9", Tier::Medium),
        animal("m10", Tier::Medium),
        animal("h1", Tier::Hard),
        animal("h2", Tier::Hard),
    ];

    fn small_policy() -> SelectionPolicy<'static> {
        SelectionPolicy::new(Catalog::new(SMALL_CORE, SMALL_EXTENDED))
    }

    #[test]
    fn test_fixed_mode_is_constant() {
        let policy = policy();
        let progress = ProgressRecord::default();
        let mut rng = rng();
        for (count, difficulty) in [
            (1, Difficulty::Mixed),
            (10, Tier::Hard.into()),
            (0, Tier::Easy.into()),
        ] {
            let config = TestConfiguration::new(TestMode::Fixed, count, difficulty);
            let items = policy.select_items(&config, &progress, &mut rng);
            assert_eq!(ids(&items), FIXED_IDS.to_vec());
        }
    }

    #[test]
    fn test_random_mode_respects_tier_and_count() {
        let policy = policy();
        let easy_pool = Catalog::builtin().by_tier(Tier::Easy).len();
        let mut rng = rng();
        for count in [0, 1, 5, easy_pool, easy_pool + 10] {
            let config = TestConfiguration::new(TestMode::Random, count, Tier::Easy.into());
            let items = policy.select_items(&config, &ProgressRecord::default(), &mut rng);
            assert_eq!(items.len(), count.min(easy_pool));
            assert!(items.iter().all(|i| i.tier == Tier::Easy));
            let unique: HashSet<_> = items.iter().map(|i| i.id).collect();
            assert_eq!(unique.len(), items.len());
        }
    }

    #[test]
    fn test_random_mixed_draws_from_whole_catalog() {
        let config = TestConfiguration::new(TestMode::Random, 1000, Difficulty::Mixed);
        let items = policy().select_items(&config, &ProgressRecord::default(), &mut rng());
        assert_eq!(items.len(), Catalog::builtin().len());
    }

    #[test]
    fn test_extended_mixed_split() {
        let catalog = Catalog::builtin();
        let config = TestConfiguration::new(TestMode::Extended, 10, Difficulty::Mixed);
        let items = policy().select_items(&config, &ProgressRecord::default(), &mut rng());
        assert_eq!(items.len(), 10);
        let from_core = items
            .iter()
            .filter(|i| catalog.core().iter().any(|c| c.id == i.id))
            .count();
        assert_eq!(from_core, 4);
    }

    #[test]
    fn test_extended_mixed_rounds_core_share_up() {
        let catalog = Catalog::builtin();
        let config = TestConfiguration::new(TestMode::Extended, 3, Difficulty::Mixed);
        let items = policy().select_items(&config, &ProgressRecord::default(), &mut rng());
        let from_core = items
            .iter()
            .filter(|i| catalog.core().iter().any(|c| c.id == i.id))
            .count();
        assert_eq!(items.len(), 3);
        assert_eq!(from_core, 2);
    }

    #[test]
    fn test_huge_count_returns_whole_pool() {
        let catalog = Catalog::builtin();
        let progress = ProgressRecord::default();
        for mode in [TestMode::Extended, TestMode::Random, TestMode::Adaptive] {
            let config = TestConfiguration::new(mode, usize::MAX, Difficulty::Mixed);
            let items = policy().select_items(&config, &progress, &mut rng());
            assert!(!items.is_empty());
            assert!(items.len() <= catalog.len());
        }
        let config = TestConfiguration::new(TestMode::Extended, usize::MAX, Difficulty::Mixed);
        let items = policy().select_items(&config, &progress, &mut rng());
        assert_eq!(items.len(), catalog.len());
    }

    #[test]
    fn test_extended_single_tier_pools_both_lists() {
        let config = TestConfiguration::new(TestMode::Extended, 100, Tier::Hard.into());
        let items = small_policy().select_items(&config, &ProgressRecord::default(), &mut rng());
        let mut got = ids(&items);
        got.sort_unstable();
        assert_eq!(got, vec!["h1", "h2"]);
    }

    #[test]
    fn test_adaptive_prefers_unseen_and_mixes_tiers() {
        let mut progress = ProgressRecord {
            skill: 2.0,
            ..ProgressRecord::default()
        };
        for id in ["m1", "m2", "m3", "m4", "m5", "m6"] {
            progress.seen.insert(id.to_string());
        }
        let config = TestConfiguration::new(TestMode::Adaptive, 4, Difficulty::Mixed);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let items = small_policy().select_items(&config, &progress, &mut rng);
            assert_eq!(items.len(), 4);
            for item in &items[..2] {
                assert_eq!(item.tier, Tier::Medium);
                assert!(!progress.seen.contains(item.id), "{} was seen", item.id);
            }
            assert_eq!(items[2].tier, Tier::Hard);
            assert_eq!(items[3].tier, Tier::Easy);
        }
    }

    #[test]
    fn test_adaptive_uses_full_pool_when_few_unseen() {
        let mut progress = ProgressRecord {
            skill: 2.0,
            ..ProgressRecord::default()
        };
        for id in ["m1", "m2", "m3", "m4", "m5", "m6", "m7", "m8", "m9"] {
            progress.seen.insert(id.to_string());
        }
        let config = TestConfiguration::new(TestMode::Adaptive, 2, Difficulty::Mixed);
        let items = small_policy().select_items(&config, &progress, &mut rng());
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.tier == Tier::Medium));
    }

    #[test]
    fn test_adaptive_small_tier_pool_uses_random() {
        let progress = ProgressRecord {
            skill: 3.0,
            ..ProgressRecord::default()
        };
        let config = TestConfiguration::new(TestMode::Adaptive, 5, Difficulty::Mixed);
        let items = small_policy().select_items(&config, &progress, &mut rng());
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.tier == Tier::Hard));
    }

    #[test]
    fn test_adaptive_fresh_user() {
        let config = TestConfiguration::new(TestMode::Adaptive, 5, Difficulty::Mixed);
        let items = policy().select_items(&config, &ProgressRecord::default(), &mut rng());
        assert_eq!(items.len(), 5);
        let easy = items.iter().filter(|i| i.tier == Tier::Easy).count();
        assert_eq!(easy, 4);
        assert_eq!(items[3].tier, Tier::Medium);
    }

    #[test]
    fn test_adaptive_small_counts_skip_mixing() {
        let progress = ProgressRecord {
            skill: 2.0,
            ..ProgressRecord::default()
        };
        let config = TestConfiguration::new(TestMode::Adaptive, 2, Difficulty::Mixed);
        let items = small_policy().select_items(&config, &progress, &mut rng());
        assert!(items.iter().all(|i| i.tier == Tier::Medium));
    }

    #[test]
    fn test_recommended_config_progression() {
        let mut progress = ProgressRecord::default();
        let first = recommended_config(&progress);
        assert_eq!(first.mode, TestMode::Fixed);
        assert_eq!(first.count, 3);

        progress.tests_completed = 3;
        let early = recommended_config(&progress);
        assert_eq!(early.mode, TestMode::Extended);
        assert_eq!(early.difficulty, Difficulty::Mixed);
        assert_eq!(early.count, 5);

        progress.tests_completed = 12;
        progress.skill = 2.6;
        let seasoned = recommended_config(&progress);
        assert_eq!(seasoned.mode, TestMode::Adaptive);
        assert_eq!(seasoned.count, 8);
        assert_eq!(seasoned.difficulty, Difficulty::Tier(Tier::Hard));
    }

    #[test]
    fn test_parse_mode_and_difficulty() {
        assert_eq!("MoCA".parse::<TestMode>().unwrap(), TestMode::Fixed);
        assert_eq!("mixed".parse::<Difficulty>().unwrap(), Difficulty::Mixed);
        assert_eq!(
            "2".parse::<Difficulty>().unwrap(),
            Difficulty::Tier(Tier::Medium)
        );
        assert!("impossible".parse::<Difficulty>().is_err());
    }
}
