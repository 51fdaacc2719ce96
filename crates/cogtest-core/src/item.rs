use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Easy,
    Medium,
    Hard,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Easy, Tier::Medium, Tier::Hard];

    /// 1 for Easy through 3 for Hard. Also the scoring weight.
    pub fn level(self) -> u8 {
        match self {
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 3,
        }
    }

    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::Easy),
            2 => Some(Self::Medium),
            3 => Some(Self::Hard),
            _ => None,
        }
    }

    /// Nearest tier for a skill estimate; halves round up.
    pub fn from_skill(skill: f64) -> Self {
        let level = skill.round().clamp(1.0, 3.0) as u8;
        Self::from_level(level).unwrap_or(Self::Easy)
    }

    pub fn easier(self) -> Option<Self> {
        Self::from_level(self.level() - 1)
    }

    pub fn harder(self) -> Option<Self> {
        Self::from_level(self.level() + 1)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        })
    }
}

impl std::str::FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" | "1" => Ok(Self::Easy),
            "medium" | "2" => Ok(Self::Medium),
            "hard" | "3" => Ok(Self::Hard),
            _ => Err(format!("invalid tier: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Mammal,
    Bird,
    Reptile,
    Amphibian,
    Fish,
    Insect,
    Other,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Mammal => "mammal",
            Self::Bird => "bird",
            Self::Reptile => "reptile",
            Self::Amphibian => "amphibian",
            Self::Fish => "fish",
            Self::Insect => "insect",
            Self::Other => "other",
        })
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mammal" => Ok(Self::Mammal),
            "bird" => Ok(Self::Bird),
            "reptile" => Ok(Self::Reptile),
            "amphibian" => Ok(Self::Amphibian),
            "fish" => Ok(Self::Fish),
            "insect" => Ok(Self::Insect),
            "other" => Ok(Self::Other),
            _ => Err(format!("invalid category: {s}")),
        }
    }
}

/// One animal that can be shown in a naming test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogItem {
    pub id: &'static str,
    pub name: &'static str,
    pub synonyms: &'static [&'static str],
    pub tier: Tier,
    pub category: Category,
    /// Familiarity, 1 (obscure) to 10 (everyday).
    pub popularity: u8,
    /// Key into the bundled asset registry.
    pub asset: Option<&'static str>,
    /// Phrase sent to external image sources and used as the cache key.
    pub search_phrase: &'static str,
}

impl CatalogItem {
    /// Primary name followed by the synonyms.
    pub fn accepted_names(&self) -> Vec<&'static str> {
        std::iter::once(self.name)
            .chain(self.synonyms.iter().copied())
            .collect()
    }

    pub fn has_asset(&self) -> bool {
        self.asset.is_some()
    }
}
