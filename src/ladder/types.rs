use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::TrackerError;

pub type StepKey = String;

/// Ranked-mode ranks in ascending order. `Legendary` is the peak and has no tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rank {
    Rookie,
    Veteran,
    Elite,
    Pro,
    Master,
    Grandmaster,
    Legendary,
}

impl Rank {
    pub const TIERED: [Rank; 6] = [
        Rank::Rookie,
        Rank::Veteran,
        Rank::Elite,
        Rank::Pro,
        Rank::Master,
        Rank::Grandmaster,
    ];

    pub const PEAK: Rank = Rank::Legendary;

    pub fn name(self) -> &'static str {
        match self {
            Rank::Rookie => "Rookie",
            Rank::Veteran => "Veteran",
            Rank::Elite => "Elite",
            Rank::Pro => "Pro",
            Rank::Master => "Master",
            Rank::Grandmaster => "Grandmaster",
            Rank::Legendary => "Legendary",
        }
    }

    pub fn is_peak(self) -> bool {
        self == Self::PEAK
    }

    /// Case-sensitive lookup among the tiered ranks only
    pub fn tiered_from_name(name: &str) -> Option<Rank> {
        Self::TIERED.into_iter().find(|rank| rank.name() == name)
    }
}

/// Tier within a rank; `I` is where a player enters the rank, `V` is the last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    I,
    II,
    III,
    IV,
    V,
}

impl Tier {
    pub const ALL: [Tier; 5] = [Tier::I, Tier::II, Tier::III, Tier::IV, Tier::V];

    pub fn label(self) -> &'static str {
        match self {
            Tier::I => "I",
            Tier::II => "II",
            Tier::III => "III",
            Tier::IV => "IV",
            Tier::V => "V",
        }
    }

    pub fn from_label(label: &str) -> Option<Tier> {
        Self::ALL.into_iter().find(|tier| tier.label() == label)
    }
}

/// One chargeable unit of progression.
///
/// A tiered step always has a tier and the peak step never does; the
/// constructors are the only way to build one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Step {
    rank: Rank,
    tier: Option<Tier>,
}

impl Step {
    pub fn tiered(rank: Rank, tier: Tier) -> Option<Step> {
        if rank.is_peak() {
            return None;
        }
        Some(Step {
            rank,
            tier: Some(tier),
        })
    }

    pub fn peak() -> Step {
        Step {
            rank: Rank::PEAK,
            tier: None,
        }
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn tier(&self) -> Option<Tier> {
        self.tier
    }

    pub fn is_peak(&self) -> bool {
        self.tier.is_none()
    }

    /// `"{rank}-{tier}"` for tiered steps, `"{rank}"` for the peak
    pub fn key(&self) -> StepKey {
        self.to_string()
    }

    /// Inverse of [`Step::key`]; exact match only
    pub fn from_key(key: &str) -> Option<Step> {
        if key == Rank::PEAK.name() {
            return Some(Step::peak());
        }
        let (rank, tier) = key.split_once('-')?;
        Step::tiered(Rank::tiered_from_name(rank)?, Tier::from_label(tier)?)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tier {
            Some(tier) => write!(f, "{}-{}", self.rank.name(), tier.label()),
            None => f.write_str(self.rank.name()),
        }
    }
}

impl TryFrom<String> for Step {
    type Error = TrackerError;

    fn try_from(key: String) -> Result<Self, Self::Error> {
        Step::from_key(&key).ok_or(TrackerError::UnsupportedStep(key))
    }
}

impl From<Step> for String {
    fn from(step: Step) -> Self {
        step.key()
    }
}
