use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ViewerConfig;
use crate::consts::DEFAULT_TIER_BOUNDS;
use crate::error::{PanoramaError, Result};

/// Resolution tier of the displayed asset, ordered from lowest to highest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "hd")]
    Hd,
    #[serde(rename = "4k")]
    FourK,
    #[serde(rename = "6k")]
    SixK,
    #[serde(rename = "8k")]
    EightK,
    #[serde(rename = "ultra")]
    Ultra,
}

impl Tier {
    pub const ALL: [Tier; 5] = [Tier::Hd, Tier::FourK, Tier::SixK, Tier::EightK, Tier::Ultra];

    /// Position in `Tier::ALL`.
    pub fn index(self) -> usize {
        match self {
            Self::Hd => 0,
            Self::FourK => 1,
            Self::SixK => 2,
            Self::EightK => 3,
            Self::Ultra => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Hd => "hd",
            Self::FourK => "4k",
            Self::SixK => "6k",
            Self::EightK => "8k",
            Self::Ultra => "ultra",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tier {
    type Err = PanoramaError;

    fn from_str(s: &str) -> Result<Self> {
        Tier::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PanoramaError::UnknownTier(s.to_string()))
    }
}

/// One row of the catalog: where the asset lives and the scale it starts at.
#[derive(Clone, Debug, PartialEq)]
pub struct TierEntry {
    pub tier: Tier,
    pub locator: String,
    /// Inclusive lower zoom-scale bound.
    pub min_scale: f32,
}

/// Immutable tier -> asset lookup table.
///
/// Always holds exactly one entry per [`Tier`], in tier order, with strictly
/// increasing lower bounds. The lowest tier also covers every scale below its
/// own bound, so [`ResolutionCatalog::tier_for_scale`] is total.
#[derive(Clone, Debug)]
pub struct ResolutionCatalog {
    entries: Vec<TierEntry>,
}

impl ResolutionCatalog {
    pub fn from_entries(mut entries: Vec<TierEntry>) -> Result<Self> {
        if entries.len() != Tier::ALL.len() {
            return Err(PanoramaError::InvalidCatalog(format!(
                "expected {} tiers, got {}",
                Tier::ALL.len(),
                entries.len()
            )));
        }

        entries.sort_by_key(|e| e.tier);
        for (expected, entry) in Tier::ALL.iter().zip(&entries) {
            if entry.tier != *expected {
                return Err(PanoramaError::InvalidCatalog(format!(
                    "missing tier '{expected}' (duplicate '{}')",
                    entry.tier
                )));
            }
            if entry.locator.trim().is_empty() {
                return Err(PanoramaError::InvalidCatalog(format!(
                    "tier '{}' has an empty locator",
                    entry.tier
                )));
            }
            if !entry.min_scale.is_finite() {
                return Err(PanoramaError::InvalidCatalog(format!(
                    "tier '{}' has a non-finite scale bound",
                    entry.tier
                )));
            }
        }

        for pair in entries.windows(2) {
            if pair[1].min_scale <= pair[0].min_scale {
                return Err(PanoramaError::InvalidCatalog(format!(
                    "bound of '{}' ({}) must exceed bound of '{}' ({})",
                    pair[1].tier, pair[1].min_scale, pair[0].tier, pair[0].min_scale
                )));
            }
        }

        Ok(Self { entries })
    }

    pub fn from_config(config: &ViewerConfig) -> Result<Self> {
        Self::from_entries(
            config
                .tiers
                .iter()
                .map(|t| TierEntry {
                    tier: t.tier,
                    locator: t.locator.clone(),
                    min_scale: t.min_scale,
                })
                .collect(),
        )
    }

    /// Highest tier whose lower bound is at or below `scale`.
    pub fn tier_for_scale(&self, scale: f32) -> Tier {
        self.entries
            .iter()
            .rev()
            .find(|e| e.min_scale <= scale)
            .map(|e| e.tier)
            .unwrap_or(Tier::Hd)
    }

    pub fn entry(&self, tier: Tier) -> &TierEntry {
        &self.entries[tier.index()]
    }

    pub fn locator(&self, tier: Tier) -> &str {
        &self.entry(tier).locator
    }

    pub fn tier_for_locator(&self, locator: &str) -> Option<Tier> {
        self.entries
            .iter()
            .find(|e| e.locator == locator)
            .map(|e| e.tier)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TierEntry> {
        self.entries.iter()
    }
}

impl Default for ResolutionCatalog {
    fn default() -> Self {
        let entries = Tier::ALL
            .into_iter()
            .zip(DEFAULT_TIER_BOUNDS)
            .map(|(tier, min_scale)| TierEntry {
                tier,
                locator: default_locator(tier),
                min_scale,
            })
            .collect();
        Self { entries }
    }
}

pub(crate) fn default_locator(tier: Tier) -> String {
    format!("img/img-{}.jpg", tier.name())
}
