//! Biome tags and the danger classification derived from them.
//!
//! Danger is a pure function of the two endpoint biomes and whether the route
//! crosses a kingdom border. It is symmetric in the biome arguments and safe
//! to memoize per `(from, to, crosses_border)` triple.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Terrain classification of a point of interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Biome {
    /// Open grassland.
    Plains,
    /// Shoreline and coastal lowland.
    Coast,
    /// Arid dunes and badlands.
    Desert,
    /// Wetland and marsh.
    Swamp,
    /// Dense woodland.
    Forest,
    /// Rolling highland.
    Hills,
    /// High mountain passes.
    Mountain,
    /// Glacier and permanent snowfield.
    Snow,
}

impl Biome {
    /// Biomes that make any route touching them hazardous.
    pub fn is_hazardous(self) -> bool {
        matches!(self, Self::Mountain | Self::Snow)
    }

    /// Biomes that slow travel without being outright hazardous.
    pub fn is_difficult(self) -> bool {
        matches!(self, Self::Forest | Self::Hills)
    }
}

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Plains => "plains",
            Self::Coast => "coast",
            Self::Desert => "desert",
            Self::Swamp => "swamp",
            Self::Forest => "forest",
            Self::Hills => "hills",
            Self::Mountain => "mountain",
            Self::Snow => "snow",
        };
        write!(f, "{name}")
    }
}

/// Qualitative travel risk, ordered by severity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum DangerTier {
    /// Well-patrolled roads.
    #[default]
    Safe,
    /// Rough or contested terrain.
    Risky,
    /// Hazardous terrain or hostile borders.
    Dangerous,
}

impl DangerTier {
    /// Cost multiplier applied on top of the base per-day rate.
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Safe => 1.0,
            Self::Risky => 1.5,
            Self::Dangerous => 2.0,
        }
    }

    /// Hex color used when projecting routes onto a map.
    pub fn color(self) -> &'static str {
        match self {
            Self::Safe => "#2e7d32",
            Self::Risky => "#f9a825",
            Self::Dangerous => "#c62828",
        }
    }
}

impl fmt::Display for DangerTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Safe => "safe",
            Self::Risky => "risky",
            Self::Dangerous => "dangerous",
        };
        write!(f, "{name}")
    }
}

/// Classify the danger of traveling between two biomes.
///
/// Score 2 if either endpoint is hazardous, else 1 if either is difficult;
/// +1 if the route crosses a kingdom border. Score ≥ 3 is dangerous, ≥ 1
/// risky, 0 safe.
pub fn classify_danger(from: Biome, to: Biome, crosses_border: bool) -> DangerTier {
    let mut score: u8 = if from.is_hazardous() || to.is_hazardous() {
        2
    } else if from.is_difficult() || to.is_difficult() {
        1
    } else {
        0
    };
    if crosses_border {
        score += 1;
    }
    match score {
        3.. => DangerTier::Dangerous,
        1..=2 => DangerTier::Risky,
        0 => DangerTier::Safe,
    }
}
