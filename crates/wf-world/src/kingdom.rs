use std::fmt;

use serde::{Deserialize, Serialize};

use crate::location::{LocationId, Poi};

/// Unique identifier for a kingdom, supplied by world data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KingdomId(String);

impl KingdomId {
    /// Wrap an id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KingdomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for KingdomId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for KingdomId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A political region with one capital and zero or more cities.
///
/// The kingdom is the unit of "same-region" travel: routes between two
/// locations of the same kingdom are always unlocked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kingdom {
    /// Identity of the kingdom.
    pub id: KingdomId,
    /// Display name.
    pub name: String,
    /// The capital location.
    pub capital: Poi,
    /// City locations, in world-data order.
    pub cities: Vec<Poi>,
}

impl Kingdom {
    /// Create a kingdom.
    pub fn new(
        id: impl Into<KingdomId>,
        name: impl Into<String>,
        capital: Poi,
        cities: Vec<Poi>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            capital,
            cities,
        }
    }

    /// All locations of the kingdom, capital first.
    pub fn locations(&self) -> impl Iterator<Item = &Poi> {
        std::iter::once(&self.capital).chain(self.cities.iter())
    }

    /// Whether the kingdom contains the given location.
    pub fn contains(&self, id: &LocationId) -> bool {
        self.locations().any(|poi| poi.id == *id)
    }
}
