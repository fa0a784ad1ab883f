use std::fmt;

use serde::{Deserialize, Serialize};

use crate::danger::Biome;
use crate::geometry::Position;
use crate::kingdom::KingdomId;

/// Unique identifier for a point of interest.
///
/// Ids are supplied by the external world data and treated as opaque; they
/// are never generated from wall-clock time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(String);

impl LocationId {
    /// Wrap an id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LocationId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for LocationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A point of interest: a named, positioned location belonging to exactly
/// one kingdom. Immutable once the world is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poi {
    /// Identity of the location.
    pub id: LocationId,
    /// Display name (opaque label; localization happens upstream).
    pub name: String,
    /// Position in world space.
    pub position: Position,
    /// Terrain tag used for danger classification.
    pub biome: Biome,
    /// The owning kingdom.
    pub kingdom: KingdomId,
}

impl Poi {
    /// Create a point of interest.
    pub fn new(
        id: impl Into<LocationId>,
        name: impl Into<String>,
        position: Position,
        biome: Biome,
        kingdom: impl Into<KingdomId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position,
            biome,
            kingdom: kingdom.into(),
        }
    }
}
