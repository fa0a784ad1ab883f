use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{WorldError, WorldResult};
use crate::kingdom::{Kingdom, KingdomId};
use crate::location::{LocationId, Poi};

/// The serde document form of a world: what world files and the external
/// world-data provider exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasDoc {
    /// Display name of the world.
    pub name: String,
    /// Width of the world map; the travel-day scale derives from it.
    pub width: f64,
    /// All kingdoms with their capitals and cities.
    pub kingdoms: Vec<Kingdom>,
}

/// The immutable world map: kingdoms indexed for lookup by id and name.
///
/// Built once from world data and only ever queried afterwards. Lookup
/// methods return `Option` or empty collections for unknown ids; errors are
/// reserved for construction-time validation.
#[derive(Debug, Clone)]
pub struct WorldAtlas {
    name: String,
    width: f64,
    kingdoms: Vec<Kingdom>,

    // Indexes
    pois: HashMap<LocationId, Poi>,
    kingdom_index: HashMap<KingdomId, usize>,
    by_name_lower: HashMap<String, LocationId>,
}

impl WorldAtlas {
    /// Build an atlas, validating ids and ownership.
    ///
    /// Rejects duplicate location or kingdom ids, locations whose `kingdom`
    /// field disagrees with the kingdom that owns them, and non-positive map
    /// widths.
    pub fn new(name: impl Into<String>, width: f64, kingdoms: Vec<Kingdom>) -> WorldResult<Self> {
        if !width.is_finite() || width <= 0.0 {
            return Err(WorldError::Validation(format!(
                "world width must be positive, got {width}"
            )));
        }

        let mut pois = HashMap::new();
        let mut kingdom_index = HashMap::new();
        let mut by_name_lower = HashMap::new();

        for (idx, kingdom) in kingdoms.iter().enumerate() {
            if kingdom_index.insert(kingdom.id.clone(), idx).is_some() {
                return Err(WorldError::DuplicateKingdom(kingdom.id.to_string()));
            }
            for poi in kingdom.locations() {
                if poi.kingdom != kingdom.id {
                    return Err(WorldError::Validation(format!(
                        "location \"{}\" claims kingdom \"{}\" but belongs to \"{}\"",
                        poi.id, poi.kingdom, kingdom.id
                    )));
                }
                if pois.insert(poi.id.clone(), poi.clone()).is_some() {
                    return Err(WorldError::DuplicateLocation(poi.id.to_string()));
                }
                by_name_lower.insert(poi.name.to_lowercase(), poi.id.clone());
            }
        }

        Ok(Self {
            name: name.into(),
            width,
            kingdoms,
            pois,
            kingdom_index,
            by_name_lower,
        })
    }

    /// Build an atlas from its document form.
    pub fn from_doc(doc: AtlasDoc) -> WorldResult<Self> {
        Self::new(doc.name, doc.width, doc.kingdoms)
    }

    /// Convert back to the document form.
    pub fn to_doc(&self) -> AtlasDoc {
        AtlasDoc {
            name: self.name.clone(),
            width: self.width,
            kingdoms: self.kingdoms.clone(),
        }
    }

    /// Display name of the world.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Width of the world map.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// All kingdoms, in world-data order.
    pub fn kingdoms(&self) -> &[Kingdom] {
        &self.kingdoms
    }

    /// Look up a point of interest by id.
    pub fn poi(&self, id: &LocationId) -> Option<&Poi> {
        self.pois.get(id)
    }

    /// Look up a kingdom by id.
    pub fn kingdom(&self, id: &KingdomId) -> Option<&Kingdom> {
        self.kingdom_index.get(id).map(|idx| &self.kingdoms[*idx])
    }

    /// The kingdom owning a location.
    pub fn kingdom_of(&self, id: &LocationId) -> Option<&Kingdom> {
        self.poi(id).and_then(|poi| self.kingdom(&poi.kingdom))
    }

    /// Find a location by display name (case-insensitive, exact).
    pub fn find_by_name(&self, name: &str) -> Option<&Poi> {
        self.by_name_lower
            .get(&name.to_lowercase())
            .and_then(|id| self.pois.get(id))
    }

    /// Best-effort substring match between a text fragment and location
    /// names, in either direction.
    ///
    /// This backs the session's narrated-location fallback only; it can
    /// misfire on similarly named locations and must never override an
    /// explicit id. Iteration follows world-data order so ties resolve
    /// deterministically.
    pub fn find_by_fragment(&self, fragment: &str) -> Option<&Poi> {
        let needle = fragment.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.all_pois().find(|poi| {
            let name = poi.name.to_lowercase();
            name.contains(&needle) || needle.contains(&name)
        })
    }

    /// All points of interest, kingdoms in order, capital first within each.
    pub fn all_pois(&self) -> impl Iterator<Item = &Poi> {
        self.kingdoms.iter().flat_map(Kingdom::locations)
    }

    /// Total number of locations.
    pub fn location_count(&self) -> usize {
        self.pois.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::danger::Biome;
    use crate::geometry::Position;

    fn poi(id: &str, name: &str, kingdom: &str) -> Poi {
        Poi::new(id, name, Position::new(0.0, 0.0), Biome::Plains, kingdom)
    }

    fn small_world() -> WorldAtlas {
        let valdora = Kingdom::new(
            "valdora",
            "Valdora",
            poi("val_cap", "Goldspire", "valdora"),
            vec![poi("val_port", "Saltmere", "valdora")],
        );
        let norren = Kingdom::new(
            "norren",
            "Norren",
            poi("nor_cap", "Frosthold", "norren"),
            vec![],
        );
        WorldAtlas::new("Testlands", 1000.0, vec![valdora, norren]).unwrap()
    }

    #[test]
    fn lookups_by_id_and_name() {
        let atlas = small_world();
        assert_eq!(atlas.location_count(), 3);
        assert!(atlas.poi(&LocationId::from("val_port")).is_some());
        assert!(atlas.poi(&LocationId::from("nowhere")).is_none());
        assert_eq!(
            atlas.find_by_name("goldspire").unwrap().id,
            LocationId::from("val_cap")
        );
        assert_eq!(
            atlas
                .kingdom_of(&LocationId::from("nor_cap"))
                .unwrap()
                .id
                .as_str(),
            "norren"
        );
    }

    #[test]
    fn duplicate_location_rejected() {
        let k1 = Kingdom::new("a", "A", poi("cap", "One", "a"), vec![]);
        let k2 = Kingdom::new("b", "B", poi("cap", "Two", "b"), vec![]);
        let result = WorldAtlas::new("Broken", 100.0, vec![k1, k2]);
        assert!(matches!(result, Err(WorldError::DuplicateLocation(_))));
    }

    #[test]
    fn mismatched_ownership_rejected() {
        let k = Kingdom::new("a", "A", poi("cap", "One", "elsewhere"), vec![]);
        let result = WorldAtlas::new("Broken", 100.0, vec![k]);
        assert!(matches!(result, Err(WorldError::Validation(_))));
    }

    #[test]
    fn non_positive_width_rejected() {
        assert!(WorldAtlas::new("Flat", 0.0, vec![]).is_err());
        assert!(WorldAtlas::new("Flat", -5.0, vec![]).is_err());
    }

    #[test]
    fn fragment_match_is_best_effort() {
        let atlas = small_world();
        // Narrated text containing the name.
        assert_eq!(
            atlas
                .find_by_fragment("the gates of Frosthold at dusk")
                .map(|p| p.id.as_str()),
            Some("nor_cap"),
        );
        // Fragment contained in the name.
        assert_eq!(
            atlas.find_by_fragment("frost").map(|p| p.id.as_str()),
            Some("nor_cap")
        );
        // Name contained in the fragment.
        assert_eq!(
            atlas.find_by_fragment("Saltmere harbor").map(|p| p.id.as_str()),
            Some("val_port")
        );
        assert!(atlas.find_by_fragment("   ").is_none());
    }

    #[test]
    fn doc_round_trip() {
        let atlas = small_world();
        let json = serde_json::to_string(&atlas.to_doc()).unwrap();
        let doc: AtlasDoc = serde_json::from_str(&json).unwrap();
        let rebuilt = WorldAtlas::from_doc(doc).unwrap();
        assert_eq!(rebuilt.location_count(), atlas.location_count());
        assert_eq!(rebuilt.name(), "Testlands");
    }
}
