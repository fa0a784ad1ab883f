//! Read-only context handed to the external generation service.
//!
//! The generation service sees where the player is, what they can reach, and
//! what the narrative currently demands; effect batches are its only channel
//! back into the engine.

use serde::Serialize;

use wf_world::{DangerTier, KingdomId, LocationId, WorldAtlas};

use crate::route::routes_from_location;
use crate::travel::{ForcedTravel, TravelState};

/// A route compacted for the generation service.
#[derive(Debug, Clone, Serialize)]
pub struct RouteSummary {
    /// Destination id.
    pub location_id: LocationId,
    /// Destination display name.
    pub location_name: String,
    /// Travel duration in days.
    pub distance_days: u32,
    /// Monetary cost.
    pub cost: u32,
    /// Danger classification.
    pub danger: DangerTier,
}

/// Snapshot of the player's travel situation for prompt building.
#[derive(Debug, Clone, Serialize)]
pub struct TravelContext {
    /// Current location id.
    pub current_location: LocationId,
    /// Kingdom owning the current location.
    pub current_kingdom: KingdomId,
    /// Locations the player has been to.
    pub visited: Vec<LocationId>,
    /// Locations unlocked for cross-kingdom travel.
    pub unlocked: Vec<LocationId>,
    /// Routes the player can take right now.
    pub available_routes: Vec<RouteSummary>,
    /// Outstanding forced destination, if any.
    pub travel_quest: Option<ForcedTravel>,
    /// Whether a journey is in progress.
    pub in_transit: bool,
}

/// Build the travel context from the current travel state.
///
/// Only unlocked routes appear: the context describes what the player can
/// actually do, not what the map might eventually offer.
pub fn build_travel_context(travel: &TravelState, atlas: &WorldAtlas) -> TravelContext {
    let available_routes = routes_from_location(&travel.location, atlas, travel)
        .into_iter()
        .filter(|route| route.is_unlocked)
        .map(|route| {
            let location_name = atlas
                .poi(&route.to)
                .map_or_else(|| route.to.to_string(), |poi| poi.name.clone());
            RouteSummary {
                location_id: route.to,
                location_name,
                distance_days: route.distance_days,
                cost: route.cost,
                danger: route.danger,
            }
        })
        .collect();

    TravelContext {
        current_location: travel.location.clone(),
        current_kingdom: travel.kingdom.clone(),
        visited: travel.visited.iter().cloned().collect(),
        unlocked: travel.unlocked_locations.iter().cloned().collect(),
        available_routes,
        travel_quest: travel.travel_quest.clone(),
        in_transit: travel.is_traveling(),
    }
}

#[cfg(test)]
mod tests {
    use wf_world::{Biome, Kingdom, Poi, Position};

    use super::*;

    fn atlas() -> WorldAtlas {
        let k1 = Kingdom::new(
            "k1",
            "Kingdom One",
            Poi::new("c1", "Capital One", Position::new(0.0, 0.0), Biome::Plains, "k1"),
            vec![Poi::new(
                "town",
                "Elm Town",
                Position::new(200.0, 0.0),
                Biome::Plains,
                "k1",
            )],
        );
        let k2 = Kingdom::new(
            "k2",
            "Kingdom Two",
            Poi::new("c2", "Capital Two", Position::new(900.0, 900.0), Biome::Snow, "k2"),
            vec![],
        );
        WorldAtlas::new("Testlands", 1000.0, vec![k1, k2]).unwrap()
    }

    #[test]
    fn context_lists_only_unlocked_routes() {
        let atlas = atlas();
        let travel = TravelState::at(atlas.poi(&LocationId::from("c1")).unwrap());
        let context = build_travel_context(&travel, &atlas);

        assert_eq!(context.current_location.as_str(), "c1");
        assert_eq!(context.current_kingdom.as_str(), "k1");
        assert!(!context.in_transit);
        assert!(context.travel_quest.is_none());
        // Only the intra-kingdom destination is reachable.
        assert_eq!(context.available_routes.len(), 1);
        assert_eq!(context.available_routes[0].location_name, "Elm Town");
    }

    #[test]
    fn context_serializes_for_prompting() {
        let atlas = atlas();
        let travel = TravelState::at(atlas.poi(&LocationId::from("c1")).unwrap());
        let json = serde_json::to_string(&build_travel_context(&travel, &atlas)).unwrap();
        assert!(json.contains("\"current_location\":\"c1\""));
        assert!(json.contains("\"available_routes\""));
    }
}
