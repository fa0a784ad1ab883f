//! Route derivation from world geometry and unlock state.
//!
//! Routes are derived, never stored: unlock state changes over time, so every
//! query recomputes the set from the atlas and the current [`TravelState`].

use serde::{Deserialize, Serialize};

use wf_world::{
    Biome, DangerTier, LocationId, Poi, WorldAtlas, classify_danger, cost_for_travel,
    days_for_distance,
};

use crate::quest::QuestId;
use crate::travel::TravelState;

/// A derived, directed travel option between two locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    /// Origin location.
    pub from: LocationId,
    /// Destination location.
    pub to: LocationId,
    /// Travel duration in days, always within `[1, 5]`.
    pub distance_days: u32,
    /// Monetary cost: `round(days * 10 * danger multiplier)`.
    pub cost: u32,
    /// Danger classification of the route.
    pub danger: DangerTier,
    /// Endpoint biomes, origin first.
    pub terrain: [Biome; 2],
    /// Whether the player may take this route now.
    pub is_unlocked: bool,
    /// The narrative quest gating a locked cross-kingdom route.
    pub requires_quest: Option<QuestId>,
}

fn derive_route(from: &Poi, to: &Poi, atlas: &WorldAtlas, unlocked: bool) -> Route {
    let crosses_border = from.kingdom != to.kingdom;
    let danger = classify_danger(from.biome, to.biome, crosses_border);
    let days = days_for_distance(from.position.distance_to(to.position), atlas.width());
    Route {
        from: from.id.clone(),
        to: to.id.clone(),
        distance_days: days,
        cost: cost_for_travel(days, danger),
        danger,
        terrain: [from.biome, to.biome],
        is_unlocked: unlocked,
        requires_quest: if unlocked {
            None
        } else {
            Some(QuestId::travel_unlock(&to.id))
        },
    }
}

/// Routes to the other locations of the origin's own kingdom.
///
/// Intra-kingdom travel is always permitted, so every route is unlocked.
/// Sorted by ascending duration (ties by destination id). An unknown origin
/// yields an empty set — absence means "draw nothing", not an error.
pub fn routes_within_kingdom(origin: &LocationId, atlas: &WorldAtlas) -> Vec<Route> {
    let Some(from) = atlas.poi(origin) else {
        return Vec::new();
    };
    let Some(kingdom) = atlas.kingdom_of(origin) else {
        return Vec::new();
    };
    let mut routes: Vec<Route> = kingdom
        .locations()
        .filter(|poi| poi.id != *origin)
        .map(|poi| derive_route(from, poi, atlas, true))
        .collect();
    routes.sort_by(|a, b| {
        a.distance_days
            .cmp(&b.distance_days)
            .then_with(|| a.to.cmp(&b.to))
    });
    routes
}

/// Routes to every capital and city in the world.
///
/// A destination is unlocked when it shares the origin's kingdom or has been
/// unlocked on the travel state; locked routes carry the
/// `travel_unlock_<destination>` quest id signaling that a narrative unlock
/// is the intended gate. Sorted unlocked-first, then by ascending duration.
/// An unknown origin yields an empty set.
pub fn routes_from_location(
    origin: &LocationId,
    atlas: &WorldAtlas,
    travel: &TravelState,
) -> Vec<Route> {
    let Some(from) = atlas.poi(origin) else {
        return Vec::new();
    };
    let mut routes: Vec<Route> = atlas
        .all_pois()
        .filter(|poi| poi.id != *origin)
        .map(|poi| {
            let unlocked = poi.kingdom == from.kingdom || travel.is_unlocked(&poi.id);
            derive_route(from, poi, atlas, unlocked)
        })
        .collect();
    routes.sort_by(|a, b| {
        b.is_unlocked
            .cmp(&a.is_unlocked)
            .then_with(|| a.distance_days.cmp(&b.distance_days))
            .then_with(|| a.to.cmp(&b.to))
    });
    routes
}

#[cfg(test)]
mod tests {
    use wf_world::{Kingdom, Position};

    use super::*;

    fn poi(id: &str, kingdom: &str, x: f64, y: f64, biome: Biome) -> Poi {
        Poi::new(id, id, Position::new(x, y), biome, kingdom)
    }

    /// Two kingdoms: Valdora (capital + two cities), Norren (capital + city).
    fn atlas() -> WorldAtlas {
        let valdora = Kingdom::new(
            "valdora",
            "Valdora",
            poi("val_cap", "valdora", 100.0, 100.0, Biome::Plains),
            vec![
                poi("val_port", "valdora", 300.0, 100.0, Biome::Coast),
                poi("val_mine", "valdora", 100.0, 700.0, Biome::Mountain),
            ],
        );
        let norren = Kingdom::new(
            "norren",
            "Norren",
            poi("nor_cap", "norren", 900.0, 900.0, Biome::Snow),
            vec![poi("nor_town", "norren", 700.0, 900.0, Biome::Forest)],
        );
        WorldAtlas::new("Testlands", 1000.0, vec![valdora, norren]).unwrap()
    }

    fn state_at(atlas: &WorldAtlas, id: &str) -> TravelState {
        TravelState::at(atlas.poi(&LocationId::from(id)).unwrap())
    }

    #[test]
    fn kingdom_routes_exclude_origin_and_sort_by_duration() {
        let atlas = atlas();
        let routes = routes_within_kingdom(&LocationId::from("val_cap"), &atlas);
        assert_eq!(routes.len(), 2);
        assert!(routes.iter().all(|r| r.is_unlocked));
        assert!(routes.iter().all(|r| r.to != LocationId::from("val_cap")));
        assert!(routes[0].distance_days <= routes[1].distance_days);
        assert_eq!(routes[0].to.as_str(), "val_port");
    }

    #[test]
    fn global_routes_mark_locked_cross_kingdom_destinations() {
        let atlas = atlas();
        let state = state_at(&atlas, "val_cap");
        let routes = routes_from_location(&LocationId::from("val_cap"), &atlas, &state);
        assert_eq!(routes.len(), 4);

        let to_norren = routes
            .iter()
            .find(|r| r.to == LocationId::from("nor_cap"))
            .unwrap();
        assert!(!to_norren.is_unlocked);
        assert_eq!(
            to_norren.requires_quest.as_ref().unwrap().as_str(),
            "travel_unlock_nor_cap"
        );

        // Unlocked routes sort before locked ones.
        let first_locked = routes.iter().position(|r| !r.is_unlocked).unwrap();
        assert!(routes[..first_locked].iter().all(|r| r.is_unlocked));
    }

    #[test]
    fn unlocking_a_destination_opens_its_route() {
        let atlas = atlas();
        let state = state_at(&atlas, "val_cap").unlock_location(&LocationId::from("nor_town"));
        let routes = routes_from_location(&LocationId::from("val_cap"), &atlas, &state);
        let to_town = routes
            .iter()
            .find(|r| r.to == LocationId::from("nor_town"))
            .unwrap();
        assert!(to_town.is_unlocked);
        assert!(to_town.requires_quest.is_none());
    }

    #[test]
    fn cross_border_routes_are_riskier_and_costlier() {
        let atlas = atlas();
        let state = state_at(&atlas, "val_cap");
        let routes = routes_from_location(&LocationId::from("val_cap"), &atlas, &state);
        let to_norren = routes
            .iter()
            .find(|r| r.to == LocationId::from("nor_cap"))
            .unwrap();
        // Snow endpoint plus a border crossing: maximum severity.
        assert_eq!(to_norren.danger, DangerTier::Dangerous);
        assert_eq!(
            to_norren.cost,
            cost_for_travel(to_norren.distance_days, DangerTier::Dangerous)
        );
    }

    #[test]
    fn durations_and_costs_respect_invariants() {
        let atlas = atlas();
        let state = state_at(&atlas, "nor_town");
        for route in routes_from_location(&LocationId::from("nor_town"), &atlas, &state) {
            assert!((1..=5).contains(&route.distance_days));
            assert_eq!(route.cost, cost_for_travel(route.distance_days, route.danger));
        }
    }

    #[test]
    fn unknown_origin_yields_empty_sets() {
        let atlas = atlas();
        let state = state_at(&atlas, "val_cap");
        assert!(routes_within_kingdom(&LocationId::from("nowhere"), &atlas).is_empty());
        assert!(routes_from_location(&LocationId::from("nowhere"), &atlas, &state).is_empty());
    }
}
