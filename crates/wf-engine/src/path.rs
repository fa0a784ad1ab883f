//! Projection of route sets into renderable map segments.
//!
//! The engine only produces the data; drawing belongs to the presentation
//! layer.

use serde::Serialize;

use wf_world::{DangerTier, LocationId, Position, WorldAtlas};

use crate::route::{routes_from_location, routes_within_kingdom};
use crate::travel::TravelState;

/// One renderable line segment between two located points of interest.
#[derive(Debug, Clone, Serialize)]
pub struct PathLine {
    /// Origin location.
    pub from: LocationId,
    /// Destination location.
    pub to: LocationId,
    /// Origin position in world space.
    pub from_pos: Position,
    /// Destination position in world space.
    pub to_pos: Position,
    /// Hex color keyed by danger tier.
    pub color: &'static str,
    /// Locked routes render dashed.
    pub dashed: bool,
    /// Danger classification of the underlying route.
    pub danger: DangerTier,
    /// Travel duration in days.
    pub distance_days: u32,
    /// Monetary cost of the journey.
    pub cost: u32,
    /// Whether the route is still locked.
    pub is_locked: bool,
}

/// Project the route set from `origin` into line segments.
///
/// `kingdom_only` restricts the set to the origin's own kingdom. Routes whose
/// endpoints cannot be resolved are silently dropped; an unknown origin
/// yields no segments at all.
pub fn project_paths(
    origin: &LocationId,
    atlas: &WorldAtlas,
    travel: &TravelState,
    kingdom_only: bool,
) -> Vec<PathLine> {
    let Some(from) = atlas.poi(origin) else {
        return Vec::new();
    };
    let routes = if kingdom_only {
        routes_within_kingdom(origin, atlas)
    } else {
        routes_from_location(origin, atlas, travel)
    };
    routes
        .into_iter()
        .filter_map(|route| {
            let to = atlas.poi(&route.to)?;
            Some(PathLine {
                from: route.from,
                to: route.to.clone(),
                from_pos: from.position,
                to_pos: to.position,
                color: route.danger.color(),
                dashed: !route.is_unlocked,
                danger: route.danger,
                distance_days: route.distance_days,
                cost: route.cost,
                is_locked: !route.is_unlocked,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use wf_world::{Biome, Kingdom, Poi};

    use super::*;

    fn atlas() -> WorldAtlas {
        let valdora = Kingdom::new(
            "valdora",
            "Valdora",
            Poi::new(
                "val_cap",
                "Goldspire",
                Position::new(100.0, 100.0),
                Biome::Plains,
                "valdora",
            ),
            vec![Poi::new(
                "val_port",
                "Saltmere",
                Position::new(400.0, 100.0),
                Biome::Coast,
                "valdora",
            )],
        );
        let norren = Kingdom::new(
            "norren",
            "Norren",
            Poi::new(
                "nor_cap",
                "Frosthold",
                Position::new(900.0, 900.0),
                Biome::Snow,
                "norren",
            ),
            vec![],
        );
        WorldAtlas::new("Testlands", 1000.0, vec![valdora, norren]).unwrap()
    }

    #[test]
    fn segments_carry_positions_and_styling() {
        let atlas = atlas();
        let origin = LocationId::from("val_cap");
        let travel = TravelState::at(atlas.poi(&origin).unwrap());

        let paths = project_paths(&origin, &atlas, &travel, false);
        assert_eq!(paths.len(), 2);

        let to_port = paths
            .iter()
            .find(|p| p.to == LocationId::from("val_port"))
            .unwrap();
        assert!(!to_port.dashed);
        assert!(!to_port.is_locked);
        assert_eq!(to_port.from_pos, Position::new(100.0, 100.0));
        assert_eq!(to_port.to_pos, Position::new(400.0, 100.0));
        assert_eq!(to_port.color, to_port.danger.color());

        let to_frost = paths
            .iter()
            .find(|p| p.to == LocationId::from("nor_cap"))
            .unwrap();
        assert!(to_frost.dashed);
        assert!(to_frost.is_locked);
    }

    #[test]
    fn kingdom_only_restricts_the_set() {
        let atlas = atlas();
        let origin = LocationId::from("val_cap");
        let travel = TravelState::at(atlas.poi(&origin).unwrap());
        let paths = project_paths(&origin, &atlas, &travel, true);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].to.as_str(), "val_port");
    }

    #[test]
    fn unknown_origin_projects_nothing() {
        let atlas = atlas();
        let origin = LocationId::from("val_cap");
        let travel = TravelState::at(atlas.poi(&origin).unwrap());
        assert!(project_paths(&LocationId::from("nowhere"), &atlas, &travel, false).is_empty());
    }
}
