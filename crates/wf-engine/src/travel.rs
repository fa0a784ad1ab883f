//! The travel lifecycle state machine.
//!
//! A [`TravelState`] is either idle (`traveling` unset) or in transit
//! (`traveling` set). Transitions never mutate in place: each one returns a
//! fresh snapshot, so a caller can keep the prior state around untouched.
//! Invalid transitions degrade to no-op copies; the session layer records a
//! journal warning when that happens, since it indicates a caller bug.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use wf_world::{KingdomId, LocationId, Poi, WorldAtlas};

use crate::quest::QuestId;
use crate::route::Route;

/// The in-progress journey, present only while in transit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelProgress {
    /// Departure location.
    pub from: LocationId,
    /// Destination location.
    pub to: LocationId,
    /// Days left until arrival.
    pub days_remaining: u32,
    /// Total duration of the journey.
    pub total_days: u32,
    /// The route being traveled.
    pub route: Route,
    /// Scene number the journey began in.
    pub started_at: u32,
}

/// A narrative-driven forced destination.
///
/// Cleared by the caller when the player arrives at `target` or when the
/// owning quest is resolved; the state machine itself never clears it on
/// arrival, because some quests chain several journeys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForcedTravel {
    /// Where the narrative demands the player go.
    pub target: LocationId,
    /// Why, in player-facing words.
    pub reason: String,
    /// Scene number the journey must happen by, if any.
    pub deadline: Option<u32>,
    /// The quest tracking this requirement in the quest log.
    pub quest: QuestId,
}

/// Where the player is, what they have seen, and whether they are moving.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelState {
    /// Current location. Always a member of `visited`.
    pub location: LocationId,
    /// Kingdom owning the current location.
    pub kingdom: KingdomId,
    /// Locations unlocked for cross-kingdom travel.
    pub unlocked_locations: BTreeSet<LocationId>,
    /// Locations the player has been to.
    pub visited: BTreeSet<LocationId>,
    /// Destinations whose routes have been unlocked.
    pub unlocked_routes: BTreeSet<LocationId>,
    /// The in-progress journey, if any.
    pub traveling: Option<TravelProgress>,
    /// Outstanding forced destination, if any.
    pub travel_quest: Option<ForcedTravel>,
}

impl TravelState {
    /// Initial state: idle at `start`, which counts as visited and unlocked.
    pub fn at(start: &Poi) -> Self {
        let mut visited = BTreeSet::new();
        visited.insert(start.id.clone());
        let mut unlocked = BTreeSet::new();
        unlocked.insert(start.id.clone());
        Self {
            location: start.id.clone(),
            kingdom: start.kingdom.clone(),
            unlocked_locations: unlocked.clone(),
            visited,
            unlocked_routes: unlocked,
            traveling: None,
            travel_quest: None,
        }
    }

    /// Whether a journey is in progress.
    pub fn is_traveling(&self) -> bool {
        self.traveling.is_some()
    }

    /// Whether a destination has been unlocked for cross-kingdom travel.
    pub fn is_unlocked(&self, id: &LocationId) -> bool {
        self.unlocked_locations.contains(id)
    }

    /// Whether the player has been to a location.
    pub fn has_visited(&self, id: &LocationId) -> bool {
        self.visited.contains(id)
    }

    /// Start a journey along `route`. Valid only while idle; when already in
    /// transit this returns an unchanged copy.
    ///
    /// Deducting the route's cost is the caller's concern — cost lives in
    /// player state, not here.
    pub fn begin_travel(&self, route: &Route, current_scene: u32) -> Self {
        if self.traveling.is_some() {
            return self.clone();
        }
        let mut next = self.clone();
        next.traveling = Some(TravelProgress {
            from: route.from.clone(),
            to: route.to.clone(),
            days_remaining: route.distance_days,
            total_days: route.distance_days,
            route: route.clone(),
            started_at: current_scene,
        });
        next
    }

    /// Tick days off an in-progress journey, saturating at zero. Idle states
    /// pass through unchanged.
    pub fn advance_travel(&self, days: u32) -> Self {
        let mut next = self.clone();
        if let Some(progress) = &mut next.traveling {
            progress.days_remaining = progress.days_remaining.saturating_sub(days);
        }
        next
    }

    /// Arrive at the destination of the in-progress journey. A no-op copy
    /// when idle.
    ///
    /// Re-resolves the owning kingdom through the atlas and marks the
    /// destination visited. Deliberately leaves `travel_quest` alone: whether
    /// arrival satisfies the forced destination is the caller's decision.
    pub fn complete_travel(&self, atlas: &WorldAtlas) -> Self {
        let Some(progress) = &self.traveling else {
            return self.clone();
        };
        let mut next = self.clone();
        next.location = progress.to.clone();
        if let Some(kingdom) = atlas.kingdom_of(&progress.to) {
            next.kingdom = kingdom.id.clone();
        }
        next.visited.insert(progress.to.clone());
        next.traveling = None;
        next
    }

    /// Instant relocation, bypassing transit entirely. Used by `travel:move`
    /// effects and the narrated-location fallback.
    pub fn relocate(&self, destination: &Poi) -> Self {
        let mut next = self.clone();
        next.location = destination.id.clone();
        next.kingdom = destination.kingdom.clone();
        next.visited.insert(destination.id.clone());
        next.traveling = None;
        next
    }

    /// Mark a location visited without moving to it. Idempotent.
    pub fn mark_visited(&self, id: &LocationId) -> Self {
        let mut next = self.clone();
        next.visited.insert(id.clone());
        next
    }

    /// Unlock a destination for cross-kingdom travel. Idempotent.
    pub fn unlock_location(&self, id: &LocationId) -> Self {
        let mut next = self.clone();
        next.unlocked_locations.insert(id.clone());
        next.unlocked_routes.insert(id.clone());
        next
    }

    /// Set (or replace) the forced destination.
    pub fn set_travel_quest(&self, forced: ForcedTravel) -> Self {
        let mut next = self.clone();
        next.travel_quest = Some(forced);
        next
    }

    /// Clear the forced destination.
    pub fn clear_travel_quest(&self) -> Self {
        let mut next = self.clone();
        next.travel_quest = None;
        next
    }
}
