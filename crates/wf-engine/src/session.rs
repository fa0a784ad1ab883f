//! Game session orchestration.
//!
//! A `GameSession` owns the canonical state tuple for one player — travel
//! state, quest log, player state, journal — and is the single entry point
//! the presentation layer and the generation-service integration talk to.
//! All mutation goes through `&mut self`, which serializes operations per
//! session; sessions share nothing, so no locking is needed across them.

use chrono::Utc;

use wf_world::{LocationId, WorldAtlas, WorldError};

use crate::context::{TravelContext, build_travel_context};
use crate::effect::Effect;
use crate::error::{EngineError, EngineResult};
use crate::interpreter::apply_effects;
use crate::journal::{Journal, JournalEntry};
use crate::path::{PathLine, project_paths};
use crate::player::PlayerState;
use crate::quest::{Quest, QuestId, QuestLog, QuestStatus, QuestSummary};
use crate::route::{Route, routes_from_location, routes_within_kingdom};
use crate::travel::{ForcedTravel, TravelState};

/// Configuration for a new session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Starting location; defaults to the first capital in the atlas.
    pub start: Option<LocationId>,
    /// Act the story opens in.
    pub act_number: u32,
    /// Scene number the story opens at.
    pub scene_number: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            start: None,
            act_number: 1,
            scene_number: 1,
        }
    }
}

impl SessionConfig {
    /// Set the starting location.
    pub fn with_start(mut self, start: impl Into<LocationId>) -> Self {
        self.start = Some(start.into());
        self
    }

    /// Set the opening act.
    pub fn with_act(mut self, act: u32) -> Self {
        self.act_number = act;
        self
    }

    /// Set the opening scene number.
    pub fn with_scene(mut self, scene: u32) -> Self {
        self.scene_number = scene;
        self
    }
}

/// What a processed effect batch did, for the caller that submitted it.
#[derive(Debug, Clone)]
pub struct EffectReport {
    /// Human-readable applied-effect lines, in order.
    pub applied: Vec<String>,
    /// Reasons for skipped effects.
    pub skipped: Vec<String>,
    /// Quests the batch spawned.
    pub new_quests: Vec<Quest>,
    /// Forced destination demanded by a `require_travel` effect, if any.
    ///
    /// When set, the caller must halt scene generation and let the player
    /// pick a destination.
    pub travel_required: Option<ForcedTravel>,
}

/// The stateful coordinator for one player session.
pub struct GameSession {
    atlas: WorldAtlas,
    travel: TravelState,
    quests: QuestLog,
    active_quest: Option<QuestId>,
    player: PlayerState,
    journal: Journal,
    scene: u32,
    act: u32,
    /// Scene of the last explicit effect-driven relocation; the narrated-
    /// location fallback must not override it within the same scene.
    last_explicit_move: Option<u32>,
}

impl GameSession {
    /// Start a session on the given world.
    ///
    /// Fails only when the configured start location does not exist or the
    /// world has no locations at all.
    pub fn new(atlas: WorldAtlas, config: SessionConfig) -> EngineResult<Self> {
        let start = match &config.start {
            Some(id) => atlas
                .poi(id)
                .cloned()
                .ok_or_else(|| EngineError::World(WorldError::UnknownLocation(id.clone())))?,
            None => atlas
                .all_pois()
                .next()
                .cloned()
                .ok_or(EngineError::EmptyWorld)?,
        };
        let travel = TravelState::at(&start);
        Ok(Self {
            atlas,
            travel,
            quests: QuestLog::new(),
            active_quest: None,
            player: PlayerState::new(),
            journal: Journal::new(),
            scene: config.scene_number,
            act: config.act_number,
            last_explicit_move: None,
        })
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// The world the session plays in.
    pub fn atlas(&self) -> &WorldAtlas {
        &self.atlas
    }

    /// Current travel state snapshot.
    pub fn travel(&self) -> &TravelState {
        &self.travel
    }

    /// Canonical player state.
    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    /// Mutable access to the player state, for scenario seeding.
    pub fn player_mut(&mut self) -> &mut PlayerState {
        &mut self.player
    }

    /// The quest log.
    pub fn quests(&self) -> &QuestLog {
        &self.quests
    }

    /// The currently highlighted quest, if any.
    pub fn active_quest(&self) -> Option<&Quest> {
        self.active_quest.as_ref().and_then(|id| self.quests.get(id))
    }

    /// The session journal.
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Current scene number.
    pub fn scene(&self) -> u32 {
        self.scene
    }

    /// Current act number.
    pub fn act(&self) -> u32 {
        self.act
    }

    /// All derived routes from the current location, unlocked first.
    pub fn available_routes(&self) -> Vec<Route> {
        routes_from_location(&self.travel.location, &self.atlas, &self.travel)
    }

    /// Routes within the current kingdom only.
    pub fn kingdom_routes(&self) -> Vec<Route> {
        routes_within_kingdom(&self.travel.location, &self.atlas)
    }

    /// Renderable map segments from the current location.
    pub fn travel_paths(&self, kingdom_only: bool) -> Vec<PathLine> {
        project_paths(&self.travel.location, &self.atlas, &self.travel, kingdom_only)
    }

    /// Read-only travel context for the generation service.
    pub fn travel_context(&self) -> TravelContext {
        build_travel_context(&self.travel, &self.atlas)
    }

    /// Active-quest summaries for the generation service.
    pub fn quest_summaries(&self) -> Vec<QuestSummary> {
        self.quests.summaries()
    }

    // -----------------------------------------------------------------------
    // Travel
    // -----------------------------------------------------------------------

    /// Begin traveling along `route`.
    ///
    /// Deducts the route cost from the player's gold (floored at zero) and
    /// starts transit. Returns false — recording a journal warning — when a
    /// journey is already in progress, the route does not start at the
    /// current location, or the route is still locked.
    pub fn travel_to(&mut self, route: &Route) -> bool {
        if self.travel.is_traveling() {
            self.warn("travel_to while already in transit");
            return false;
        }
        if route.from != self.travel.location {
            self.warn(format!(
                "travel_to on a route from {} while at {}",
                route.from, self.travel.location
            ));
            return false;
        }
        if !route.is_unlocked {
            self.warn(format!("travel_to on locked route to {}", route.to));
            return false;
        }
        self.player.adjust_stat("gold", -i64::from(route.cost));
        self.travel = self.travel.begin_travel(route, self.scene);
        self.journal.append(JournalEntry::Departure {
            from: route.from.clone(),
            to: route.to.clone(),
            days: route.distance_days,
            cost: route.cost,
            timestamp: Utc::now(),
        });
        true
    }

    /// Tick days off an in-progress journey.
    pub fn advance_travel(&mut self, days: u32) {
        self.travel = self.travel.advance_travel(days);
    }

    /// Complete the in-progress journey: arrive, sweep quests, and clear the
    /// forced destination when it matches. Returns the new location, or
    /// `None` (with a journal warning) when idle.
    pub fn arrive(&mut self) -> Option<LocationId> {
        if !self.travel.is_traveling() {
            self.warn("arrive while idle");
            return None;
        }
        self.travel = self.travel.complete_travel(&self.atlas);
        let here = self.travel.location.clone();
        self.journal.append(JournalEntry::Arrival {
            location: here.clone(),
            timestamp: Utc::now(),
        });
        self.settle_arrival();
        Some(here)
    }

    /// Unlock a location for cross-kingdom travel. Idempotent.
    pub fn unlock_new_location(&mut self, id: &LocationId) {
        self.travel = self.travel.unlock_location(id);
    }

    /// Plant a forced destination from scenario data: creates the travel
    /// quest, sets the travel-quest pointer, and unlocks the target.
    /// Returns the quest id, or `None` when the target is unknown.
    pub fn set_travel_quest_from_scenario(
        &mut self,
        target: &LocationId,
        reason: &str,
        deadline: Option<u32>,
    ) -> Option<QuestId> {
        let Some(destination) = self.atlas.poi(target).cloned() else {
            self.warn(format!("scenario travel quest to unknown location {target}"));
            return None;
        };
        let mut quest = Quest::travel(
            target,
            &destination.name,
            reason,
            self.act,
            self.scene,
            deadline,
            None,
        );
        quest.from_scenario = true;
        let id = quest.id.clone();
        let forced = ForcedTravel {
            target: target.clone(),
            reason: reason.to_string(),
            deadline,
            quest: id.clone(),
        };
        self.travel = self
            .travel
            .unlock_location(target)
            .set_travel_quest(forced);
        if self.quests.add(quest) {
            self.journal.append(JournalEntry::QuestEvent {
                quest: id.clone(),
                note: format!("scenario demands travel to {}", destination.name),
                timestamp: Utc::now(),
            });
        }
        if self.active_quest.is_none() {
            self.active_quest = Some(id.clone());
        }
        Some(id)
    }

    // -----------------------------------------------------------------------
    // Quests
    // -----------------------------------------------------------------------

    /// Add a quest to the log. Duplicate ids are no-ops.
    pub fn add_quest(&mut self, quest: Quest) -> bool {
        let id = quest.id.clone();
        let added = self.quests.add(quest);
        if added && self.active_quest.is_none() {
            self.active_quest = Some(id);
        }
        added
    }

    /// Complete a quest and grant its rewards. Unknown or terminal quests
    /// are no-ops. Resolving the quest owning the forced destination also
    /// clears that pointer.
    pub fn complete_quest(&mut self, id: &QuestId) -> bool {
        let Some(quest) = self.quests.complete(id) else {
            return false;
        };
        self.grant_rewards(&quest);
        self.release_travel_quest(id);
        self.journal.append(JournalEntry::QuestEvent {
            quest: id.clone(),
            note: "completed".to_string(),
            timestamp: Utc::now(),
        });
        self.reassign_active_quest();
        true
    }

    /// Fail a quest. Unknown or terminal quests are no-ops. Resolving the
    /// quest owning the forced destination also clears that pointer.
    pub fn fail_quest(&mut self, id: &QuestId) -> bool {
        if !self.quests.fail(id) {
            return false;
        }
        self.release_travel_quest(id);
        self.journal.append(JournalEntry::QuestEvent {
            quest: id.clone(),
            note: "failed".to_string(),
            timestamp: Utc::now(),
        });
        self.reassign_active_quest();
        true
    }

    // -----------------------------------------------------------------------
    // Effects and narration
    // -----------------------------------------------------------------------

    /// Apply an effect batch produced by the generation service and commit
    /// the results.
    pub fn process_effects(&mut self, effects: &[Effect], scene: u32) -> EffectReport {
        self.scene = scene;
        let outcome = apply_effects(
            effects,
            &self.player,
            &self.travel,
            &self.quests,
            &self.atlas,
            scene,
            self.act,
        );
        self.player = outcome.player;
        self.travel = outcome.travel;
        self.quests = outcome.quests;

        if !outcome.applied.is_empty() {
            self.journal.append(JournalEntry::EffectsApplied {
                scene,
                entries: outcome.applied.clone(),
                timestamp: Utc::now(),
            });
        }
        for reason in &outcome.skipped {
            self.journal.append(JournalEntry::EffectSkipped {
                scene,
                reason: reason.clone(),
                timestamp: Utc::now(),
            });
        }

        if outcome.moved {
            self.last_explicit_move = Some(scene);
            self.settle_arrival();
        }
        self.reassign_active_quest();

        EffectReport {
            applied: outcome.applied,
            skipped: outcome.skipped,
            new_quests: outcome.new_quests,
            travel_required: outcome.travel_required,
        }
    }

    /// Best-effort sync when generated narration names a location without an
    /// explicit `travel: move` effect.
    ///
    /// Resolution order: exact id, exact case-insensitive name, substring
    /// containment (a known-fragile fallback). Never overrides an explicit
    /// effect-driven move in the same scene. On a match the session treats
    /// it as an implicit arrival.
    pub fn sync_narrated_location(&mut self, narrated: &str, scene: u32) -> Option<LocationId> {
        if self.last_explicit_move == Some(scene) {
            return None;
        }
        let trimmed = narrated.trim();
        let poi = self
            .atlas
            .poi(&LocationId::from(trimmed))
            .or_else(|| self.atlas.find_by_name(trimmed))
            .or_else(|| self.atlas.find_by_fragment(narrated))?
            .clone();
        if poi.id == self.travel.location {
            return None;
        }
        self.travel = self.travel.relocate(&poi);
        self.journal.append(JournalEntry::LocationSynced {
            location: poi.id.clone(),
            narrated: narrated.to_string(),
            timestamp: Utc::now(),
        });
        self.settle_arrival();
        Some(poi.id)
    }

    /// Move to the next scene and return its number.
    pub fn advance_scene(&mut self) -> u32 {
        self.scene += 1;
        self.scene
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Post-arrival bookkeeping shared by explicit arrival, instant moves,
    /// and the narration fallback.
    fn settle_arrival(&mut self) {
        let here = self.travel.location.clone();
        let sweep = self.quests.on_arrival(&here);
        self.quests = sweep.log;
        for quest in &sweep.completed {
            self.grant_rewards(quest);
            self.journal.append(JournalEntry::QuestEvent {
                quest: quest.id.clone(),
                note: format!("completed on arrival at {here}"),
                timestamp: Utc::now(),
            });
        }
        let reached = self
            .travel
            .travel_quest
            .as_ref()
            .is_some_and(|forced| forced.target == here);
        if reached {
            self.travel = self.travel.clear_travel_quest();
        }
        self.reassign_active_quest();
    }

    /// Drop the forced destination when `resolved` is the quest owning it.
    fn release_travel_quest(&mut self, resolved: &QuestId) {
        let owned = self
            .travel
            .travel_quest
            .as_ref()
            .is_some_and(|forced| forced.quest == *resolved);
        if owned {
            self.travel = self.travel.clear_travel_quest();
        }
    }

    fn grant_rewards(&mut self, quest: &Quest) {
        let Some(rewards) = &quest.rewards else {
            return;
        };
        let (travel, notes) = rewards.grant(&mut self.player, &self.travel);
        self.travel = travel;
        if !notes.is_empty() {
            self.journal.append(JournalEntry::QuestEvent {
                quest: quest.id.clone(),
                note: format!("rewards: {}", notes.join(", ")),
                timestamp: Utc::now(),
            });
        }
    }

    fn reassign_active_quest(&mut self) {
        let still_active = self
            .active_quest
            .as_ref()
            .and_then(|id| self.quests.get(id))
            .is_some_and(|quest| quest.status == QuestStatus::Active);
        if !still_active {
            self.active_quest = self.quests.active().next().map(|quest| quest.id.clone());
        }
    }

    fn warn(&mut self, reason: impl Into<String>) {
        self.journal.append(JournalEntry::TransitionIgnored {
            reason: reason.into(),
            timestamp: Utc::now(),
        });
    }
}
