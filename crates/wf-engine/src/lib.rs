//! State-transition engine for the narrative layer of Wayfarer.
//!
//! The engine sits between the world model ([`wf_world`]) and whatever
//! produces prose: it derives travel routes from world geometry, runs the
//! travel lifecycle as explicit state transitions, keeps the quest ledger,
//! and interprets the structured effects a generation service emits against
//! the canonical session state.
//!
//! Everything stateful hangs off [`GameSession`]; the underlying state
//! types ([`TravelState`], [`QuestLog`], [`PlayerState`]) are plain data
//! with snapshot-producing transitions, so they can be tested and
//! serialized in isolation.

pub mod context;
pub mod effect;
pub mod error;
pub mod interpreter;
pub mod journal;
pub mod path;
pub mod player;
pub mod quest;
pub mod route;
pub mod session;
pub mod travel;

pub use context::{RouteSummary, TravelContext, build_travel_context};
pub use effect::{Effect, ItemAction, QuestAction, TravelAction};
pub use error::{EngineError, EngineResult};
pub use interpreter::{EffectOutcome, apply_effects};
pub use journal::{Journal, JournalEntry};
pub use path::{PathLine, project_paths};
pub use player::{FlagEntry, FlagValue, PlayerState, RELATION_MAX, RELATION_MIN, Relation};
pub use quest::{
    ArrivalSweep, Objective, ObjectiveGoal, Quest, QuestId, QuestLog, QuestRewards, QuestStatus,
    QuestSummary, QuestType,
};
pub use route::{Route, routes_from_location, routes_within_kingdom};
pub use session::{EffectReport, GameSession, SessionConfig};
pub use travel::{ForcedTravel, TravelProgress, TravelState};
