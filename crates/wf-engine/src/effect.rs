//! Narrative effects: the sole channel by which the generation service
//! mutates engine state.
//!
//! Effects arrive as JSON from a generative, not fully trustworthy, source —
//! the interpreter (see [`crate::interpreter`]) validates payloads per
//! effect and skips malformed ones rather than failing the batch. The enum
//! is an explicit sum type so adding a kind is a compile-checked change.

use serde::{Deserialize, Serialize};

use wf_world::LocationId;

use crate::player::FlagValue;
use crate::quest::{QuestId, QuestType};

/// Whether an item effect grants or removes a copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemAction {
    /// Increment the stack (or create it with one copy).
    Add,
    /// Decrement the stack (deleting it at zero).
    Remove,
}

/// Travel-kind effect payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TravelAction {
    /// Instant relocation, bypassing transit.
    Move {
        /// Destination location.
        target: LocationId,
    },
    /// Unlock a destination's route without moving.
    UnlockRoute {
        /// Destination to unlock.
        target: LocationId,
    },
    /// Demand that the player travel to a location before the story
    /// continues. Spawns a travel quest and auto-unlocks the target.
    RequireTravel {
        /// Destination the narrative demands.
        target: LocationId,
        /// Player-facing justification.
        reason: String,
        /// Scene number the journey must happen by, if any.
        #[serde(default)]
        deadline: Option<u32>,
    },
}

/// Quest-kind effect payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum QuestAction {
    /// Insert a new active quest.
    Add {
        /// Player-facing title.
        title: String,
        /// Player-facing description.
        #[serde(default)]
        description: String,
        /// Narrative category.
        #[serde(default)]
        quest_type: QuestType,
        /// Act the quest belongs to; zero means "current act".
        #[serde(default)]
        act_number: u32,
    },
    /// Complete a quest. Terminal.
    Complete {
        /// Quest to complete.
        id: QuestId,
    },
    /// Fail a quest. Terminal.
    Fail {
        /// Quest to fail.
        id: QuestId,
    },
}

/// One atomic, externally produced state change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Effect {
    /// Apply a delta to a named stat (floored at zero).
    Stat {
        /// Stat name.
        attribute: String,
        /// Signed delta.
        delta: i64,
    },
    /// Add or remove one copy of a named item.
    Item {
        /// Grant or remove.
        action: ItemAction,
        /// Item name.
        name: String,
    },
    /// Shift the relationship with an NPC.
    Relationship {
        /// NPC name.
        npc: String,
        /// Signed delta, clamped into `[-100, 100]`.
        delta: i64,
        /// Optional status label overwrite.
        #[serde(default)]
        status: Option<String>,
    },
    /// Set a narrative flag.
    Flag {
        /// Flag id.
        id: String,
        /// Flag value.
        value: FlagValue,
    },
    /// Make a location known: visited and unlocked for cross-kingdom
    /// travel, without moving the player.
    Location {
        /// Location to mark.
        target: LocationId,
    },
    /// A travel action.
    Travel(TravelAction),
    /// A quest lifecycle action.
    Quest(QuestAction),
}
