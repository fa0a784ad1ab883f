//! The session journal: an explicit, per-session record of what the engine
//! did and what it refused to do.
//!
//! This replaces the ambient global log store the surrounding application
//! used to carry. Warnings about ignored transitions land here too, since
//! they indicate caller bugs worth surfacing without crashing a narrative
//! session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wf_world::LocationId;

use crate::quest::QuestId;

/// One journal record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum JournalEntry {
    /// A batch of effects was applied.
    EffectsApplied {
        /// Scene the batch belonged to.
        scene: u32,
        /// Human-readable applied-effect lines, in order.
        entries: Vec<String>,
        /// When the batch was applied.
        timestamp: DateTime<Utc>,
    },
    /// A malformed effect was skipped.
    EffectSkipped {
        /// Scene the batch belonged to.
        scene: u32,
        /// Why the effect was skipped.
        reason: String,
        /// When it was skipped.
        timestamp: DateTime<Utc>,
    },
    /// An invalid state transition was ignored. Indicates a caller bug.
    TransitionIgnored {
        /// What was attempted and why it was ignored.
        reason: String,
        /// When it was ignored.
        timestamp: DateTime<Utc>,
    },
    /// The player departed on a journey.
    Departure {
        /// Origin.
        from: LocationId,
        /// Destination.
        to: LocationId,
        /// Journey duration in days.
        days: u32,
        /// Gold deducted for the journey.
        cost: u32,
        /// When the departure happened.
        timestamp: DateTime<Utc>,
    },
    /// The player arrived somewhere.
    Arrival {
        /// The new current location.
        location: LocationId,
        /// When the arrival happened.
        timestamp: DateTime<Utc>,
    },
    /// The narrated-location fallback moved the player.
    LocationSynced {
        /// The resolved location.
        location: LocationId,
        /// The narrated text that triggered the match.
        narrated: String,
        /// When the sync happened.
        timestamp: DateTime<Utc>,
    },
    /// Something happened to a quest.
    QuestEvent {
        /// The quest concerned.
        quest: QuestId,
        /// What happened.
        note: String,
        /// When it happened.
        timestamp: DateTime<Utc>,
    },
    /// A free-form note.
    Note {
        /// The note text.
        text: String,
        /// When it was recorded.
        timestamp: DateTime<Utc>,
    },
}

/// Append-only journal owned by one session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn append(&mut self, entry: JournalEntry) {
        self.entries.push(entry);
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the journal is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize the journal to pretty JSON for export.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.entries)
    }
}
