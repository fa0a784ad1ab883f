//! Player state: stats, inventory stacks, relationships, and flags.
//!
//! The canonical copy belongs to the session layer; the effect interpreter
//! patches a working copy field by field.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Lowest possible relationship value.
pub const RELATION_MIN: i64 = -100;
/// Highest possible relationship value.
pub const RELATION_MAX: i64 = 100;

/// A flexible flag value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    /// A boolean flag.
    Bool(bool),
    /// A numeric flag.
    Number(f64),
    /// A text flag.
    Text(String),
}

/// A flag with the scene it was set in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagEntry {
    /// The flag value.
    pub value: FlagValue,
    /// Scene number the flag was last set in.
    pub set_at: u32,
}

/// Standing with one NPC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    /// Numeric standing, clamped to `[-100, 100]`.
    pub value: i64,
    /// Qualitative status label.
    pub status: String,
}

/// The player's mutable state outside of travel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerState {
    /// Named numeric stats, floored at zero.
    pub stats: BTreeMap<String, i64>,
    /// Stackable inventory: item name to count.
    pub inventory: BTreeMap<String, u32>,
    /// Per-NPC relationships.
    pub relationships: BTreeMap<String, Relation>,
    /// Narrative flags.
    pub flags: BTreeMap<String, FlagEntry>,
}

impl PlayerState {
    /// Create an empty player state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a stat; absent stats read as zero.
    pub fn stat(&self, attribute: &str) -> i64 {
        self.stats.get(attribute).copied().unwrap_or(0)
    }

    /// Apply a delta to a stat, flooring the result at zero. Returns the new
    /// value.
    pub fn adjust_stat(&mut self, attribute: &str, delta: i64) -> i64 {
        let value = (self.stat(attribute) + delta).max(0);
        self.stats.insert(attribute.to_string(), value);
        value
    }

    /// Number of copies of an item carried.
    pub fn item_count(&self, name: &str) -> u32 {
        self.inventory.get(name).copied().unwrap_or(0)
    }

    /// Whether at least one copy of an item is carried.
    pub fn has_item(&self, name: &str) -> bool {
        self.item_count(name) > 0
    }

    /// Add one copy of an item, creating the stack if needed.
    pub fn add_item(&mut self, name: &str) {
        *self.inventory.entry(name.to_string()).or_insert(0) += 1;
    }

    /// Remove one copy of an item, deleting the stack when it reaches zero.
    /// Returns whether anything was removed.
    pub fn remove_item(&mut self, name: &str) -> bool {
        match self.inventory.get_mut(name) {
            Some(count) if *count > 1 => {
                *count -= 1;
                true
            }
            Some(_) => {
                self.inventory.remove(name);
                true
            }
            None => false,
        }
    }

    /// Apply a delta to the relationship with an NPC, clamping to
    /// `[-100, 100]`.
    ///
    /// A supplied status overwrites the label. Otherwise a new relationship
    /// is labeled `neutral` for a positive delta and `rival` for a
    /// non-positive one; existing labels are kept.
    pub fn adjust_relationship(&mut self, npc: &str, delta: i64, status: Option<&str>) -> i64 {
        let entry = self.relationships.entry(npc.to_string()).or_insert_with(|| Relation {
            value: 0,
            status: if delta > 0 { "neutral" } else { "rival" }.to_string(),
        });
        entry.value = (entry.value + delta).clamp(RELATION_MIN, RELATION_MAX);
        if let Some(status) = status {
            entry.status = status.to_string();
        }
        entry.value
    }

    /// Current relationship with an NPC, if any.
    pub fn relationship(&self, npc: &str) -> Option<&Relation> {
        self.relationships.get(npc)
    }

    /// Set a flag, stamping it with the scene number.
    pub fn set_flag(&mut self, id: &str, value: FlagValue, scene: u32) {
        self.flags.insert(
            id.to_string(),
            FlagEntry {
                value,
                set_at: scene,
            },
        );
    }

    /// Read a flag.
    pub fn flag(&self, id: &str) -> Option<&FlagEntry> {
        self.flags.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_floor_at_zero() {
        let mut player = PlayerState::new();
        player.adjust_stat("gold", 12);
        assert_eq!(player.adjust_stat("gold", -20), 0);
        assert_eq!(player.stat("gold"), 0);
    }

    #[test]
    fn absent_stats_read_as_zero() {
        let player = PlayerState::new();
        assert_eq!(player.stat("honor"), 0);
    }

    #[test]
    fn inventory_stacks() {
        let mut player = PlayerState::new();
        player.add_item("rope");
        player.add_item("rope");
        assert_eq!(player.item_count("rope"), 2);

        assert!(player.remove_item("rope"));
        assert_eq!(player.item_count("rope"), 1);
        assert!(player.remove_item("rope"));
        // Stack deleted at zero.
        assert!(!player.inventory.contains_key("rope"));
        assert!(!player.remove_item("rope"));
    }

    #[test]
    fn relationships_clamp_and_infer_status() {
        let mut player = PlayerState::new();
        assert_eq!(player.adjust_relationship("Mara", 30, None), 30);
        assert_eq!(player.relationship("Mara").unwrap().status, "neutral");

        assert_eq!(player.adjust_relationship("Mara", 200, None), RELATION_MAX);
        // Existing label kept when no status supplied.
        assert_eq!(player.relationship("Mara").unwrap().status, "neutral");

        player.adjust_relationship("Mara", -5, Some("ally"));
        assert_eq!(player.relationship("Mara").unwrap().status, "ally");

        assert_eq!(player.adjust_relationship("Bren", -10, None), -10);
        assert_eq!(player.relationship("Bren").unwrap().status, "rival");
    }

    #[test]
    fn flags_record_the_scene() {
        let mut player = PlayerState::new();
        player.set_flag("met_the_queen", FlagValue::Bool(true), 9);
        let entry = player.flag("met_the_queen").unwrap();
        assert_eq!(entry.set_at, 9);
        assert_eq!(entry.value, FlagValue::Bool(true));
    }
}
