//! The quest log: quests, objectives, rewards, and the arrival sweep.

use std::fmt;

use serde::{Deserialize, Serialize};

use wf_world::LocationId;

use crate::player::PlayerState;
use crate::travel::TravelState;

/// Unique identifier for a quest.
///
/// Ids are derived deterministically — never from wall-clock time — so the
/// same scene always produces the same ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestId(String);

impl QuestId {
    /// Wrap an id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Id of the travel quest targeting `target`, created at `from_scene`.
    ///
    /// Scoping by scene avoids accidental duplicates within the same scene
    /// while keeping the id reproducible.
    pub fn travel(target: &LocationId, from_scene: u32) -> Self {
        Self(format!("travel_{target}_s{from_scene}"))
    }

    /// Id of the narrative quest gating the unlock of a destination.
    pub fn travel_unlock(target: &LocationId) -> Self {
        Self(format!("travel_unlock_{target}"))
    }

    /// Id for a quest added by an effect, derived from its title and scene.
    pub fn derived(title: &str, from_scene: u32) -> Self {
        let slug: String = title
            .to_lowercase()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        Self(format!("quest_{slug}_s{from_scene}"))
    }
}

impl fmt::Display for QuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for QuestId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Narrative category of a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuestType {
    /// Drives the main storyline.
    Main,
    /// Optional side content.
    #[default]
    Side,
    /// Requires reaching a specific location.
    Travel,
}

impl fmt::Display for QuestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Main => "main",
            Self::Side => "side",
            Self::Travel => "travel",
        };
        write!(f, "{name}")
    }
}

/// Lifecycle state of a quest. Terminal states never re-open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuestStatus {
    /// In progress.
    #[default]
    Active,
    /// All non-optional objectives completed. Terminal.
    Completed,
    /// Explicitly failed. Terminal.
    Failed,
}

impl fmt::Display for QuestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        write!(f, "{name}")
    }
}

/// What an objective asks the player to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectiveGoal {
    /// Reach a specific location; completed by the arrival sweep.
    Travel {
        /// The destination to reach.
        target: LocationId,
    },
    /// Free-form narrative objective, resolved only by explicit effects.
    Narrative,
}

/// A single step of a quest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Objective {
    /// Identifier unique within the owning quest.
    pub id: String,
    /// Player-facing description.
    pub description: String,
    /// What fulfills the objective.
    pub goal: ObjectiveGoal,
    /// Whether the objective is done.
    pub completed: bool,
    /// Optional objectives do not block quest completion.
    pub optional: bool,
}

/// What completing a quest grants.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestRewards {
    /// Reputation stat delta.
    pub reputation: i64,
    /// Gold stat delta.
    pub gold: i64,
    /// A location unlocked on completion.
    pub unlock: Option<LocationId>,
}

impl QuestRewards {
    /// Default reward of a travel quest: `+10 reputation` plus an unlock of
    /// the target location.
    pub fn travel_default(target: &LocationId) -> Self {
        Self {
            reputation: 10,
            gold: 0,
            unlock: Some(target.clone()),
        }
    }

    /// Fold the rewards into player and travel state.
    ///
    /// Returns the updated travel snapshot and human-readable notes for the
    /// journal.
    pub fn grant(&self, player: &mut PlayerState, travel: &TravelState) -> (TravelState, Vec<String>) {
        let mut notes = Vec::new();
        if self.reputation != 0 {
            player.adjust_stat("reputation", self.reputation);
            notes.push(format!("reputation {:+}", self.reputation));
        }
        if self.gold != 0 {
            player.adjust_stat("gold", self.gold);
            notes.push(format!("gold {:+}", self.gold));
        }
        let travel = if let Some(target) = &self.unlock {
            notes.push(format!("unlocked {target}"));
            travel.unlock_location(target)
        } else {
            travel.clone()
        };
        (travel, notes)
    }
}

/// A tracked narrative quest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quest {
    /// Identity of the quest.
    pub id: QuestId,
    /// Player-facing title.
    pub title: String,
    /// Player-facing description.
    pub description: String,
    /// Narrative category.
    pub quest_type: QuestType,
    /// Lifecycle state.
    pub status: QuestStatus,
    /// Steps to complete, in order.
    pub objectives: Vec<Objective>,
    /// Act the quest belongs to.
    pub act_number: u32,
    /// Scene the quest was created in.
    pub from_scene: u32,
    /// Scene number the quest must be resolved by, if any.
    pub deadline: Option<u32>,
    /// Granted when the quest completes.
    pub rewards: Option<QuestRewards>,
    /// Whether the quest came from scenario data rather than an effect.
    pub from_scenario: bool,
}

impl Quest {
    /// Build a single-objective travel quest.
    pub fn travel(
        target: &LocationId,
        target_name: &str,
        reason: &str,
        act_number: u32,
        from_scene: u32,
        deadline: Option<u32>,
        rewards: Option<QuestRewards>,
    ) -> Self {
        let id = QuestId::travel(target, from_scene);
        Self {
            id,
            title: format!("Journey to {target_name}"),
            description: reason.to_string(),
            quest_type: QuestType::Travel,
            status: QuestStatus::Active,
            objectives: vec![Objective {
                id: format!("reach_{target}"),
                description: format!("Reach {target_name}"),
                goal: ObjectiveGoal::Travel {
                    target: target.clone(),
                },
                completed: false,
                optional: false,
            }],
            act_number,
            from_scene,
            deadline,
            rewards: Some(rewards.unwrap_or_else(|| QuestRewards::travel_default(target))),
            from_scenario: false,
        }
    }

    /// Whether every non-optional objective is completed.
    pub fn objectives_done(&self) -> bool {
        !self.objectives.is_empty()
            && self
                .objectives
                .iter()
                .filter(|o| !o.optional)
                .all(|o| o.completed)
    }

    /// First incomplete objective, if any.
    pub fn current_objective(&self) -> Option<&Objective> {
        self.objectives.iter().find(|o| !o.completed)
    }

    fn refresh_status(&mut self) {
        if self.status == QuestStatus::Active && self.objectives_done() {
            self.status = QuestStatus::Completed;
        }
    }
}

/// Compact quest view handed to the generation service.
#[derive(Debug, Clone, Serialize)]
pub struct QuestSummary {
    /// Quest id.
    pub id: QuestId,
    /// Quest title.
    pub title: String,
    /// Description of the first incomplete objective, if any.
    pub current_objective: Option<String>,
    /// Narrative category.
    pub quest_type: QuestType,
}

/// Result of the arrival sweep: the updated log plus the quests it newly
/// completed.
#[derive(Debug, Clone)]
pub struct ArrivalSweep {
    /// The swept log.
    pub log: QuestLog,
    /// Quests that transitioned to `Completed` during the sweep.
    pub completed: Vec<Quest>,
}

/// Ordered collection of quests for one session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestLog {
    quests: Vec<Quest>,
}

impl QuestLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a quest. A duplicate id is a no-op; returns whether it was added.
    pub fn add(&mut self, quest: Quest) -> bool {
        if self.quests.iter().any(|q| q.id == quest.id) {
            return false;
        }
        self.quests.push(quest);
        true
    }

    /// Look up a quest by id.
    pub fn get(&self, id: &QuestId) -> Option<&Quest> {
        self.quests.iter().find(|q| q.id == *id)
    }

    /// All quests, in creation order.
    pub fn all(&self) -> &[Quest] {
        &self.quests
    }

    /// Quests still active.
    pub fn active(&self) -> impl Iterator<Item = &Quest> {
        self.quests
            .iter()
            .filter(|q| q.status == QuestStatus::Active)
    }

    /// Number of quests in the log.
    pub fn len(&self) -> usize {
        self.quests.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }

    /// Mark a quest completed. Terminal; unknown ids and quests already in a
    /// terminal state are no-ops. Returns the quest as of the transition.
    pub fn complete(&mut self, id: &QuestId) -> Option<Quest> {
        let quest = self
            .quests
            .iter_mut()
            .find(|q| q.id == *id && q.status == QuestStatus::Active)?;
        for objective in &mut quest.objectives {
            if !objective.optional {
                objective.completed = true;
            }
        }
        quest.status = QuestStatus::Completed;
        Some(quest.clone())
    }

    /// Mark a quest failed. Terminal; unknown ids and terminal quests are
    /// no-ops. Returns whether a transition happened.
    pub fn fail(&mut self, id: &QuestId) -> bool {
        if let Some(quest) = self
            .quests
            .iter_mut()
            .find(|q| q.id == *id && q.status == QuestStatus::Active)
        {
            quest.status = QuestStatus::Failed;
            true
        } else {
            false
        }
    }

    /// The arrival sweep: for every active quest, mark travel objectives
    /// targeting `arrived` completed and promote quests whose non-optional
    /// objectives are all done.
    ///
    /// Pure — the receiver is untouched, so it is safe to run speculatively.
    /// Applying the sweep twice with the same location changes nothing.
    pub fn on_arrival(&self, arrived: &LocationId) -> ArrivalSweep {
        let mut log = self.clone();
        let mut completed = Vec::new();
        for quest in &mut log.quests {
            if quest.status != QuestStatus::Active {
                continue;
            }
            for objective in &mut quest.objectives {
                let reached = matches!(
                    &objective.goal,
                    ObjectiveGoal::Travel { target } if target == arrived
                );
                if reached {
                    objective.completed = true;
                }
            }
            quest.refresh_status();
            if quest.status == QuestStatus::Completed {
                completed.push(quest.clone());
            }
        }
        ArrivalSweep { log, completed }
    }

    /// Compact summaries of the active quests for the generation service.
    pub fn summaries(&self) -> Vec<QuestSummary> {
        self.active()
            .map(|q| QuestSummary {
                id: q.id.clone(),
                title: q.title.clone(),
                current_objective: q.current_objective().map(|o| o.description.clone()),
                quest_type: q.quest_type,
            })
            .collect()
    }
}
