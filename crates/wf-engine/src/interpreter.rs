//! The effect interpreter: folds an ordered effect batch into player,
//! travel, and quest state.
//!
//! Effects apply strictly in order; later effects observe the cumulative
//! result of earlier ones within the same batch. Malformed payloads are
//! skipped per effect and never abort the rest of the batch.

use wf_world::WorldAtlas;

use crate::effect::{Effect, ItemAction, QuestAction, TravelAction};
use crate::player::PlayerState;
use crate::quest::{Objective, ObjectiveGoal, Quest, QuestId, QuestLog, QuestStatus};
use crate::travel::{ForcedTravel, TravelState};

/// Everything a batch of effects produced.
#[derive(Debug, Clone)]
pub struct EffectOutcome {
    /// Updated player state.
    pub player: PlayerState,
    /// Updated travel state.
    pub travel: TravelState,
    /// Updated quest log.
    pub quests: QuestLog,
    /// Human-readable log of applied effects, in application order.
    pub applied: Vec<String>,
    /// Reasons for effects that were skipped as malformed.
    pub skipped: Vec<String>,
    /// Quests newly spawned by the batch.
    pub new_quests: Vec<Quest>,
    /// Whether an explicit `travel: move` relocation happened.
    pub moved: bool,
    /// The forced destination a `require_travel` effect demanded, if any.
    ///
    /// The caller must check this before generating further narrative
    /// content: the intended flow is to halt scene progression and let the
    /// player pick a destination.
    pub travel_required: Option<ForcedTravel>,
}

/// Apply an ordered batch of effects against working copies of the given
/// state. The inputs are untouched; the outcome carries the replacements.
pub fn apply_effects(
    effects: &[Effect],
    player: &PlayerState,
    travel: &TravelState,
    quests: &QuestLog,
    atlas: &WorldAtlas,
    scene: u32,
    act: u32,
) -> EffectOutcome {
    let mut out = EffectOutcome {
        player: player.clone(),
        travel: travel.clone(),
        quests: quests.clone(),
        applied: Vec::new(),
        skipped: Vec::new(),
        new_quests: Vec::new(),
        moved: false,
        travel_required: None,
    };

    for effect in effects {
        apply_one(effect, &mut out, atlas, scene, act);
    }
    out
}

fn apply_one(effect: &Effect, out: &mut EffectOutcome, atlas: &WorldAtlas, scene: u32, act: u32) {
    match effect {
        Effect::Stat { attribute, delta } => {
            if attribute.trim().is_empty() {
                out.skipped.push("stat effect without attribute".to_string());
                return;
            }
            out.player.adjust_stat(attribute, *delta);
            out.applied.push(format!("{attribute} {delta:+}"));
        }
        Effect::Item { action, name } => {
            if name.trim().is_empty() {
                out.skipped.push("item effect without name".to_string());
                return;
            }
            match action {
                ItemAction::Add => {
                    out.player.add_item(name);
                    out.applied.push(format!("Gained {name}"));
                }
                ItemAction::Remove => {
                    if out.player.remove_item(name) {
                        out.applied.push(format!("Lost {name}"));
                    } else {
                        out.skipped.push(format!("item not carried: {name}"));
                    }
                }
            }
        }
        Effect::Relationship { npc, delta, status } => {
            if npc.trim().is_empty() {
                out.skipped
                    .push("relationship effect without npc".to_string());
                return;
            }
            out.player.adjust_relationship(npc, *delta, status.as_deref());
            out.applied.push(format!("{npc} {delta:+}"));
        }
        Effect::Flag { id, value } => {
            if id.trim().is_empty() {
                out.skipped.push("flag effect without id".to_string());
                return;
            }
            out.player.set_flag(id, value.clone(), scene);
            out.applied.push(format!("Flag {id} set"));
        }
        Effect::Location { target } => {
            // Unlike `travel: unlock_route`, this also marks the place known.
            out.travel = out.travel.unlock_location(target).mark_visited(target);
            out.applied.push(format!("Location unlocked: {target}"));
        }
        Effect::Travel(action) => apply_travel(action, out, atlas, scene, act),
        Effect::Quest(action) => apply_quest(action, out, scene, act),
    }
}

fn apply_travel(
    action: &TravelAction,
    out: &mut EffectOutcome,
    atlas: &WorldAtlas,
    scene: u32,
    act: u32,
) {
    match action {
        TravelAction::Move { target } => {
            let Some(destination) = atlas.poi(target) else {
                out.skipped.push(format!("move to unknown location: {target}"));
                return;
            };
            out.travel = out.travel.relocate(destination);
            out.moved = true;
            out.applied.push(format!("Moved to {}", destination.name));
        }
        TravelAction::UnlockRoute { target } => {
            let name = atlas
                .poi(target)
                .map_or_else(|| target.to_string(), |poi| poi.name.clone());
            out.travel = out.travel.unlock_location(target);
            out.applied.push(format!("Route unlocked: {name}"));
        }
        TravelAction::RequireTravel {
            target,
            reason,
            deadline,
        } => {
            let Some(destination) = atlas.poi(target) else {
                out.skipped
                    .push(format!("required travel to unknown location: {target}"));
                return;
            };
            let quest = Quest::travel(
                target,
                &destination.name,
                reason,
                act,
                scene,
                *deadline,
                None,
            );
            let forced = ForcedTravel {
                target: target.clone(),
                reason: reason.clone(),
                deadline: *deadline,
                quest: quest.id.clone(),
            };
            out.travel = out
                .travel
                .unlock_location(target)
                .set_travel_quest(forced.clone());
            if out.quests.add(quest.clone()) {
                out.new_quests.push(quest);
            }
            out.travel_required = Some(forced);
            out.applied.push(reason.clone());
        }
    }
}

/// Drop the forced destination when `resolved` is the quest owning it.
fn release_travel_quest(out: &mut EffectOutcome, resolved: &QuestId) {
    let owned = out
        .travel
        .travel_quest
        .as_ref()
        .is_some_and(|forced| forced.quest == *resolved);
    if owned {
        out.travel = out.travel.clear_travel_quest();
        out.travel_required = None;
    }
}

fn apply_quest(action: &QuestAction, out: &mut EffectOutcome, scene: u32, act: u32) {
    match action {
        QuestAction::Add {
            title,
            description,
            quest_type,
            act_number,
        } => {
            if title.trim().is_empty() {
                out.skipped.push("quest add without title".to_string());
                return;
            }
            let quest = Quest {
                id: QuestId::derived(title, scene),
                title: title.clone(),
                description: description.clone(),
                quest_type: *quest_type,
                status: QuestStatus::Active,
                objectives: vec![Objective {
                    id: "main".to_string(),
                    description: if description.is_empty() {
                        title.clone()
                    } else {
                        description.clone()
                    },
                    goal: ObjectiveGoal::Narrative,
                    completed: false,
                    optional: false,
                }],
                act_number: if *act_number == 0 { act } else { *act_number },
                from_scene: scene,
                deadline: None,
                rewards: None,
                from_scenario: false,
            };
            if out.quests.add(quest.clone()) {
                out.applied.push(format!("New quest: {title}"));
                out.new_quests.push(quest);
            } else {
                out.skipped.push(format!("duplicate quest: {}", quest.id));
            }
        }
        QuestAction::Complete { id } => {
            if let Some(quest) = out.quests.complete(id) {
                if let Some(rewards) = &quest.rewards {
                    let (travel, _) = rewards.grant(&mut out.player, &out.travel);
                    out.travel = travel;
                }
                release_travel_quest(out, id);
                out.applied.push(format!("Quest completed: {}", quest.title));
            } else {
                out.skipped.push(format!("unknown or finished quest: {id}"));
            }
        }
        QuestAction::Fail { id } => {
            if out.quests.fail(id) {
                let title = out
                    .quests
                    .get(id)
                    .map_or_else(|| id.to_string(), |q| q.title.clone());
                release_travel_quest(out, id);
                out.applied.push(format!("Quest failed: {title}"));
            } else {
                out.skipped.push(format!("unknown or finished quest: {id}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use wf_world::{Biome, Kingdom, LocationId, Poi, Position};

    use super::*;
    use crate::player::FlagValue;
    use crate::quest::{QuestStatus, QuestType};

    fn atlas() -> WorldAtlas {
        let k1 = Kingdom::new(
            "k1",
            "Kingdom One",
            Poi::new("c1", "Capital One", Position::new(0.0, 0.0), Biome::Plains, "k1"),
            vec![],
        );
        let k2 = Kingdom::new(
            "k2",
            "Kingdom Two",
            Poi::new("c2", "Capital Two", Position::new(800.0, 0.0), Biome::Plains, "k2"),
            vec![Poi::new(
                "t2",
                "Thornwick",
                Position::new(800.0, 300.0),
                Biome::Forest,
                "k2",
            )],
        );
        WorldAtlas::new("Testlands", 1000.0, vec![k1, k2]).unwrap()
    }

    fn fresh(atlas: &WorldAtlas) -> (PlayerState, TravelState, QuestLog) {
        let travel = TravelState::at(atlas.poi(&LocationId::from("c1")).unwrap());
        (PlayerState::new(), travel, QuestLog::new())
    }

    #[test]
    fn effects_apply_in_order_with_final_floor_only() {
        let atlas = atlas();
        let (mut player, travel, quests) = fresh(&atlas);
        player.adjust_stat("gold", 12);

        let effects = vec![
            Effect::Stat {
                attribute: "gold".to_string(),
                delta: -10,
            },
            Effect::Stat {
                attribute: "gold".to_string(),
                delta: 5,
            },
        ];
        let out = apply_effects(&effects, &player, &travel, &quests, &atlas, 1, 1);
        assert_eq!(out.player.stat("gold"), 7);
        assert_eq!(out.applied, vec!["gold -10", "gold +5"]);
    }

    #[test]
    fn item_add_then_remove_nets_out() {
        let atlas = atlas();
        let (player, travel, quests) = fresh(&atlas);
        let effects = vec![
            Effect::Item {
                action: ItemAction::Add,
                name: "rope".to_string(),
            },
            Effect::Item {
                action: ItemAction::Remove,
                name: "rope".to_string(),
            },
        ];
        let out = apply_effects(&effects, &player, &travel, &quests, &atlas, 1, 1);
        assert!(!out.player.has_item("rope"));
        assert_eq!(out.applied, vec!["Gained rope", "Lost rope"]);
    }

    #[test]
    fn malformed_payloads_skip_without_aborting() {
        let atlas = atlas();
        let (player, travel, quests) = fresh(&atlas);
        let effects = vec![
            Effect::Item {
                action: ItemAction::Add,
                name: String::new(),
            },
            Effect::Stat {
                attribute: "  ".to_string(),
                delta: 3,
            },
            Effect::Stat {
                attribute: "gold".to_string(),
                delta: 3,
            },
        ];
        let out = apply_effects(&effects, &player, &travel, &quests, &atlas, 1, 1);
        assert_eq!(out.skipped.len(), 2);
        assert_eq!(out.player.stat("gold"), 3);
    }

    #[test]
    fn move_relocates_without_transit() {
        let atlas = atlas();
        let (player, travel, quests) = fresh(&atlas);
        let effects = vec![Effect::Travel(TravelAction::Move {
            target: LocationId::from("t2"),
        })];
        let out = apply_effects(&effects, &player, &travel, &quests, &atlas, 1, 1);
        assert!(out.moved);
        assert_eq!(out.travel.location.as_str(), "t2");
        assert_eq!(out.travel.kingdom.as_str(), "k2");
        assert!(out.travel.has_visited(&LocationId::from("t2")));
        assert!(!out.travel.is_traveling());
    }

    #[test]
    fn require_travel_spawns_quest_and_forced_destination() {
        let atlas = atlas();
        let (player, travel, quests) = fresh(&atlas);
        let effects = vec![Effect::Travel(TravelAction::RequireTravel {
            target: LocationId::from("t2"),
            reason: "find the relic".to_string(),
            deadline: None,
        })];
        let out = apply_effects(&effects, &player, &travel, &quests, &atlas, 4, 1);

        let forced = out.travel_required.as_ref().unwrap();
        assert_eq!(forced.target.as_str(), "t2");
        assert_eq!(
            out.travel.travel_quest.as_ref().unwrap().target.as_str(),
            "t2"
        );
        assert!(out.travel.is_unlocked(&LocationId::from("t2")));

        assert_eq!(out.new_quests.len(), 1);
        let quest = &out.new_quests[0];
        assert_eq!(quest.quest_type, QuestType::Travel);
        assert_eq!(quest.objectives.len(), 1);
        assert!(!quest.objectives[0].completed);
        assert_eq!(out.quests.len(), 1);
    }

    #[test]
    fn quest_complete_grants_rewards() {
        let atlas = atlas();
        let (player, travel, mut quests) = fresh(&atlas);
        let quest = Quest::travel(
            &LocationId::from("t2"),
            "Thornwick",
            "find the relic",
            1,
            2,
            None,
            None,
        );
        let id = quest.id.clone();
        quests.add(quest);

        let effects = vec![Effect::Quest(QuestAction::Complete { id: id.clone() })];
        let out = apply_effects(&effects, &player, &travel, &quests, &atlas, 3, 1);
        assert_eq!(out.quests.get(&id).unwrap().status, QuestStatus::Completed);
        assert_eq!(out.player.stat("reputation"), 10);
        assert!(out.travel.is_unlocked(&LocationId::from("t2")));
    }

    #[test]
    fn resolving_the_owning_quest_clears_the_forced_destination() {
        let atlas = atlas();
        let (player, travel, quests) = fresh(&atlas);
        let demand = vec![Effect::Travel(TravelAction::RequireTravel {
            target: LocationId::from("t2"),
            reason: "find the relic".to_string(),
            deadline: None,
        })];
        let out = apply_effects(&demand, &player, &travel, &quests, &atlas, 2, 1);
        let quest_id = out.travel.travel_quest.as_ref().unwrap().quest.clone();

        let fail = vec![Effect::Quest(QuestAction::Fail {
            id: quest_id.clone(),
        })];
        let failed = apply_effects(&fail, &out.player, &out.travel, &out.quests, &atlas, 3, 1);
        assert!(failed.travel.travel_quest.is_none());
        assert_eq!(failed.quests.get(&quest_id).unwrap().status, QuestStatus::Failed);

        let complete = vec![Effect::Quest(QuestAction::Complete { id: quest_id })];
        let completed =
            apply_effects(&complete, &out.player, &out.travel, &out.quests, &atlas, 3, 1);
        assert!(completed.travel.travel_quest.is_none());
    }

    #[test]
    fn resolving_an_unrelated_quest_keeps_the_forced_destination() {
        let atlas = atlas();
        let (player, travel, mut quests) = fresh(&atlas);
        let side = Quest::travel(
            &LocationId::from("c2"),
            "Capital Two",
            "deliver a letter",
            1,
            1,
            None,
            None,
        );
        let side_id = side.id.clone();
        quests.add(side);

        let demand = vec![Effect::Travel(TravelAction::RequireTravel {
            target: LocationId::from("t2"),
            reason: "find the relic".to_string(),
            deadline: None,
        })];
        let out = apply_effects(&demand, &player, &travel, &quests, &atlas, 2, 1);

        let complete = vec![Effect::Quest(QuestAction::Complete { id: side_id })];
        let after = apply_effects(&complete, &out.player, &out.travel, &out.quests, &atlas, 3, 1);
        assert!(after.travel.travel_quest.is_some());
    }

    #[test]
    fn location_effect_marks_visited_and_unlocked() {
        let atlas = atlas();
        let (player, travel, quests) = fresh(&atlas);
        let effects = vec![Effect::Location {
            target: LocationId::from("c2"),
        }];
        let out = apply_effects(&effects, &player, &travel, &quests, &atlas, 1, 1);
        assert!(out.travel.is_unlocked(&LocationId::from("c2")));
        assert!(out.travel.has_visited(&LocationId::from("c2")));
        // The player did not move.
        assert_eq!(out.travel.location.as_str(), "c1");
        assert!(!out.moved);
    }

    #[test]
    fn unknown_quest_ids_skip() {
        let atlas = atlas();
        let (player, travel, quests) = fresh(&atlas);
        let effects = vec![Effect::Quest(QuestAction::Complete {
            id: QuestId::from("ghost"),
        })];
        let out = apply_effects(&effects, &player, &travel, &quests, &atlas, 1, 1);
        assert_eq!(out.skipped.len(), 1);
        assert!(out.applied.is_empty());
    }

    #[test]
    fn flags_stamp_the_current_scene() {
        let atlas = atlas();
        let (player, travel, quests) = fresh(&atlas);
        let effects = vec![Effect::Flag {
            id: "met_the_queen".to_string(),
            value: FlagValue::Bool(true),
        }];
        let out = apply_effects(&effects, &player, &travel, &quests, &atlas, 17, 1);
        assert_eq!(out.player.flag("met_the_queen").unwrap().set_at, 17);
    }

    #[test]
    fn batch_from_json_applies_end_to_end() {
        let atlas = atlas();
        let (player, travel, quests) = fresh(&atlas);
        let batch: Vec<Effect> = serde_json::from_str(
            r#"[
                {"kind": "stat", "attribute": "gold", "delta": 30},
                {"kind": "item", "action": "add", "name": "iron key"},
                {"kind": "relationship", "npc": "Mara", "delta": 15},
                {"kind": "travel", "action": "unlock_route", "target": "c2"}
            ]"#,
        )
        .unwrap();
        let out = apply_effects(&batch, &player, &travel, &quests, &atlas, 1, 1);
        assert_eq!(out.applied.len(), 4);
        assert!(out.skipped.is_empty());
        assert_eq!(out.player.stat("gold"), 30);
        assert!(out.player.has_item("iron key"));
        assert_eq!(out.player.relationship("Mara").unwrap().value, 15);
        assert!(out.travel.is_unlocked(&LocationId::from("c2")));
    }
}
