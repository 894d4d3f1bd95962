//! Raw per-player extracts: skill order, item build, wards, buildings and
//! the resource curve.

use crate::config::MovementConfig;
use crate::models::{
    BuildingKillEvent, EventKind, ItemAction, ItemHistoryEntry, ResourceSample, SkillLevelUp,
    TimelineExtracts, TimelineRecord, WardAction, WardEvent, MS_PER_MINUTE,
};

use super::wards::estimate_ward_position;
use super::Seat;

const DEFAULT_LEVEL_UP_TYPE: &str = "NORMAL";
const UNKNOWN_WARD_TYPE: &str = "UNKNOWN";

fn item_entry(timestamp: i64, action: ItemAction, item_id: u32) -> ItemHistoryEntry {
    ItemHistoryEntry {
        timestamp,
        action,
        item_id,
        before_id: 0,
        after_id: 0,
    }
}

/// Pull the player's raw event history out of a timeline.
///
/// Building kills are kept for both teams. Ward placements without a
/// position get an estimated one from the surrounding frames.
pub fn extract(timeline: &TimelineRecord, seat: &Seat, config: &MovementConfig) -> TimelineExtracts {
    let pid = seat.participant_id;
    let mut extracts = TimelineExtracts::default();

    for event in timeline.events() {
        let ts = event.timestamp;
        match &event.kind {
            EventKind::SkillLevelUp {
                participant_id,
                skill_slot,
                level_up_type,
            } if *participant_id == pid => {
                extracts.skill_order.push(SkillLevelUp {
                    timestamp: ts,
                    skill_slot: *skill_slot,
                    level_up_type: level_up_type
                        .clone()
                        .unwrap_or_else(|| DEFAULT_LEVEL_UP_TYPE.to_string()),
                });
            }
            EventKind::ItemPurchased {
                participant_id,
                item_id,
            } if *participant_id == pid => {
                extracts
                    .item_build
                    .push(item_entry(ts, ItemAction::Purchased, *item_id));
            }
            EventKind::ItemSold {
                participant_id,
                item_id,
            } if *participant_id == pid => {
                extracts.item_build.push(item_entry(ts, ItemAction::Sold, *item_id));
            }
            EventKind::ItemDestroyed {
                participant_id,
                item_id,
            } if *participant_id == pid => {
                extracts
                    .item_build
                    .push(item_entry(ts, ItemAction::Destroyed, *item_id));
            }
            EventKind::ItemUndo {
                participant_id,
                before_id,
                after_id,
                ..
            } if *participant_id == pid => {
                extracts.item_build.push(ItemHistoryEntry {
                    timestamp: ts,
                    action: ItemAction::Undo,
                    item_id: *before_id,
                    before_id: *before_id,
                    after_id: *after_id,
                });
            }
            EventKind::WardPlaced {
                creator_id,
                ward_type,
                position,
            } if *creator_id == pid => {
                let (position, estimated) = match position {
                    Some(pos) => (Some(*pos), false),
                    None => (
                        estimate_ward_position(timeline.frames(), pid, ts, config),
                        true,
                    ),
                };
                extracts.ward_events.push(WardEvent {
                    timestamp: ts,
                    action: WardAction::Placed,
                    ward_type: ward_type
                        .clone()
                        .unwrap_or_else(|| UNKNOWN_WARD_TYPE.to_string()),
                    participant_id: pid,
                    position,
                    estimated,
                });
            }
            EventKind::WardKill {
                killer_id,
                ward_type,
                position,
            } if *killer_id == pid => {
                extracts.ward_events.push(WardEvent {
                    timestamp: ts,
                    action: WardAction::Killed,
                    ward_type: ward_type
                        .clone()
                        .unwrap_or_else(|| UNKNOWN_WARD_TYPE.to_string()),
                    participant_id: pid,
                    position: *position,
                    estimated: false,
                });
            }
            EventKind::BuildingKill {
                team_id,
                building_type,
                lane_type,
                tower_type,
                position,
                ..
            } => {
                extracts.building_kills.push(BuildingKillEvent {
                    timestamp: ts,
                    team_id: *team_id,
                    building_type: building_type.clone(),
                    lane_type: lane_type.clone(),
                    tower_type: tower_type.clone(),
                    position: *position,
                });
            }
            _ => {}
        }
    }

    extracts.resource_series = timeline
        .frames()
        .iter()
        .filter_map(|frame| {
            let pf = frame.participant_frames.get(&pid)?;
            Some(ResourceSample {
                minute: frame.timestamp as f64 / MS_PER_MINUTE,
                total_gold: pf.total_gold,
                xp: pf.xp,
                level: pf.level,
                creep_score: pf.minions_killed + pf.jungle_minions_killed,
            })
        })
        .collect();

    extracts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;
    use crate::test_support::{push_event, timeline_with_gold};
    use pretty_assertions::assert_eq;

    fn seat() -> Seat {
        Seat {
            participant_id: 1,
            team_id: 100,
            enemy_team_id: 200,
        }
    }

    #[test]
    fn test_skill_order_defaults_type() {
        let mut timeline = timeline_with_gold("NA1_1", 3, |_| (0, 0));
        push_event(
            &mut timeline,
            5_000,
            EventKind::SkillLevelUp {
                participant_id: 1,
                skill_slot: 1,
                level_up_type: None,
            },
        );
        push_event(
            &mut timeline,
            70_000,
            EventKind::SkillLevelUp {
                participant_id: 1,
                skill_slot: 3,
                level_up_type: Some("EVOLVE".to_string()),
            },
        );
        push_event(
            &mut timeline,
            80_000,
            EventKind::SkillLevelUp {
                participant_id: 6,
                skill_slot: 2,
                level_up_type: None,
            },
        );

        let extracts = extract(&timeline, &seat(), &MovementConfig::default());
        assert_eq!(
            extracts.skill_order,
            vec![
                SkillLevelUp {
                    timestamp: 5_000,
                    skill_slot: 1,
                    level_up_type: "NORMAL".to_string(),
                },
                SkillLevelUp {
                    timestamp: 70_000,
                    skill_slot: 3,
                    level_up_type: "EVOLVE".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_item_build_history() {
        let mut timeline = timeline_with_gold("NA1_1", 3, |_| (0, 0));
        push_event(
            &mut timeline,
            1_000,
            EventKind::ItemPurchased {
                participant_id: 1,
                item_id: 1055,
            },
        );
        push_event(
            &mut timeline,
            2_000,
            EventKind::ItemUndo {
                participant_id: 1,
                before_id: 1055,
                after_id: 0,
                gold_gain: 450,
            },
        );
        push_event(
            &mut timeline,
            90_000,
            EventKind::ItemDestroyed {
                participant_id: 1,
                item_id: 2003,
            },
        );
        push_event(
            &mut timeline,
            150_000,
            EventKind::ItemSold {
                participant_id: 1,
                item_id: 1001,
            },
        );

        let extracts = extract(&timeline, &seat(), &MovementConfig::default());
        let actions: Vec<(ItemAction, u32)> = extracts
            .item_build
            .iter()
            .map(|e| (e.action, e.item_id))
            .collect();
        assert_eq!(
            actions,
            vec![
                (ItemAction::Purchased, 1055),
                (ItemAction::Undo, 1055),
                (ItemAction::Destroyed, 2003),
                (ItemAction::Sold, 1001),
            ]
        );
        assert_eq!(extracts.item_build[1].before_id, 1055);
        assert_eq!(extracts.item_build[1].after_id, 0);
    }

    #[test]
    fn test_ward_events_with_estimate() {
        let mut timeline = timeline_with_gold("NA1_1", 3, |_| (0, 0));
        push_event(
            &mut timeline,
            30_000,
            EventKind::WardPlaced {
                creator_id: 1,
                ward_type: Some("YELLOW_TRINKET".to_string()),
                position: None,
            },
        );
        push_event(
            &mut timeline,
            40_000,
            EventKind::WardPlaced {
                creator_id: 1,
                ward_type: None,
                position: Some(Position::new(2000, 2000)),
            },
        );
        push_event(
            &mut timeline,
            50_000,
            EventKind::WardKill {
                killer_id: 1,
                ward_type: Some("CONTROL_WARD".to_string()),
                position: None,
            },
        );
        push_event(
            &mut timeline,
            55_000,
            EventKind::WardPlaced {
                creator_id: 7,
                ward_type: None,
                position: None,
            },
        );

        let extracts = extract(&timeline, &seat(), &MovementConfig::default());
        assert_eq!(extracts.ward_events.len(), 3);

        // all frames put the player at (7400, 7400), snapped to the mid lane spot
        let estimated = &extracts.ward_events[0];
        assert!(estimated.estimated);
        assert_eq!(estimated.position, Some(Position::new(7403, 7399)));

        let explicit = &extracts.ward_events[1];
        assert!(!explicit.estimated);
        assert_eq!(explicit.ward_type, "UNKNOWN");

        let cleared = &extracts.ward_events[2];
        assert_eq!(cleared.action, WardAction::Killed);
        assert_eq!(cleared.position, None);
    }

    #[test]
    fn test_building_kills_for_both_teams() {
        let mut timeline = timeline_with_gold("NA1_1", 20, |_| (0, 0));
        for (ts, team) in [(700_000, 200), (900_000, 100)] {
            push_event(
                &mut timeline,
                ts,
                EventKind::BuildingKill {
                    killer_id: 0,
                    team_id: team,
                    building_type: Some("TOWER_BUILDING".to_string()),
                    lane_type: Some("MID_LANE".to_string()),
                    tower_type: Some("OUTER_TURRET".to_string()),
                    position: Some(Position::new(8955, 8510)),
                },
            );
        }

        let extracts = extract(&timeline, &seat(), &MovementConfig::default());
        let teams: Vec<u32> = extracts.building_kills.iter().map(|b| b.team_id).collect();
        assert_eq!(teams, vec![200, 100]);
    }

    #[test]
    fn test_resource_series_per_frame() {
        let mut timeline = timeline_with_gold("NA1_1", 2, |m| (5000 * m as i64, 0));
        let pf = timeline.info.frames[2].participant_frames.get_mut(&1).unwrap();
        pf.minions_killed = 14;
        pf.jungle_minions_killed = 2;
        pf.level = 3;

        let extracts = extract(&timeline, &seat(), &MovementConfig::default());
        assert_eq!(extracts.resource_series.len(), 3);
        let last = extracts.resource_series[2];
        assert_eq!(last.minute, 2.0);
        assert_eq!(last.total_gold, 2000);
        assert_eq!(last.level, 3);
        assert_eq!(last.creep_score, 16);
    }
}
