//! Per-match timelines: periodic frames plus discrete events.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::MatchMetadata;

/// `monsterType` of a dragon kill.
pub const MONSTER_DRAGON: &str = "DRAGON";

/// `monsterType` of a baron kill.
pub const MONSTER_BARON: &str = "BARON_NASHOR";

/// Milliseconds per minute, for converting event timestamps.
pub const MS_PER_MINUTE: f64 = 60_000.0;

/// A map coordinate (the map is roughly 14820 x 14820 units).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

/// The timeline for one match, 1:1 with a [`super::MatchRecord`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineRecord {
    pub metadata: MatchMetadata,
    pub info: TimelineInfo,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineInfo {
    #[serde(default)]
    pub frame_interval: Option<i64>,

    #[serde(default)]
    pub frames: Vec<Frame>,
}

impl TimelineRecord {
    pub fn frames(&self) -> &[Frame] {
        &self.info.frames
    }

    /// All events across frames, ordered by timestamp. Events sharing a
    /// timestamp keep their original relative order.
    pub fn events(&self) -> Vec<&TimelineEvent> {
        let mut events: Vec<&TimelineEvent> = self
            .info
            .frames
            .iter()
            .flat_map(|f| f.events.iter())
            .collect();
        events.sort_by_key(|e| e.timestamp);
        events
    }
}

/// One periodic snapshot (usually one per minute).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    #[serde(default)]
    pub timestamp: i64,

    /// Keyed by participant id ("1".."10" on the wire)
    #[serde(default)]
    pub participant_frames: BTreeMap<u32, ParticipantFrame>,

    #[serde(default)]
    pub events: Vec<TimelineEvent>,
}

impl Frame {
    pub fn position_of(&self, participant_id: u32) -> Option<Position> {
        self.participant_frames
            .get(&participant_id)
            .and_then(|pf| pf.position)
    }
}

/// One participant's state inside a frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantFrame {
    #[serde(default)]
    pub total_gold: i64,

    #[serde(default)]
    pub xp: i64,

    #[serde(default = "default_level")]
    pub level: u32,

    #[serde(default)]
    pub minions_killed: u32,

    #[serde(default)]
    pub jungle_minions_killed: u32,

    #[serde(default)]
    pub position: Option<Position>,
}

fn default_level() -> u32 {
    1
}

/// A timestamped discrete event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Milliseconds since game start
    #[serde(default)]
    pub timestamp: i64,

    #[serde(flatten)]
    pub kind: EventKind,
}

/// Event payloads, discriminated by the wire `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum EventKind {
    ChampionKill {
        /// 0 when the kill was an execution
        #[serde(default)]
        killer_id: u32,
        #[serde(default)]
        victim_id: u32,
        #[serde(default)]
        assisting_participant_ids: Vec<u32>,
        #[serde(default)]
        position: Option<Position>,
    },
    EliteMonsterKill {
        #[serde(default)]
        killer_id: u32,
        #[serde(default)]
        killer_team_id: Option<u32>,
        #[serde(default)]
        monster_type: String,
        #[serde(default)]
        monster_sub_type: Option<String>,
        #[serde(default)]
        position: Option<Position>,
    },
    BuildingKill {
        #[serde(default)]
        killer_id: u32,
        /// Team that owned the destroyed building
        #[serde(default)]
        team_id: u32,
        #[serde(default)]
        building_type: Option<String>,
        #[serde(default)]
        lane_type: Option<String>,
        #[serde(default)]
        tower_type: Option<String>,
        #[serde(default)]
        position: Option<Position>,
    },
    WardPlaced {
        #[serde(default)]
        creator_id: u32,
        #[serde(default)]
        ward_type: Option<String>,
        #[serde(default)]
        position: Option<Position>,
    },
    WardKill {
        #[serde(default)]
        killer_id: u32,
        #[serde(default)]
        ward_type: Option<String>,
        #[serde(default)]
        position: Option<Position>,
    },
    ItemPurchased {
        #[serde(default)]
        participant_id: u32,
        #[serde(default)]
        item_id: u32,
    },
    ItemSold {
        #[serde(default)]
        participant_id: u32,
        #[serde(default)]
        item_id: u32,
    },
    #[serde(rename = "ITEM_UNDO", alias = "ITEM_UNDONE")]
    ItemUndo {
        #[serde(default)]
        participant_id: u32,
        #[serde(default)]
        before_id: u32,
        #[serde(default)]
        after_id: u32,
        #[serde(default)]
        gold_gain: i64,
    },
    ItemDestroyed {
        #[serde(default)]
        participant_id: u32,
        #[serde(default)]
        item_id: u32,
    },
    SkillLevelUp {
        #[serde(default)]
        participant_id: u32,
        #[serde(default)]
        skill_slot: u32,
        #[serde(default)]
        level_up_type: Option<String>,
    },
    /// Any event type this crate does not analyze
    #[serde(other)]
    Other,
}

impl TimelineEvent {
    /// Explicit map position carried by the event, if any.
    pub fn position(&self) -> Option<Position> {
        match &self.kind {
            EventKind::ChampionKill { position, .. }
            | EventKind::EliteMonsterKill { position, .. }
            | EventKind::BuildingKill { position, .. }
            | EventKind::WardPlaced { position, .. }
            | EventKind::WardKill { position, .. } => *position,
            _ => None,
        }
    }

    pub fn is_champion_kill(&self) -> bool {
        matches!(self.kind, EventKind::ChampionKill { .. })
    }

    /// True when the participant got the kill or an assist.
    pub fn credits(&self, participant_id: u32) -> bool {
        match &self.kind {
            EventKind::ChampionKill {
                killer_id,
                assisting_participant_ids,
                ..
            } => *killer_id == participant_id || assisting_participant_ids.contains(&participant_id),
            _ => false,
        }
    }

    /// True when the participant appears anywhere on a kill's scoreboard.
    pub fn on_scoreboard(&self, participant_id: u32) -> bool {
        match &self.kind {
            EventKind::ChampionKill { victim_id, .. } => {
                *victim_id == participant_id || self.credits(participant_id)
            }
            _ => false,
        }
    }

    pub fn minute(&self) -> f64 {
        self.timestamp as f64 / MS_PER_MINUTE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_frames_and_events() {
        let timeline: TimelineRecord = serde_json::from_value(json!({
            "metadata": { "matchId": "NA1_1" },
            "info": {
                "frameInterval": 60000,
                "frames": [{
                    "timestamp": 60000,
                    "participantFrames": {
                        "1": { "totalGold": 800, "xp": 300, "level": 2, "minionsKilled": 6,
                               "position": { "x": 5000, "y": 5100 } },
                        "6": { "totalGold": 700 }
                    },
                    "events": [
                        { "type": "CHAMPION_KILL", "timestamp": 55000, "killerId": 1, "victimId": 6,
                          "assistingParticipantIds": [2], "position": { "x": 10, "y": 20 } },
                        { "type": "ITEM_PURCHASED", "timestamp": 1000, "participantId": 1, "itemId": 1055 },
                        { "type": "ITEM_UNDO", "timestamp": 1200, "participantId": 1, "beforeId": 1055, "afterId": 0, "goldGain": 450 },
                        { "type": "LEVEL_UP", "timestamp": 30000, "participantId": 1, "level": 2 }
                    ]
                }]
            }
        }))
        .unwrap();

        let frame = &timeline.frames()[0];
        assert_eq!(frame.position_of(1), Some(Position::new(5000, 5100)));
        assert_eq!(frame.position_of(6), None);
        assert_eq!(frame.participant_frames[&6].level, 1);

        let events = timeline.events();
        assert_eq!(events.len(), 4);
        assert_eq!(events[0].timestamp, 1000);
        assert!(matches!(events[1].kind, EventKind::ItemUndo { gold_gain: 450, .. }));
        assert_eq!(events[2].kind, EventKind::Other);
        assert!(events[3].credits(2));
        assert!(events[3].on_scoreboard(6));
        assert!(!events[3].credits(6));
    }

    #[test]
    fn test_item_undone_alias() {
        let event: TimelineEvent = serde_json::from_value(json!({
            "type": "ITEM_UNDONE", "timestamp": 5, "participantId": 3, "beforeId": 1, "afterId": 0
        }))
        .unwrap();
        assert!(matches!(event.kind, EventKind::ItemUndo { participant_id: 3, .. }));
    }

    #[test]
    fn test_distance() {
        let a = Position::new(0, 0);
        let b = Position::new(3000, 4000);
        assert!((a.distance_to(&b) - 5000.0).abs() < 1e-9);
    }
}
