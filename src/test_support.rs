//! Fixture builders shared by the unit tests.

use std::collections::BTreeMap;

use crate::models::{
    EventKind, Frame, MatchInfo, MatchMetadata, MatchRecord, Participant, ParticipantFrame,
    PlayerId, Position, TeamRecord, TimelineEvent, TimelineInfo, TimelineRecord,
};

/// 2024-03-01T00:00:00Z in epoch milliseconds.
pub const BASE_END_TS: i64 = 1_709_251_200_000;

const POSITIONS: [&str; 5] = ["TOP", "JUNGLE", "MIDDLE", "BOTTOM", "UTILITY"];

/// The analyzed player in every fixture: participant 1, blue side, top.
pub fn me() -> PlayerId {
    PlayerId::from("p1")
}

/// A 30 minute, patch 14.3 game with ten participants `p1`..`p10`.
///
/// Participants 1-5 are blue (100), 6-10 red (200). Participant `i` has
/// `i` kills, 2 deaths, 3 assists, `10_000 * i` damage, `8_000 + 500 * i`
/// gold and `150 + 10 * i` lane CS. `blue_wins` decides the result.
pub fn standard_match(match_id: &str, blue_wins: bool) -> MatchRecord {
    let participants = (1..=10u32)
        .map(|i| {
            let team_id = if i <= 5 { 100 } else { 200 };
            let slot = ((i - 1) % 5) as usize;
            let mut p = Participant {
                puuid: PlayerId::new(format!("p{i}")),
                participant_id: i,
                team_id,
                champion_name: Some(format!("Champ{i}")),
                riot_id_game_name: Some(format!("Player{i}")),
                riot_id_tagline: Some("NA1".to_string()),
                kills: i,
                deaths: 2,
                assists: 3,
                total_damage_dealt_to_champions: 10_000 * i as u64,
                gold_earned: 8_000 + 500 * i as u64,
                vision_score: 20,
                total_minions_killed: 150 + 10 * i,
                team_position: Some(POSITIONS[slot].to_string()),
                summoner1_id: Some(4),
                summoner2_id: Some(14),
                win: (team_id == 100) == blue_wins,
                ..Default::default()
            };
            if slot == 1 {
                p.summoner2_id = Some(11);
            }
            p
        })
        .collect();

    MatchRecord {
        metadata: MatchMetadata {
            match_id: match_id.into(),
        },
        info: MatchInfo {
            game_duration: 1800,
            game_version: Some("14.3.556.1234".to_string()),
            game_end_timestamp: Some(BASE_END_TS),
            participants,
            teams: vec![
                TeamRecord {
                    team_id: 100,
                    win: blue_wins,
                    ..Default::default()
                },
                TeamRecord {
                    team_id: 200,
                    win: !blue_wins,
                    ..Default::default()
                },
            ],
        },
    }
}

/// A game from `season` (e.g. 13 → "13.24.1"), ending `end_ts`.
pub fn match_in_season(match_id: &str, blue_wins: bool, season: u32, end_ts: i64) -> MatchRecord {
    let mut record = standard_match(match_id, blue_wins);
    record.info.game_version = Some(format!("{season}.24.1"));
    record.info.game_end_timestamp = Some(end_ts);
    record
}

/// Participant frame with only gold and a position set.
pub fn pframe(total_gold: i64, x: i32, y: i32) -> ParticipantFrame {
    ParticipantFrame {
        total_gold,
        position: Some(Position::new(x, y)),
        ..Default::default()
    }
}

/// One frame per minute with per-team gold supplied by `gold_at(minute)`
/// as (blue total, red total), split evenly over each team's five players.
/// Every player sits at mid lane (7400, 7400) unless overridden afterwards.
pub fn timeline_with_gold<F>(match_id: &str, minutes: u32, gold_at: F) -> TimelineRecord
where
    F: Fn(u32) -> (i64, i64),
{
    let frames = (0..=minutes)
        .map(|minute| {
            let (blue, red) = gold_at(minute);
            let participant_frames: BTreeMap<u32, ParticipantFrame> = (1..=10u32)
                .map(|pid| {
                    let gold = if pid <= 5 { blue / 5 } else { red / 5 };
                    (pid, pframe(gold, 7400, 7400))
                })
                .collect();
            Frame {
                timestamp: minute as i64 * 60_000,
                participant_frames,
                events: Vec::new(),
            }
        })
        .collect();

    TimelineRecord {
        metadata: MatchMetadata {
            match_id: match_id.into(),
        },
        info: TimelineInfo {
            frame_interval: Some(60_000),
            frames,
        },
    }
}

/// Append an event to the frame covering its timestamp.
pub fn push_event(timeline: &mut TimelineRecord, timestamp: i64, kind: EventKind) {
    let index = timeline
        .info
        .frames
        .iter()
        .rposition(|f| f.timestamp <= timestamp)
        .unwrap_or(0);
    timeline.info.frames[index]
        .events
        .push(TimelineEvent { timestamp, kind });
}

pub fn kill(killer_id: u32, victim_id: u32, assists: Vec<u32>, x: i32, y: i32) -> EventKind {
    EventKind::ChampionKill {
        killer_id,
        victim_id,
        assisting_participant_ids: assists,
        position: Some(Position::new(x, y)),
    }
}

pub fn dragon(killer_id: u32, killer_team_id: u32) -> EventKind {
    EventKind::EliteMonsterKill {
        killer_id,
        killer_team_id: Some(killer_team_id),
        monster_type: "DRAGON".to_string(),
        monster_sub_type: Some("FIRE_DRAGON".to_string()),
        position: Some(Position::new(9866, 4414)),
    }
}

pub fn baron(killer_id: u32, killer_team_id: u32) -> EventKind {
    EventKind::EliteMonsterKill {
        killer_id,
        killer_team_id: Some(killer_team_id),
        monster_type: "BARON_NASHOR".to_string(),
        monster_sub_type: None,
        position: Some(Position::new(5007, 10471)),
    }
}
