//! Position series, roam detection and early jungle pathing.

use std::collections::BTreeMap;

use crate::config::MovementConfig;
use crate::models::{
    EventKind, JunglePathing, LaneZone, MatchRecord, MovementSummary, Position, PositionSample,
    Role, RoamSummary, RoamWindow, SampleSource, TimelineEvent, TimelineRecord, WardAction,
    WardEvent, BLUE_TEAM,
};

use super::fights::analyze_fights;
use super::Seat;

/// Blue side fountain.
pub const BLUE_FOUNTAIN: Position = Position { x: 400, y: 400 };

/// Red side fountain.
pub const RED_FOUNTAIN: Position = Position { x: 14400, y: 14400 };

pub fn fountain_for(team_id: u32) -> Position {
    if team_id == BLUE_TEAM {
        BLUE_FOUNTAIN
    } else {
        RED_FOUNTAIN
    }
}

/// Lane band for a Y coordinate.
pub fn lane_zone(y: i32, config: &MovementConfig) -> LaneZone {
    if y > config.top_lane_min_y {
        LaneZone::Top
    } else if y < config.bottom_lane_max_y {
        LaneZone::Bottom
    } else {
        LaneZone::Middle
    }
}

/// The player's positions over time.
///
/// Frame snapshots are augmented with waypoints from the player's own kills
/// and deaths, wards they placed or cleared, and item purchases (which put
/// the player at their fountain). Samples are time-ordered; when several
/// share a timestamp the first one wins, so frame snapshots take precedence.
pub fn build_position_series(
    timeline: &TimelineRecord,
    seat: &Seat,
    ward_events: &[WardEvent],
) -> Vec<PositionSample> {
    let pid = seat.participant_id;

    let mut samples: Vec<PositionSample> = timeline
        .frames()
        .iter()
        .filter_map(|f| {
            f.position_of(pid)
                .map(|pos| PositionSample::new(f.timestamp, pos, SampleSource::Frame))
        })
        .collect();

    for event in timeline.events() {
        match &event.kind {
            EventKind::ChampionKill {
                killer_id,
                victim_id,
                position: Some(pos),
                ..
            } => {
                if *killer_id == pid {
                    samples.push(PositionSample::new(event.timestamp, *pos, SampleSource::Kill));
                } else if *victim_id == pid {
                    samples.push(PositionSample::new(event.timestamp, *pos, SampleSource::Death));
                }
            }
            EventKind::ItemPurchased { participant_id, .. } if *participant_id == pid => {
                samples.push(PositionSample::new(
                    event.timestamp,
                    fountain_for(seat.team_id),
                    SampleSource::ItemPurchase,
                ));
            }
            _ => {}
        }
    }

    for ward in ward_events.iter().filter(|w| w.participant_id == pid) {
        let Some(pos) = ward.position else {
            continue;
        };
        let source = match ward.action {
            WardAction::Placed => SampleSource::WardPlaced,
            WardAction::Killed => SampleSource::WardKilled,
        };
        let mut sample = PositionSample::new(ward.timestamp, pos, source);
        sample.estimated = ward.estimated;
        samples.push(sample);
    }

    samples.sort_by_key(|s| s.time_ms);
    samples.dedup_by_key(|s| s.time_ms);
    samples
}

/// Detect roams away from the opening lane.
///
/// A roam runs from the first sample outside the home lane to the last
/// consecutive sample outside it, and counts when it lasts at least the
/// configured minimum. It is successful when the player is credited with a
/// kill or assist inside the window.
pub fn detect_roams(
    samples: &[PositionSample],
    credited_kills: &[i64],
    config: &MovementConfig,
) -> RoamSummary {
    let Some(first) = samples.first() else {
        return RoamSummary::default();
    };
    let home = lane_zone(first.y, config);

    let mut windows = Vec::new();
    let mut open: Option<(i64, i64, LaneZone)> = None;

    let mut close = |start: i64, end: i64, lane: LaneZone| {
        if end - start >= config.roam_min_ms {
            let successful = credited_kills.iter().any(|t| *t >= start && *t <= end);
            windows.push(RoamWindow {
                start_ms: start,
                end_ms: end,
                lane,
                successful,
            });
        }
    };

    for sample in samples {
        let lane = lane_zone(sample.y, config);
        if lane != home {
            match open.as_mut() {
                Some(window) => window.1 = sample.time_ms,
                None => open = Some((sample.time_ms, sample.time_ms, lane)),
            }
        } else if let Some((start, end, lane)) = open.take() {
            close(start, end, lane);
        }
    }
    if let Some((start, end, lane)) = open {
        close(start, end, lane);
    }

    RoamSummary {
        home_lane: Some(home),
        total_roams: windows.len() as u32,
        successful_roams: windows.iter().filter(|w| w.successful).count() as u32,
        windows,
    }
}

/// Early credited takedowns bucketed by the lane band they happened in.
pub fn analyze_jungle(events: &[&TimelineEvent], seat: &Seat, config: &MovementConfig) -> JunglePathing {
    let mut early_kills_by_lane = BTreeMap::new();
    for event in events {
        if event.timestamp >= config.jungle_early_cutoff_ms || !event.credits(seat.participant_id) {
            continue;
        }
        if let Some(pos) = event.position() {
            *early_kills_by_lane.entry(lane_zone(pos.y, config)).or_insert(0) += 1;
        }
    }
    JunglePathing { early_kills_by_lane }
}

/// Movement, roam, jungle and fight analysis for one player.
pub fn analyze_movement(
    record: &MatchRecord,
    timeline: &TimelineRecord,
    seat: &Seat,
    role: Role,
    ward_events: &[WardEvent],
    config: &MovementConfig,
) -> MovementSummary {
    let position_samples = build_position_series(timeline, seat, ward_events);

    let kills: Vec<&TimelineEvent> = timeline
        .events()
        .into_iter()
        .filter(|e| e.is_champion_kill())
        .collect();
    let credited: Vec<i64> = kills
        .iter()
        .filter(|e| e.credits(seat.participant_id))
        .map(|e| e.timestamp)
        .collect();

    let roams = role
        .is_laner()
        .then(|| detect_roams(&position_samples, &credited, config));
    let jungle = (role == Role::Jungle).then(|| analyze_jungle(&kills, seat, config));
    let fights = analyze_fights(record, &kills, seat, &position_samples, config);

    MovementSummary {
        role,
        position_samples,
        roams,
        jungle,
        fights,
    }
}
