//! Fight clustering and participation.

use std::collections::BTreeSet;

use crate::config::MovementConfig;
use crate::models::{
    EventKind, FightCluster, FightKind, FightSummary, MatchRecord, Position, PositionSample,
    TimelineEvent,
};

use super::Seat;

/// Larger-side head count at which a fight is a teamfight.
pub const TEAMFIGHT_SIZE: u32 = 4;

/// Larger-side head count at which a fight is a skirmish.
pub const SKIRMISH_SIZE: u32 = 3;

/// Group time-ordered kill events into fights.
///
/// A kill joins the current cluster when it happened at most `gap_ms`
/// after the previous kill.
pub fn cluster_kills<'a>(kills: &[&'a TimelineEvent], gap_ms: i64) -> Vec<Vec<&'a TimelineEvent>> {
    let mut clusters: Vec<Vec<&'a TimelineEvent>> = Vec::new();
    let mut current: Vec<&'a TimelineEvent> = Vec::new();

    for &kill in kills {
        if let Some(prev) = current.last() {
            if kill.timestamp - prev.timestamp > gap_ms {
                clusters.push(std::mem::take(&mut current));
            }
        }
        current.push(kill);
    }
    if !current.is_empty() {
        clusters.push(current);
    }
    clusters
}

pub fn classify_fight(ally_count: u32, enemy_count: u32) -> FightKind {
    let larger = ally_count.max(enemy_count);
    if larger >= TEAMFIGHT_SIZE {
        FightKind::Teamfight
    } else if larger >= SKIRMISH_SIZE {
        FightKind::Skirmish
    } else {
        FightKind::Pick
    }
}

/// Mean of the explicit event positions in a cluster.
fn centroid(cluster: &[&TimelineEvent]) -> Option<Position> {
    let positions: Vec<Position> = cluster.iter().filter_map(|e| e.position()).collect();
    if positions.is_empty() {
        return None;
    }
    // floored mean
    let n = positions.len() as i64;
    let x = positions.iter().map(|p| p.x as i64).sum::<i64>().div_euclid(n);
    let y = positions.iter().map(|p| p.y as i64).sum::<i64>().div_euclid(n);
    Some(Position::new(x as i32, y as i32))
}

/// Last known position at or before `time_ms`.
fn position_at(samples: &[PositionSample], time_ms: i64) -> Option<Position> {
    samples
        .iter()
        .take_while(|s| s.time_ms <= time_ms)
        .last()
        .map(PositionSample::position)
}

fn describe_cluster(
    record: &MatchRecord,
    cluster: &[&TimelineEvent],
    seat: &Seat,
    samples: &[PositionSample],
    config: &MovementConfig,
) -> FightCluster {
    let mut allies = BTreeSet::new();
    let mut enemies = BTreeSet::new();
    let mut add = |pid: u32| match record.team_of(pid) {
        Some(team) if team == seat.team_id => {
            allies.insert(pid);
        }
        Some(team) if team == seat.enemy_team_id => {
            enemies.insert(pid);
        }
        _ => {}
    };

    for event in cluster {
        if let EventKind::ChampionKill {
            killer_id,
            victim_id,
            assisting_participant_ids,
            ..
        } = &event.kind
        {
            if *killer_id != 0 {
                add(*killer_id);
            }
            add(*victim_id);
            for assist in assisting_participant_ids {
                add(*assist);
            }
        }
    }

    let start_ms = cluster.first().map(|e| e.timestamp).unwrap_or_default();
    let end_ms = cluster.last().map(|e| e.timestamp).unwrap_or(start_ms);
    let centroid = centroid(cluster);
    let on_scoreboard = cluster.iter().any(|e| e.on_scoreboard(seat.participant_id));

    let nearby = match (centroid, position_at(samples, start_ms)) {
        (Some(center), Some(pos)) => pos.distance_to(&center) <= config.fight_presence_radius,
        _ => false,
    };

    let ally_count = allies.len() as u32;
    let enemy_count = enemies.len() as u32;

    FightCluster {
        start_ms,
        end_ms,
        kills: cluster.len() as u32,
        kind: classify_fight(ally_count, enemy_count),
        ally_count,
        enemy_count,
        centroid,
        on_scoreboard,
        present: on_scoreboard || nearby,
    }
}

/// Cluster kills into fights and tally the player's participation.
pub fn analyze_fights(
    record: &MatchRecord,
    kills: &[&TimelineEvent],
    seat: &Seat,
    samples: &[PositionSample],
    config: &MovementConfig,
) -> FightSummary {
    let mut summary = FightSummary::default();

    for cluster in cluster_kills(kills, config.fight_gap_ms) {
        let fight = describe_cluster(record, &cluster, seat, samples, config);
        match fight.kind {
            FightKind::Teamfight => {
                summary.teamfights += 1;
                if fight.present {
                    summary.teamfights_present += 1;
                } else {
                    summary.teamfights_absent += 1;
                }
            }
            FightKind::Skirmish => {
                summary.skirmishes += 1;
                if fight.present {
                    summary.skirmishes_present += 1;
                }
            }
            FightKind::Pick => {
                summary.picks += 1;
                if fight.present {
                    summary.picks_present += 1;
                }
            }
        }
        summary.fights.push(fight);
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SampleSource;
    use crate::test_support::{kill, standard_match};
    use pretty_assertions::assert_eq;

    fn seat() -> Seat {
        Seat {
            participant_id: 1,
            team_id: 100,
            enemy_team_id: 200,
        }
    }

    fn event(timestamp: i64, kind: EventKind) -> TimelineEvent {
        TimelineEvent { timestamp, kind }
    }

    #[test]
    fn test_nine_seconds_joins_cluster() {
        let a = event(100_000, kill(6, 2, vec![], 0, 0));
        let b = event(109_000, kill(7, 3, vec![], 0, 0));
        let clusters = cluster_kills(&[&a, &b], 10_000);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].len(), 2);
    }

    #[test]
    fn test_eleven_seconds_splits_cluster() {
        let a = event(100_000, kill(6, 2, vec![], 0, 0));
        let b = event(111_000, kill(7, 3, vec![], 0, 0));
        let clusters = cluster_kills(&[&a, &b], 10_000);
        assert_eq!(clusters.len(), 2);
    }

    #[test]
    fn test_gap_measured_from_previous_kill() {
        let a = event(0, kill(6, 2, vec![], 0, 0));
        let b = event(8_000, kill(7, 3, vec![], 0, 0));
        let c = event(16_000, kill(8, 4, vec![], 0, 0));
        let clusters = cluster_kills(&[&a, &b, &c], 10_000);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].len(), 3);
    }

    #[test]
    fn test_classify_by_larger_side() {
        assert_eq!(classify_fight(4, 1), FightKind::Teamfight);
        assert_eq!(classify_fight(1, 3), FightKind::Skirmish);
        assert_eq!(classify_fight(2, 2), FightKind::Pick);
    }

    #[test]
    fn test_teamfight_presence_by_proximity() {
        let record = standard_match("NA1_1", true);
        let kills = [
            event(600_000, kill(6, 2, vec![7, 8], 9000, 9000)),
            event(604_000, kill(3, 9, vec![2, 4, 5], 9200, 9200)),
            event(609_000, kill(10, 4, vec![], 9400, 9400)),
        ];
        let refs: Vec<&TimelineEvent> = kills.iter().collect();
        let samples = vec![PositionSample::new(
            590_000,
            Position::new(8000, 8000),
            SampleSource::Frame,
        )];

        let summary = analyze_fights(&record, &refs, &seat(), &samples, &MovementConfig::default());
        assert_eq!(summary.teamfights, 1);
        assert_eq!(summary.teamfights_present, 1);
        assert_eq!(summary.teamfights_absent, 0);

        let fight = &summary.fights[0];
        assert_eq!(fight.ally_count, 4);
        assert_eq!(fight.enemy_count, 5);
        assert_eq!(fight.centroid, Some(Position::new(9200, 9200)));
        assert!(!fight.on_scoreboard);
        assert!(fight.present);
    }

    #[test]
    fn test_centroid_floors_odd_sums() {
        let a = event(600_000, kill(6, 2, vec![], 100, 201));
        let b = event(603_000, kill(7, 3, vec![], 101, 202));
        assert_eq!(centroid(&[&a, &b]), Some(Position::new(100, 201)));
    }

    #[test]
    fn test_absent_when_far_away() {
        let record = standard_match("NA1_1", true);
        let kills = [event(600_000, kill(6, 2, vec![], 9000, 9000))];
        let refs: Vec<&TimelineEvent> = kills.iter().collect();
        let samples = vec![PositionSample::new(
            590_000,
            Position::new(400, 400),
            SampleSource::Frame,
        )];

        let summary = analyze_fights(&record, &refs, &seat(), &samples, &MovementConfig::default());
        assert_eq!(summary.picks, 1);
        assert_eq!(summary.picks_present, 0);
        assert!(!summary.fights[0].present);
    }

    #[test]
    fn test_on_scoreboard_means_present() {
        let record = standard_match("NA1_1", true);
        let kills = [event(600_000, kill(6, 3, vec![1], 9000, 9000))];
        let refs: Vec<&TimelineEvent> = kills.iter().collect();

        let summary = analyze_fights(&record, &refs, &seat(), &[], &MovementConfig::default());
        assert!(summary.fights[0].on_scoreboard);
        assert!(summary.fights[0].present);
    }

    #[test]
    fn test_execution_killer_is_ignored() {
        let record = standard_match("NA1_1", true);
        let kills = [event(600_000, kill(0, 2, vec![], 9000, 9000))];
        let refs: Vec<&TimelineEvent> = kills.iter().collect();

        let summary = analyze_fights(&record, &refs, &seat(), &[], &MovementConfig::default());
        assert_eq!(summary.fights[0].ally_count, 1);
        assert_eq!(summary.fights[0].enemy_count, 0);
    }
}
