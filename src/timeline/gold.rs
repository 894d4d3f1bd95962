//! Gold-difference series and objective tallies.

use crate::config::TimelineConfig;
use crate::models::{
    EventKind, GoldSample, GoldSnapshot, GoldSummary, MatchRecord, ObjectiveTally, TimelineRecord,
    MONSTER_BARON, MONSTER_DRAGON, MS_PER_MINUTE,
};

use super::Seat;

/// Minute offset past the early snapshot that the mid snapshot must reach.
const MID_MIN_OFFSET: f64 = 1.0;

/// Own-team minus enemy-team total gold, one sample per frame.
///
/// Frame entries for participant ids missing from the match are ignored.
pub fn gold_diff_series(record: &MatchRecord, timeline: &TimelineRecord, seat: &Seat) -> Vec<GoldSample> {
    timeline
        .frames()
        .iter()
        .map(|frame| {
            let gold_diff = frame
                .participant_frames
                .iter()
                .filter_map(|(pid, pf)| {
                    let team = record.team_of(*pid)?;
                    if team == seat.team_id {
                        Some(pf.total_gold as f64)
                    } else if team == seat.enemy_team_id {
                        Some(-(pf.total_gold as f64))
                    } else {
                        None
                    }
                })
                .sum();
            GoldSample {
                minute: frame.timestamp as f64 / MS_PER_MINUTE,
                gold_diff,
            }
        })
        .collect()
}

fn snapshot_at_or_before(series: &[GoldSample], target: f64, fallback: GoldSample) -> GoldSnapshot {
    let sample = series
        .iter()
        .take_while(|s| s.minute <= target)
        .last()
        .copied()
        .unwrap_or(fallback);
    GoldSnapshot {
        minute: sample.minute,
        gold_diff: sample.gold_diff,
    }
}

/// Reduce a gold series to extrema and the early/mid checkpoints.
///
/// The early snapshot is the last sample at or before the early minute, else
/// the first sample. The mid snapshot is the last sample at or before
/// `max(game length / 2, early minute + 1)`, else the final sample.
pub fn summarize_series(
    series: Vec<GoldSample>,
    objectives: ObjectiveTally,
    config: &TimelineConfig,
) -> GoldSummary {
    let (Some(first), Some(last)) = (series.first().copied(), series.last().copied()) else {
        return GoldSummary {
            series,
            max_lead: 0.0,
            max_deficit: 0.0,
            early: GoldSnapshot {
                minute: config.early_minute,
                gold_diff: 0.0,
            },
            mid: GoldSnapshot {
                minute: config.early_minute * 2.0,
                gold_diff: 0.0,
            },
            objectives,
        };
    };

    let max_lead = series
        .iter()
        .map(|s| s.gold_diff)
        .fold(f64::NEG_INFINITY, f64::max);
    let max_deficit = series
        .iter()
        .map(|s| s.gold_diff)
        .fold(f64::INFINITY, f64::min);

    let early = snapshot_at_or_before(&series, config.early_minute, first);
    let mid_target = (last.minute * 0.5).max(early.minute + MID_MIN_OFFSET);
    let mid = snapshot_at_or_before(&series, mid_target, last);

    GoldSummary {
        series,
        max_lead,
        max_deficit,
        early,
        mid,
        objectives,
    }
}

/// Dragon and baron takes per side, counted from objective-kill events.
pub fn tally_objectives(timeline: &TimelineRecord, seat: &Seat) -> ObjectiveTally {
    let mut tally = ObjectiveTally::default();

    for event in timeline.events() {
        let EventKind::EliteMonsterKill {
            killer_team_id: Some(team),
            monster_type,
            ..
        } = &event.kind
        else {
            continue;
        };
        let mine = *team == seat.team_id;
        let theirs = *team == seat.enemy_team_id;
        match monster_type.as_str() {
            MONSTER_DRAGON if mine => tally.my_dragons += 1,
            MONSTER_DRAGON if theirs => tally.enemy_dragons += 1,
            MONSTER_BARON if mine => tally.my_barons += 1,
            MONSTER_BARON if theirs => tally.enemy_barons += 1,
            _ => {}
        }
    }

    tally.dragon_gap = tally.my_dragons as i32 - tally.enemy_dragons as i32;
    tally.baron_gap = tally.my_barons as i32 - tally.enemy_barons as i32;
    tally
}

/// Gold series, its summary, and the objective tally for one player.
pub fn summarize_gold(
    record: &MatchRecord,
    timeline: &TimelineRecord,
    seat: &Seat,
    config: &TimelineConfig,
) -> GoldSummary {
    let series = gold_diff_series(record, timeline, seat);
    let objectives = tally_objectives(timeline, seat);
    summarize_series(series, objectives, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{baron, dragon, push_event, standard_match, timeline_with_gold};
    use pretty_assertions::assert_eq;

    fn seat() -> Seat {
        Seat {
            participant_id: 1,
            team_id: 100,
            enemy_team_id: 200,
        }
    }

    fn samples(points: &[(f64, f64)]) -> Vec<GoldSample> {
        points
            .iter()
            .map(|(minute, gold_diff)| GoldSample {
                minute: *minute,
                gold_diff: *gold_diff,
            })
            .collect()
    }

    #[test]
    fn test_series_from_frames() {
        let record = standard_match("NA1_1", false);
        let timeline = timeline_with_gold("NA1_1", 2, |m| (5000 * m as i64, 4000 * m as i64));
        let series = gold_diff_series(&record, &timeline, &seat());

        assert_eq!(series.len(), 3);
        assert_eq!(series[0].gold_diff, 0.0);
        assert_eq!(series[2].minute, 2.0);
        assert_eq!(series[2].gold_diff, 2000.0);
    }

    #[test]
    fn test_early_gap_snapshots() {
        let series = samples(&[(0.0, 0.0), (10.0, -2000.0), (20.0, -2500.0), (30.0, -2600.0)]);
        let summary = summarize_series(series, ObjectiveTally::default(), &TimelineConfig::default());

        assert_eq!(summary.early.minute, 10.0);
        assert_eq!(summary.early.gold_diff, -2000.0);
        assert_eq!(summary.mid.minute, 10.0);
        assert_eq!(summary.mid.gold_diff, -2000.0);
        assert_eq!(summary.max_lead, 0.0);
        assert_eq!(summary.max_deficit, -2600.0);
    }

    #[test]
    fn test_mid_snapshot_half_game() {
        let series: Vec<GoldSample> = (0..=40)
            .map(|m| GoldSample {
                minute: m as f64,
                gold_diff: m as f64 * 100.0,
            })
            .collect();
        let summary = summarize_series(series, ObjectiveTally::default(), &TimelineConfig::default());
        assert_eq!(summary.early.minute, 10.0);
        assert_eq!(summary.mid.minute, 20.0);
        assert_eq!(summary.max_lead, 4000.0);
    }

    #[test]
    fn test_first_sample_when_nothing_before_early_minute() {
        let series = samples(&[(12.0, 300.0), (24.0, 100.0)]);
        let summary = summarize_series(series, ObjectiveTally::default(), &TimelineConfig::default());
        assert_eq!(summary.early.minute, 12.0);
        // max(12, 13) = 13 → only the first sample qualifies
        assert_eq!(summary.mid.minute, 12.0);
    }

    #[test]
    fn test_empty_series_defaults() {
        let summary = summarize_series(Vec::new(), ObjectiveTally::default(), &TimelineConfig::default());
        assert_eq!(summary.early.minute, 10.0);
        assert_eq!(summary.mid.minute, 20.0);
        assert_eq!(summary.max_lead, 0.0);
        assert!(summary.series.is_empty());
    }

    #[test]
    fn test_objectives_from_events() {
        let mut timeline = timeline_with_gold("NA1_1", 30, |_| (0, 0));
        push_event(&mut timeline, 600_000, dragon(7, 200));
        push_event(&mut timeline, 900_000, dragon(8, 200));
        push_event(&mut timeline, 1_200_000, dragon(2, 100));
        push_event(&mut timeline, 1_500_000, baron(6, 200));

        let tally = tally_objectives(&timeline, &seat());
        assert_eq!(
            tally,
            ObjectiveTally {
                my_dragons: 1,
                enemy_dragons: 2,
                dragon_gap: -1,
                my_barons: 0,
                enemy_barons: 1,
                baron_gap: -1,
            }
        );
    }
}
