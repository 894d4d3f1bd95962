//! Timeline-aware loss classification.

use crate::config::TimelineConfig;
use crate::models::{EventKind, GoldSummary, LossDiagnosis, LossTag, MatchRecord, PickTally, TimelineRecord};

use super::Seat;

/// Count enemy objective takes preceded by a teammate death.
///
/// For every enemy elite-monster kill, a take counts once when any
/// teammate died within the pick window before it (strictly earlier). The
/// player-only count applies the same test to the player's own deaths.
pub fn detect_picks_before_objectives(
    record: &MatchRecord,
    timeline: &TimelineRecord,
    seat: &Seat,
    config: &TimelineConfig,
) -> PickTally {
    let events = timeline.events();

    let enemy_objectives: Vec<i64> = events
        .iter()
        .filter(|e| {
            matches!(
                e.kind,
                EventKind::EliteMonsterKill { killer_team_id: Some(team), .. } if team == seat.enemy_team_id
            )
        })
        .map(|e| e.timestamp)
        .collect();

    // (timestamp, victim) for every death on the player's team
    let team_deaths: Vec<(i64, u32)> = events
        .iter()
        .filter_map(|e| match e.kind {
            EventKind::ChampionKill { victim_id, .. }
                if record.team_of(victim_id) == Some(seat.team_id) =>
            {
                Some((e.timestamp, victim_id))
            }
            _ => None,
        })
        .collect();

    let in_window = |death_ts: i64, objective_ts: i64| {
        let gap = objective_ts - death_ts;
        gap > 0 && gap <= config.pick_window_ms
    };

    let mut tally = PickTally::default();
    for objective_ts in enemy_objectives {
        if team_deaths.iter().any(|(ts, _)| in_window(*ts, objective_ts)) {
            tally.picked_before_objective += 1;
        }
        if team_deaths
            .iter()
            .any(|(ts, victim)| *victim == seat.participant_id && in_window(*ts, objective_ts))
        {
            tally.self_picked_before_objective += 1;
        }
    }
    tally
}

/// Tag a loss from its gold summary and pick tally.
pub fn classify_loss(gold: &GoldSummary, picks: PickTally, config: &TimelineConfig) -> LossDiagnosis {
    let early = gold.early.gold_diff;
    let mid = gold.mid.gold_diff;
    let mut tags = Vec::new();

    if gold.max_lead >= config.throw_lead_gold && (mid < 0.0 || early > mid) {
        tags.push(LossTag::ThrewLead);
    }
    if early <= -config.early_gap_gold {
        tags.push(LossTag::EarlyGap);
    }
    if gold.objectives.dragon_gap < 0 || gold.objectives.baron_gap < 0 {
        tags.push(LossTag::ObjectiveGap);
    }
    if picks.picked_before_objective > 0 {
        tags.push(LossTag::GotPickedBeforeObjective);
    }
    if tags.is_empty() {
        tags.push(LossTag::EvenOrUnclear);
    }

    let primary_reason = LossTag::PRIORITY
        .into_iter()
        .find(|tag| tags.contains(tag))
        .unwrap_or(tags[0]);

    LossDiagnosis {
        primary_reason,
        tags,
        max_lead: gold.max_lead,
        max_deficit: gold.max_deficit,
        early: gold.early,
        mid: gold.mid,
        objectives: gold.objectives,
        picks,
    }
}
