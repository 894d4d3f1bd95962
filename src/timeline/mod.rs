//! Timeline analysis.
//!
//! Everything here reads one match's frames and events from the analyzed
//! player's seat:
//! - Gold-difference series and objective tallies
//! - Timeline-aware loss tags (losses only)
//! - Position series, roams, jungle pathing and fight participation
//! - Raw extracts (skills, items, wards, buildings, resources)

pub mod extract;
pub mod fights;
pub mod gold;
pub mod loss;
pub mod movement;
pub mod wards;

use tracing::debug;

use crate::calculate::{classify_role, AnalysisError};
use crate::config::AnalyzerConfig;
use crate::models::{opposing_team, MatchRecord, Participant, PlayerId, TimelineInsights, TimelineRecord};

/// Where the analyzed player sits in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seat {
    pub participant_id: u32,
    pub team_id: u32,
    pub enemy_team_id: u32,
}

impl Seat {
    pub fn of(participant: &Participant) -> Self {
        Self {
            participant_id: participant.participant_id,
            team_id: participant.team_id,
            enemy_team_id: opposing_team(participant.team_id),
        }
    }
}

/// Run every timeline analysis for `player` in one match.
pub fn analyze_timeline(
    record: &MatchRecord,
    timeline: &TimelineRecord,
    player: &PlayerId,
    config: &AnalyzerConfig,
) -> Result<TimelineInsights, AnalysisError> {
    let me = record
        .participant(player)
        .ok_or_else(|| AnalysisError::MissingPlayerInMatch {
            match_id: record.id().clone(),
            player_id: player.clone(),
        })?;
    let seat = Seat::of(me);
    let role = classify_role(me);

    let gold = gold::summarize_gold(record, timeline, &seat, &config.timeline);
    let loss = (!me.win).then(|| {
        let picks = loss::detect_picks_before_objectives(record, timeline, &seat, &config.timeline);
        loss::classify_loss(&gold, picks, &config.timeline)
    });

    let extracts = extract::extract(timeline, &seat, &config.movement);
    let movement = movement::analyze_movement(
        record,
        timeline,
        &seat,
        role,
        &extracts.ward_events,
        &config.movement,
    );

    debug!(
        match_id = %record.id(),
        frames = timeline.frames().len(),
        samples = movement.position_samples.len(),
        fights = movement.fights.fights.len(),
        "Analyzed timeline"
    );

    Ok(TimelineInsights {
        gold,
        loss,
        movement,
        extracts,
    })
}
