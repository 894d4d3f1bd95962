//! Per-game derived analysis.

use serde::{Deserialize, Serialize};

use super::{MatchId, Role, TimelineInsights};

/// Stats-only loss cause, derived from final match numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum LossReason {
    DragonControl,
    BaronControl,
    TowerPressure,
    LowCs { role: Role },
    LowDamageShare,
    LowKillParticipation,
    HighDeaths,
    /// Fallback when nothing else triggered
    Outscaled,
}

impl std::fmt::Display for LossReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LossReason::DragonControl => write!(f, "Fell behind in dragon control."),
            LossReason::BaronControl => write!(f, "Lost Baron control."),
            LossReason::TowerPressure => write!(f, "Lost a lot of tower pressure."),
            LossReason::LowCs { role } => write!(f, "Low CS/min for a {}.", role.label_singular()),
            LossReason::LowDamageShare => write!(f, "Low damage share relative to team."),
            LossReason::LowKillParticipation => write!(f, "Low kill participation."),
            LossReason::HighDeaths => write!(f, "High deaths / low KDA."),
            LossReason::Outscaled => write!(f, "Outscaled / lost extended teamfights."),
        }
    }
}

/// 1-based descending rank among the player's team (1 = best).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRanks {
    pub damage: usize,
    pub gold: usize,
    pub cs_per_min: usize,
}

/// One match, seen from the analyzed player's seat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameAnalysis {
    pub match_id: MatchId,
    pub champion: String,
    pub role: Role,
    pub win: bool,
    pub patch: String,
    pub season: Option<u32>,
    pub duration_minutes: f64,
    pub game_end_timestamp: Option<i64>,

    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub kda: f64,
    pub cs_per_min: f64,
    pub damage_share: f64,
    pub gold_share: f64,
    pub kill_participation: f64,
    pub team_avg_kill_participation: f64,
    pub vision_score: u32,
    pub damage_per_min: f64,
    pub team_kills: u32,
    pub enemy_kills: u32,

    pub ranks: TeamRanks,

    /// Heuristic over/under-performance score, roughly in [-3, +3]
    pub responsibility: f64,

    /// Stats-only causes, in trigger order; empty for wins
    pub loss_reasons: Vec<LossReason>,

    /// Present when a timeline was supplied
    pub timeline: Option<TimelineInsights>,
}

impl GameAnalysis {
    pub fn is_loss(&self) -> bool {
        !self.win
    }

    /// Season this game belongs to when compared against `current`.
    pub fn in_season(&self, current: Option<u32>) -> bool {
        current.is_some() && self.season == current
    }
}
