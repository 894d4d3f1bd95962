//! Aggregate report over many matches.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{GameAnalysis, InputFingerprint, LossReason, LossTag, MatchId, PlayerId, Role};

/// Overall summary statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub win_rate: f64,
    pub avg_kda: f64,
    pub avg_damage_share: f64,
    pub avg_gold_share: f64,
    pub avg_cs_per_min: f64,
    pub avg_kp: f64,
    pub avg_vision_score: f64,
    pub avg_damage_per_min: f64,
}

/// Recency weighting applied to large samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonFilter {
    pub current_season: u32,
    pub current_season_games: u32,
    pub current_season_weight: f64,
    pub older_season_weight: f64,
}

/// Per-character stats (unweighted per-game means).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChampionStats {
    pub champion: String,
    pub games: u32,
    pub wins: u32,
    pub win_rate: f64,
    pub avg_kda: f64,
    pub cs_per_min: f64,
    pub damage_share: f64,
    pub avg_kp: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LossPattern {
    pub reason: LossReason,
    pub description: String,
    pub count: u32,
    /// Share of all losses in which this reason triggered
    pub percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatchSummary {
    pub counts: BTreeMap<String, u32>,
    pub most_common_patch: Option<String>,
    pub most_common_patch_games: u32,
    pub most_common_patch_share: f64,
    pub relevant_patches: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaselineStatus {
    Above,
    Near,
    Below,
    NoBaseline,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineMetric {
    pub your_value: f64,
    pub baseline: f64,
    pub status: BaselineStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineComparison {
    pub role: Role,
    pub avg_cs_per_min: BaselineMetric,
    pub avg_damage_share: BaselineMetric,
    pub avg_kda: BaselineMetric,
    pub avg_kp: BaselineMetric,
}

impl BaselineComparison {
    /// How many of the four compared metrics trail their baseline.
    pub fn below_count(&self) -> usize {
        [
            &self.avg_cs_per_min,
            &self.avg_damage_share,
            &self.avg_kda,
            &self.avg_kp,
        ]
        .iter()
        .filter(|m| m.status == BaselineStatus::Below)
        .count()
    }
}

/// Who the losses look attributable to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    TeamDriven,
    PlayerDriven,
    Mixed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponsibilityVerdict {
    pub overall_index: f64,
    pub losses_index: f64,
    pub verdict: Verdict,
    pub below_baseline_caveat: bool,
    pub classification: String,
}

/// Stats-only diagnostics for one loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LossDetail {
    pub match_id: MatchId,
    pub champion: String,
    pub role: Role,
    pub game_length_min: f64,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub cs_per_min: f64,
    pub damage_share: f64,
    pub kp: f64,
    pub team_kills: u32,
    pub enemy_kills: u32,
    pub reasons: Vec<LossReason>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeammateStats {
    pub player_id: PlayerId,
    pub name: String,
    pub tag: String,
    pub games: u32,
    pub wins: u32,
    pub win_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentChampionStats {
    pub champion: String,
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub win_rate: f64,
}

/// Macro patterns summarized from timeline loss diagnoses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroProfile {
    pub games_with_timeline_data: u32,
    pub tag_counts: BTreeMap<LossTag, u32>,
    pub tag_rates: BTreeMap<LossTag, f64>,
    pub avg_max_lead: f64,
    pub avg_max_deficit: f64,
    pub avg_dragon_gap: f64,
    pub avg_baron_gap: f64,
    pub likely_themes: Vec<String>,
}

/// A match excluded from the fold, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedMatch {
    pub match_id: MatchId,
    pub reason: String,
}

/// The final deliverable over N matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    pub player_id: PlayerId,
    pub fingerprint: InputFingerprint,

    /// Reference instant for the trailing-window sub-report
    pub as_of: DateTime<Utc>,

    pub summary: SummaryStats,
    pub is_weighted: bool,
    pub season_filter: Option<SeasonFilter>,

    pub primary_role: Role,
    pub role_counts: BTreeMap<Role, u32>,
    pub patch_summary: PatchSummary,
    pub season_counts: BTreeMap<String, u32>,

    pub per_champion: Vec<ChampionStats>,
    pub loss_patterns: Vec<LossPattern>,
    pub loss_details: Vec<LossDetail>,
    pub baseline_comparison: BaselineComparison,
    pub you_vs_team: ResponsibilityVerdict,

    pub teammates: Vec<TeammateStats>,
    pub recent_performance: Vec<RecentChampionStats>,
    pub macro_profile: MacroProfile,

    pub games: Vec<GameAnalysis>,
    pub skipped: Vec<SkippedMatch>,
}

/// Result of analyzing a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Analysis {
    /// No analyzable matches were supplied
    NothingToAnalyze { skipped: Vec<SkippedMatch> },
    Report(Box<AggregateReport>),
}

impl Analysis {
    pub fn report(&self) -> Option<&AggregateReport> {
        match self {
            Analysis::Report(report) => Some(report),
            Analysis::NothingToAnalyze { .. } => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Analysis::NothingToAnalyze { .. })
    }
}
