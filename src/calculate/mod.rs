//! Statistics calculation engine.
//!
//! Computes derived metrics from match records:
//! - Role classification
//! - Per-game metrics, team-relative ranks and stats-only loss reasons
//! - Aggregate stats with season-aware weighting
//! - Role baselines and the "you vs team" verdict
//! - Teammate, recent-performance and macro sub-reports

pub mod aggregate;
pub mod baseline;
pub mod game;
pub mod role;
pub mod sub_reports;

pub use aggregate::{build_report, AnalyzedMatch};
pub use game::analyze_game;
pub use role::classify_role;

use thiserror::Error;

use crate::models::{MatchId, PlayerId};

/// Errors raised while analyzing a single match.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("Player {player_id} not found in match {match_id}")]
    MissingPlayerInMatch {
        match_id: MatchId,
        player_id: PlayerId,
    },
}

/// Calculate win rate from wins and games played.
pub fn calculate_win_rate(wins: u32, games: u32) -> f64 {
    if games == 0 {
        0.0
    } else {
        wins as f64 / games as f64
    }
}

/// Ratio with a zero denominator resolving to 0.0.
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// (kills + assists) / deaths, or kills + assists when deathless.
pub fn calculate_kda(kills: u32, deaths: u32, assists: u32) -> f64 {
    let takedowns = (kills + assists) as f64;
    if deaths == 0 {
        takedowns
    } else {
        takedowns / deaths as f64
    }
}

/// 1-based descending rank of `value` among `values`.
///
/// Ties share the better rank: the result is one more than the number of
/// strictly greater values, which is the position of the first equal element
/// in a descending sort. A value that is not comparable (NaN) ranks last.
pub fn rank_desc(values: &[f64], value: f64) -> usize {
    if value.is_nan() {
        return values.len();
    }
    values.iter().filter(|v| **v > value).count() + 1
}

/// Arithmetic mean; 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Weighted mean over `(value, weight)` pairs; 0.0 when total weight is 0.
pub fn weighted_mean<I>(pairs: I) -> f64
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let (sum, total) = pairs
        .into_iter()
        .fold((0.0, 0.0), |(s, t), (v, w)| (s + v * w, t + w));
    safe_ratio(sum, total)
}
