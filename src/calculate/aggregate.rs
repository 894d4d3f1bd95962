//! Aggregate stats over many analyzed games.
//!
//! The fold is sequential and consumes games in input order, so the report
//! is a pure function of its inputs plus `as_of`. Batches larger than the
//! weighting threshold with a known current season count current-season
//! games more heavily in rate-style averages, and restrict per-champion and
//! teammate breakdowns to the current season.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::config::AnalyzerConfig;
use crate::models::{
    AggregateReport, Analysis, ChampionStats, GameAnalysis, InputFingerprint, LossDetail,
    LossDiagnosis, LossPattern, LossReason, MatchId, MatchRecord, PatchSummary, PlayerId, Role,
    SeasonFilter, SkippedMatch, SummaryStats, UNKNOWN_PATCH,
};

use super::baseline::{compare_to_baseline, responsibility_verdict};
use super::sub_reports::{macro_profile, recent_performance, teammates};
use super::{calculate_win_rate, mean, safe_ratio, weighted_mean};

/// Number of most-played patches reported as relevant.
const RELEVANT_PATCHES: usize = 2;

/// One successfully analyzed game plus the record it came from.
#[derive(Debug, Clone)]
pub struct AnalyzedMatch<'a> {
    pub record: &'a MatchRecord,
    pub game: GameAnalysis,
}

/// Season of the most recent game: the largest end timestamp, or the
/// first game in input order when no game carries one.
pub fn current_season(games: &[&GameAnalysis]) -> Option<u32> {
    games
        .iter()
        .rev()
        .filter(|g| g.game_end_timestamp.is_some())
        .max_by_key(|g| g.game_end_timestamp)
        .or_else(|| games.first())
        .and_then(|g| g.season)
}

/// Fold analyzed games into the final report.
pub fn build_report(
    analyzed: Vec<AnalyzedMatch<'_>>,
    player: &PlayerId,
    as_of: DateTime<Utc>,
    skipped: Vec<SkippedMatch>,
    config: &AnalyzerConfig,
) -> Analysis {
    if analyzed.is_empty() {
        info!(skipped = skipped.len(), "No analyzable matches");
        return Analysis::NothingToAnalyze { skipped };
    }

    let agg = &config.aggregate;
    let games: Vec<&GameAnalysis> = analyzed.iter().map(|a| &a.game).collect();

    let current = current_season(&games);
    let is_weighted = games.len() > agg.weighting_threshold && current.is_some();
    let weight = |g: &GameAnalysis| {
        if is_weighted && g.in_season(current) {
            agg.current_season_weight
        } else {
            1.0
        }
    };

    let season_filter = if is_weighted {
        current.map(|season| SeasonFilter {
            current_season: season,
            current_season_games: games.iter().filter(|g| g.in_season(current)).count() as u32,
            current_season_weight: agg.current_season_weight,
            older_season_weight: 1.0,
        })
    } else {
        None
    };

    debug!(
        games = games.len(),
        ?current,
        is_weighted,
        "Aggregating games"
    );

    let summary = summarize(&games, weight);

    // per-champion and teammate breakdowns use the current season only
    // once weighting is active
    let scoped: Vec<&AnalyzedMatch<'_>> = analyzed
        .iter()
        .filter(|a| !is_weighted || a.game.in_season(current))
        .collect();
    let scoped_games: Vec<&GameAnalysis> = scoped.iter().map(|a| &a.game).collect();

    let role_counts = role_counts(&games);
    let primary_role = primary_role(&role_counts);
    let baseline_comparison = compare_to_baseline(&summary, primary_role);

    let all_scores: Vec<f64> = games.iter().map(|g| g.responsibility).collect();
    let loss_scores: Vec<f64> = games
        .iter()
        .filter(|g| g.is_loss())
        .map(|g| g.responsibility)
        .collect();
    let you_vs_team =
        responsibility_verdict(mean(&all_scores), mean(&loss_scores), &baseline_comparison);

    let diagnoses: Vec<&LossDiagnosis> = games
        .iter()
        .filter_map(|g| g.timeline.as_ref().and_then(|t| t.loss.as_ref()))
        .collect();

    let match_ids: Vec<&MatchId> = games.iter().map(|g| &g.match_id).collect();

    let report = AggregateReport {
        player_id: player.clone(),
        fingerprint: InputFingerprint::generate(player, &match_ids),
        as_of,
        is_weighted,
        season_filter,
        primary_role,
        role_counts,
        patch_summary: patch_summary(&games),
        season_counts: season_counts(&games),
        per_champion: champion_stats(&scoped_games),
        loss_patterns: loss_patterns(&games),
        loss_details: loss_details(&games),
        baseline_comparison,
        you_vs_team,
        teammates: teammates(&scoped, player, agg),
        recent_performance: recent_performance(&games, as_of, agg),
        macro_profile: macro_profile(&diagnoses),
        summary,
        games: analyzed.into_iter().map(|a| a.game).collect(),
        skipped,
    };

    info!(
        games = report.summary.games,
        win_rate = report.summary.win_rate,
        primary_role = %report.primary_role,
        skipped = report.skipped.len(),
        "Built aggregate report"
    );

    Analysis::Report(Box::new(report))
}

/// Overall summary; win rate and counts are unweighted.
pub fn summarize<W>(games: &[&GameAnalysis], weight: W) -> SummaryStats
where
    W: Fn(&GameAnalysis) -> f64,
{
    let wins = games.iter().filter(|g| g.win).count() as u32;
    let total = games.len() as u32;
    let avg = |metric: fn(&GameAnalysis) -> f64| {
        weighted_mean(games.iter().map(|g| (metric(*g), weight(*g))))
    };

    SummaryStats {
        games: total,
        wins,
        losses: total - wins,
        win_rate: calculate_win_rate(wins, total),
        avg_kda: avg(|g| g.kda),
        avg_damage_share: avg(|g| g.damage_share),
        avg_gold_share: avg(|g| g.gold_share),
        avg_cs_per_min: avg(|g| g.cs_per_min),
        avg_kp: avg(|g| g.kill_participation),
        avg_vision_score: avg(|g| g.vision_score as f64),
        avg_damage_per_min: avg(|g| g.damage_per_min),
    }
}

fn role_counts(games: &[&GameAnalysis]) -> BTreeMap<Role, u32> {
    let mut counts = BTreeMap::new();
    for game in games {
        *counts.entry(game.role).or_insert(0) += 1;
    }
    counts
}

/// Most frequent role; ties go to the role listed first.
fn primary_role(counts: &BTreeMap<Role, u32>) -> Role {
    counts
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(role, _)| *role)
        .unwrap_or_default()
}

fn patch_summary(games: &[&GameAnalysis]) -> PatchSummary {
    let mut counts: BTreeMap<String, u32> = BTreeMap::new();
    for game in games {
        *counts.entry(game.patch.clone()).or_insert(0) += 1;
    }

    let mut ranked: Vec<(&String, &u32)> = counts
        .iter()
        .filter(|(patch, _)| patch.as_str() != UNKNOWN_PATCH)
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    let most_common = ranked.first().map(|(patch, n)| ((*patch).clone(), **n));
    let relevant_patches = ranked
        .iter()
        .take(RELEVANT_PATCHES)
        .map(|(patch, _)| (*patch).clone())
        .collect();

    let (most_common_patch, most_common_patch_games) = match most_common {
        Some((patch, n)) => (Some(patch), n),
        None => (None, 0),
    };

    PatchSummary {
        most_common_patch_share: safe_ratio(most_common_patch_games as f64, games.len() as f64),
        most_common_patch,
        most_common_patch_games,
        relevant_patches,
        counts,
    }
}

fn season_counts(games: &[&GameAnalysis]) -> BTreeMap<String, u32> {
    let mut counts = BTreeMap::new();
    for game in games {
        let key = game
            .season
            .map(|s| s.to_string())
            .unwrap_or_else(|| UNKNOWN_PATCH.to_string());
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

/// Per-champion unweighted means, most played first.
fn champion_stats(games: &[&GameAnalysis]) -> Vec<ChampionStats> {
    let mut grouped: BTreeMap<&str, Vec<&GameAnalysis>> = BTreeMap::new();
    for game in games {
        grouped.entry(game.champion.as_str()).or_default().push(game);
    }

    let mut stats: Vec<ChampionStats> = grouped
        .into_iter()
        .map(|(champion, games)| {
            let n = games.len() as u32;
            let wins = games.iter().filter(|g| g.win).count() as u32;
            let avg = |metric: fn(&GameAnalysis) -> f64| {
                mean(&games.iter().map(|g| metric(*g)).collect::<Vec<_>>())
            };
            ChampionStats {
                champion: champion.to_string(),
                games: n,
                wins,
                win_rate: calculate_win_rate(wins, n),
                avg_kda: avg(|g| g.kda),
                cs_per_min: avg(|g| g.cs_per_min),
                damage_share: avg(|g| g.damage_share),
                avg_kp: avg(|g| g.kill_participation),
            }
        })
        .collect();

    stats.sort_by(|a, b| b.games.cmp(&a.games).then_with(|| a.champion.cmp(&b.champion)));
    stats
}

/// Loss reason histogram, most frequent first.
fn loss_patterns(games: &[&GameAnalysis]) -> Vec<LossPattern> {
    let losses = games.iter().filter(|g| g.is_loss()).count();
    if losses == 0 {
        return Vec::new();
    }

    let mut counts: BTreeMap<LossReason, u32> = BTreeMap::new();
    for reason in games
        .iter()
        .filter(|g| g.is_loss())
        .flat_map(|g| g.loss_reasons.iter())
    {
        *counts.entry(*reason).or_insert(0) += 1;
    }

    let mut patterns: Vec<LossPattern> = counts
        .into_iter()
        .map(|(reason, count)| LossPattern {
            reason,
            description: reason.to_string(),
            count,
            percent: count as f64 / losses as f64,
        })
        .collect();
    patterns.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.reason.cmp(&b.reason)));
    patterns
}

fn loss_details(games: &[&GameAnalysis]) -> Vec<LossDetail> {
    games
        .iter()
        .filter(|g| g.is_loss())
        .map(|g| LossDetail {
            match_id: g.match_id.clone(),
            champion: g.champion.clone(),
            role: g.role,
            game_length_min: g.duration_minutes,
            kills: g.kills,
            deaths: g.deaths,
            assists: g.assists,
            cs_per_min: g.cs_per_min,
            damage_share: g.damage_share,
            kp: g.kill_participation,
            team_kills: g.team_kills,
            enemy_kills: g.enemy_kills,
            reasons: g.loss_reasons.clone(),
        })
        .collect()
}
