//! Teammate, recent-performance and macro sub-reports.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

use crate::config::AggregateConfig;
use crate::models::{
    GameAnalysis, LossDiagnosis, LossTag, MacroProfile, PlayerId, RecentChampionStats,
    TeammateStats,
};

use super::{calculate_win_rate, AnalyzedMatch};

/// Tag rate above which a macro theme is called out.
pub const THEME_RATE: f64 = 0.3;

#[derive(Default)]
struct TeammateTally {
    name: String,
    tag: String,
    games: u32,
    wins: u32,
}

/// Repeat teammates, most games first.
pub fn teammates(
    matches: &[&AnalyzedMatch<'_>],
    player: &PlayerId,
    config: &AggregateConfig,
) -> Vec<TeammateStats> {
    let mut tallies: BTreeMap<&PlayerId, TeammateTally> = BTreeMap::new();

    for analyzed in matches {
        let Some(me) = analyzed.record.participant(player) else {
            continue;
        };
        for mate in analyzed
            .record
            .team(me.team_id)
            .filter(|p| &p.puuid != player)
        {
            let tally = tallies.entry(&mate.puuid).or_default();
            tally.games += 1;
            if analyzed.game.win {
                tally.wins += 1;
            }
            tally.name = mate.display_name().to_string();
            tally.tag = mate.tagline().to_string();
        }
    }

    let mut result: Vec<TeammateStats> = tallies
        .into_iter()
        .filter(|(_, t)| t.games >= config.teammate_min_games)
        .map(|(id, t)| TeammateStats {
            player_id: id.clone(),
            name: t.name,
            tag: t.tag,
            games: t.games,
            wins: t.wins,
            win_rate: calculate_win_rate(t.wins, t.games),
        })
        .collect();

    result.sort_by(|a, b| {
        b.games
            .cmp(&a.games)
            .then_with(|| a.player_id.cmp(&b.player_id))
    });
    result.truncate(config.teammate_limit);
    result
}

/// Per-champion record over the trailing window ending at `as_of`.
///
/// Games without an end timestamp are never considered recent.
pub fn recent_performance(
    games: &[&GameAnalysis],
    as_of: DateTime<Utc>,
    config: &AggregateConfig,
) -> Vec<RecentChampionStats> {
    let until = as_of.timestamp_millis();
    let since = (as_of - Duration::days(config.recent_window_days)).timestamp_millis();

    let mut per_champion: BTreeMap<&str, (u32, u32)> = BTreeMap::new();
    for game in games {
        let Some(end) = game.game_end_timestamp else {
            continue;
        };
        if end < since || end > until {
            continue;
        }
        let entry = per_champion.entry(game.champion.as_str()).or_default();
        entry.0 += 1;
        if game.win {
            entry.1 += 1;
        }
    }

    let mut result: Vec<RecentChampionStats> = per_champion
        .into_iter()
        .map(|(champion, (games, wins))| RecentChampionStats {
            champion: champion.to_string(),
            games,
            wins,
            losses: games - wins,
            win_rate: calculate_win_rate(wins, games),
        })
        .collect();

    result.sort_by(|a, b| {
        b.games
            .cmp(&a.games)
            .then_with(|| a.champion.cmp(&b.champion))
    });
    result
}

fn theme_for(tag: LossTag) -> Option<&'static str> {
    match tag {
        LossTag::ThrewLead => Some("frequent_throws_from_ahead"),
        LossTag::EarlyGap => Some("frequent_early_game_deficits"),
        LossTag::ObjectiveGap => Some("objective_control_issues"),
        LossTag::GotPickedBeforeObjective => Some("picks_before_objectives"),
        LossTag::EvenOrUnclear => None,
    }
}

/// Summarize timeline loss diagnoses into recurring macro patterns.
pub fn macro_profile(diagnoses: &[&LossDiagnosis]) -> MacroProfile {
    if diagnoses.is_empty() {
        return MacroProfile::default();
    }
    let total = diagnoses.len() as f64;

    let mut tag_counts: BTreeMap<LossTag, u32> = BTreeMap::new();
    for diagnosis in diagnoses {
        for tag in &diagnosis.tags {
            *tag_counts.entry(*tag).or_default() += 1;
        }
    }

    let tag_rates: BTreeMap<LossTag, f64> = tag_counts
        .iter()
        .map(|(tag, count)| (*tag, *count as f64 / total))
        .collect();

    let likely_themes = LossTag::PRIORITY
        .iter()
        .filter(|tag| tag_rates.get(tag).copied().unwrap_or(0.0) > THEME_RATE)
        .filter_map(|tag| theme_for(*tag))
        .map(str::to_string)
        .collect();

    let avg = |f: fn(&LossDiagnosis) -> f64| diagnoses.iter().map(|d| f(*d)).sum::<f64>() / total;

    MacroProfile {
        games_with_timeline_data: diagnoses.len() as u32,
        avg_max_lead: avg(|d| d.max_lead),
        avg_max_deficit: avg(|d| d.max_deficit),
        avg_dragon_gap: avg(|d| d.objectives.dragon_gap as f64),
        avg_baron_gap: avg(|d| d.objectives.baron_gap as f64),
        tag_counts,
        tag_rates,
        likely_themes,
    }
}
