//! Per-game metric calculation.

use tracing::debug;

use crate::config::{LossConfig, HIGH_DEATHS};
use crate::models::{
    opposing_team, GameAnalysis, LossReason, MatchRecord, Participant, PlayerId, Role, TeamRanks,
};

use super::{calculate_kda, classify_role, mean, rank_desc, safe_ratio, AnalysisError};

/// Kill participation margin around the team average that moves the
/// responsibility score.
const KP_MARGIN: f64 = 0.10;

/// Deaths at or below this count as a clean game.
const LOW_DEATHS: u32 = 4;

/// Compute the derived metrics for `player` in one match.
///
/// Timeline insights are attached later by the pipeline; the returned
/// analysis always has `timeline: None`.
pub fn analyze_game(
    record: &MatchRecord,
    player: &PlayerId,
    config: &LossConfig,
) -> Result<GameAnalysis, AnalysisError> {
    let me = record
        .participant(player)
        .ok_or_else(|| AnalysisError::MissingPlayerInMatch {
            match_id: record.id().clone(),
            player_id: player.clone(),
        })?;

    let team_id = me.team_id;
    let duration = record.duration_minutes();
    let role = classify_role(me);

    let team: Vec<&Participant> = record.team(team_id).collect();
    let team_kills: u32 = team.iter().map(|p| p.kills).sum();
    let enemy_kills: u32 = record
        .info
        .participants
        .iter()
        .filter(|p| p.team_id != team_id)
        .map(|p| p.kills)
        .sum();
    let team_damage: u64 = team.iter().map(|p| p.total_damage_dealt_to_champions).sum();
    let team_gold: u64 = team.iter().map(|p| p.gold_earned).sum();

    let kda = calculate_kda(me.kills, me.deaths, me.assists);
    let cs_per_min = me.creep_score() as f64 / duration;
    let damage_share = safe_ratio(me.total_damage_dealt_to_champions as f64, team_damage as f64);
    let gold_share = safe_ratio(me.gold_earned as f64, team_gold as f64);
    let kill_participation = safe_ratio(me.takedowns() as f64, team_kills as f64);

    let team_avg_kill_participation = if team_kills > 0 {
        let kps: Vec<f64> = team
            .iter()
            .map(|p| p.takedowns() as f64 / team_kills as f64)
            .collect();
        mean(&kps)
    } else {
        0.0
    };

    let ranks = team_ranks(&team, me, duration);
    let responsibility = responsibility_score(
        &ranks,
        kill_participation,
        team_avg_kill_participation,
        me.deaths,
    );

    let loss_reasons = if me.win {
        Vec::new()
    } else {
        stats_loss_reasons(
            record,
            team_id,
            &StatLine {
                role,
                duration,
                cs_per_min,
                damage_share,
                kill_participation,
                deaths: me.deaths,
                kda,
            },
            config,
        )
    };

    debug!(
        match_id = %record.id(),
        %role,
        win = me.win,
        responsibility,
        "Analyzed game"
    );

    Ok(GameAnalysis {
        match_id: record.id().clone(),
        champion: me.champion_name().to_string(),
        role,
        win: me.win,
        patch: record.patch(),
        season: record.season(),
        duration_minutes: duration,
        game_end_timestamp: record.info.game_end_timestamp,
        kills: me.kills,
        deaths: me.deaths,
        assists: me.assists,
        kda,
        cs_per_min,
        damage_share,
        gold_share,
        kill_participation,
        team_avg_kill_participation,
        vision_score: me.vision_score,
        damage_per_min: me.total_damage_dealt_to_champions as f64 / duration,
        team_kills,
        enemy_kills,
        ranks,
        responsibility,
        loss_reasons,
        timeline: None,
    })
}

fn team_ranks(team: &[&Participant], me: &Participant, duration: f64) -> TeamRanks {
    let damage: Vec<f64> = team
        .iter()
        .map(|p| p.total_damage_dealt_to_champions as f64)
        .collect();
    let gold: Vec<f64> = team.iter().map(|p| p.gold_earned as f64).collect();
    let cs: Vec<f64> = team
        .iter()
        .map(|p| p.creep_score() as f64 / duration)
        .collect();

    TeamRanks {
        damage: rank_desc(&damage, me.total_damage_dealt_to_champions as f64),
        gold: rank_desc(&gold, me.gold_earned as f64),
        cs_per_min: rank_desc(&cs, me.creep_score() as f64 / duration),
    }
}

/// Heuristic over/under-performance score relative to teammates.
///
/// Damage rank moves the score by a full point, gold and CS ranks by half;
/// rank 1 adds and rank 4 or worse subtracts. Kill participation clearly
/// above or below the team average and the death count add or remove half a
/// point each.
pub fn responsibility_score(ranks: &TeamRanks, kp: f64, team_avg_kp: f64, deaths: u32) -> f64 {
    fn rank_points(rank: usize, weight: f64) -> f64 {
        match rank {
            1 => weight,
            r if r >= 4 => -weight,
            _ => 0.0,
        }
    }

    let mut score = rank_points(ranks.damage, 1.0)
        + rank_points(ranks.gold, 0.5)
        + rank_points(ranks.cs_per_min, 0.5);

    if kp >= team_avg_kp + KP_MARGIN {
        score += 0.5;
    } else if kp <= team_avg_kp - KP_MARGIN {
        score -= 0.5;
    }

    if deaths <= LOW_DEATHS {
        score += 0.5;
    } else if deaths >= HIGH_DEATHS {
        score -= 0.5;
    }

    score
}

/// The player's numbers the stats-only loss rules look at.
struct StatLine {
    role: Role,
    duration: f64,
    cs_per_min: f64,
    damage_share: f64,
    kill_participation: f64,
    deaths: u32,
    kda: f64,
}

/// Stats-only loss causes in trigger order, `Outscaled` when none fire.
fn stats_loss_reasons(
    record: &MatchRecord,
    team_id: u32,
    line: &StatLine,
    config: &LossConfig,
) -> Vec<LossReason> {
    let mine = record.objectives(team_id);
    let theirs = record.objectives(opposing_team(team_id));
    let mut reasons = Vec::new();

    if theirs.dragon.kills >= mine.dragon.kills + config.dragon_lead {
        reasons.push(LossReason::DragonControl);
    }
    if theirs.baron.kills >= mine.baron.kills + config.baron_lead {
        reasons.push(LossReason::BaronControl);
    }
    if theirs.tower.kills >= mine.tower.kills + config.tower_lead {
        reasons.push(LossReason::TowerPressure);
    }
    if line.duration > config.min_minutes_for_cs
        && line.cs_per_min < config.cs_thresholds.for_role(line.role)
    {
        reasons.push(LossReason::LowCs { role: line.role });
    }
    if line.damage_share < config.low_damage_share {
        reasons.push(LossReason::LowDamageShare);
    }
    if line.kill_participation < config.low_kill_participation {
        reasons.push(LossReason::LowKillParticipation);
    }
    if line.deaths >= config.high_deaths && line.kda < config.high_deaths_max_kda {
        reasons.push(LossReason::HighDeaths);
    }

    if reasons.is_empty() {
        reasons.push(LossReason::Outscaled);
    }
    reasons
}
