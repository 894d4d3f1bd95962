//! Engine entry point.
//!
//! Each match is analyzed independently on rayon's pool, then the results
//! are folded in input order into one report. A match the player is
//! missing from is skipped without affecting the rest of the batch.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::calculate::{analyze_game, build_report, AnalysisError, AnalyzedMatch};
use crate::config::AnalyzerConfig;
use crate::models::{Analysis, GameAnalysis, MatchId, MatchRecord, PlayerId, SkippedMatch, TimelineRecord};
use crate::timeline::analyze_timeline;

/// Per-game analysis, with timeline insights when a timeline is supplied.
pub fn analyze_match(
    record: &MatchRecord,
    timeline: Option<&TimelineRecord>,
    player: &PlayerId,
    config: &AnalyzerConfig,
) -> Result<GameAnalysis, AnalysisError> {
    let mut game = analyze_game(record, player, &config.loss)?;
    if let Some(timeline) = timeline {
        game.timeline = Some(analyze_timeline(record, timeline, player, config)?);
    }
    Ok(game)
}

/// Analyze a batch of matches for one player.
///
/// `as_of` anchors the recent-performance window; pass the same instant to
/// get the same report.
pub fn analyze_player(
    matches: &[MatchRecord],
    timelines: &HashMap<MatchId, TimelineRecord>,
    player: &PlayerId,
    as_of: DateTime<Utc>,
    config: &AnalyzerConfig,
) -> Analysis {
    info!(
        player = %player,
        matches = matches.len(),
        timelines = timelines.len(),
        "Starting analysis"
    );

    let results: Vec<Result<GameAnalysis, AnalysisError>> = matches
        .par_iter()
        .map(|record| analyze_match(record, timelines.get(record.id()), player, config))
        .collect();

    let mut analyzed = Vec::with_capacity(matches.len());
    let mut skipped = Vec::new();

    for (record, result) in matches.iter().zip(results) {
        match result {
            Ok(game) => analyzed.push(AnalyzedMatch { record, game }),
            Err(e) => {
                warn!(match_id = %record.id(), "Skipping match: {}", e);
                skipped.push(SkippedMatch {
                    match_id: record.id().clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    build_report(analyzed, player, as_of, skipped, config)
}
