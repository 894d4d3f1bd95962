//! Configuration loading and validation.
//!
//! Every heuristic threshold the analyzers use lives here, grouped by the
//! analysis that consumes it. Defaults are exposed as constants so each one
//! can be referenced and tested on its own.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::models::Role;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// ── Stats-only loss heuristics ──────────────────────────────────

pub const DRAGON_LEAD: u32 = 2;
pub const BARON_LEAD: u32 = 1;
pub const TOWER_LEAD: u32 = 3;
pub const MIN_MINUTES_FOR_CS_CHECK: f64 = 20.0;
pub const LOW_DAMAGE_SHARE: f64 = 0.20;
pub const LOW_KILL_PARTICIPATION: f64 = 0.50;
pub const HIGH_DEATHS: u32 = 8;
pub const HIGH_DEATHS_MAX_KDA: f64 = 2.0;

// ── Timeline loss heuristics ────────────────────────────────────

pub const THROW_LEAD_GOLD: f64 = 2500.0;
pub const EARLY_GAP_GOLD: f64 = 1500.0;
pub const EARLY_SNAPSHOT_MINUTE: f64 = 10.0;
pub const PICK_WINDOW_MS: i64 = 25_000;

// ── Movement & fights ───────────────────────────────────────────

pub const ROAM_MIN_MS: i64 = 20_000;
pub const FIGHT_GAP_MS: i64 = 10_000;
pub const FIGHT_PRESENCE_RADIUS: f64 = 3000.0;
pub const WARD_RANGE: f64 = 600.0;
pub const WARD_SNAP_TOLERANCE: f64 = 200.0;
pub const JUNGLE_EARLY_CUTOFF_MS: i64 = 10 * 60 * 1000;
pub const TOP_LANE_MIN_Y: i32 = 9000;
pub const BOTTOM_LANE_MAX_Y: i32 = 6000;

// ── Aggregation ─────────────────────────────────────────────────

pub const WEIGHTING_THRESHOLD: usize = 50;
pub const CURRENT_SEASON_WEIGHT: f64 = 2.0;
pub const RECENT_WINDOW_DAYS: i64 = 7;
pub const TEAMMATE_MIN_GAMES: u32 = 2;
pub const TEAMMATE_LIMIT: usize = 5;

/// Low CS/min thresholds per role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleCsThresholds {
    pub top: f64,
    pub jungle: f64,
    pub middle: f64,
    pub bottom: f64,
    pub utility: f64,
}

impl RoleCsThresholds {
    pub fn for_role(&self, role: Role) -> f64 {
        match role {
            Role::Top => self.top,
            Role::Jungle => self.jungle,
            Role::Middle => self.middle,
            Role::Bottom => self.bottom,
            Role::Utility => self.utility,
        }
    }
}

impl Default for RoleCsThresholds {
    fn default() -> Self {
        Self {
            top: 6.0,
            jungle: 5.0,
            middle: 6.0,
            bottom: 6.5,
            utility: 1.0,
        }
    }
}

/// Stats-only loss heuristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LossConfig {
    /// Enemy dragon lead that flags dragon control
    pub dragon_lead: u32,
    pub baron_lead: u32,
    pub tower_lead: u32,
    /// Low CS is only judged in games longer than this
    pub min_minutes_for_cs: f64,
    pub low_damage_share: f64,
    pub low_kill_participation: f64,
    pub high_deaths: u32,
    pub high_deaths_max_kda: f64,
    pub cs_thresholds: RoleCsThresholds,
}

impl Default for LossConfig {
    fn default() -> Self {
        Self {
            dragon_lead: DRAGON_LEAD,
            baron_lead: BARON_LEAD,
            tower_lead: TOWER_LEAD,
            min_minutes_for_cs: MIN_MINUTES_FOR_CS_CHECK,
            low_damage_share: LOW_DAMAGE_SHARE,
            low_kill_participation: LOW_KILL_PARTICIPATION,
            high_deaths: HIGH_DEATHS,
            high_deaths_max_kda: HIGH_DEATHS_MAX_KDA,
            cs_thresholds: RoleCsThresholds::default(),
        }
    }
}

/// Timeline loss heuristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub throw_lead_gold: f64,
    /// Deficit (positive number) at the early snapshot that flags an early gap
    pub early_gap_gold: f64,
    pub early_minute: f64,
    pub pick_window_ms: i64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            throw_lead_gold: THROW_LEAD_GOLD,
            early_gap_gold: EARLY_GAP_GOLD,
            early_minute: EARLY_SNAPSHOT_MINUTE,
            pick_window_ms: PICK_WINDOW_MS,
        }
    }
}

/// Movement, roam and fight heuristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    pub roam_min_ms: i64,
    pub fight_gap_ms: i64,
    pub fight_presence_radius: f64,
    pub ward_range: f64,
    pub ward_snap_tolerance: f64,
    pub jungle_early_cutoff_ms: i64,
    /// Y above this is the top lane band
    pub top_lane_min_y: i32,
    /// Y below this is the bottom lane band
    pub bottom_lane_max_y: i32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            roam_min_ms: ROAM_MIN_MS,
            fight_gap_ms: FIGHT_GAP_MS,
            fight_presence_radius: FIGHT_PRESENCE_RADIUS,
            ward_range: WARD_RANGE,
            ward_snap_tolerance: WARD_SNAP_TOLERANCE,
            jungle_early_cutoff_ms: JUNGLE_EARLY_CUTOFF_MS,
            top_lane_min_y: TOP_LANE_MIN_Y,
            bottom_lane_max_y: BOTTOM_LANE_MAX_Y,
        }
    }
}

/// Aggregation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregateConfig {
    /// Batches larger than this get season weighting
    pub weighting_threshold: usize,
    pub current_season_weight: f64,
    pub recent_window_days: i64,
    pub teammate_min_games: u32,
    pub teammate_limit: usize,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            weighting_threshold: WEIGHTING_THRESHOLD,
            current_season_weight: CURRENT_SEASON_WEIGHT,
            recent_window_days: RECENT_WINDOW_DAYS,
            teammate_min_games: TEAMMATE_MIN_GAMES,
            teammate_limit: TEAMMATE_LIMIT,
        }
    }
}

/// Main analyzer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub loss: LossConfig,

    #[serde(default)]
    pub timeline: TimelineConfig,

    #[serde(default)]
    pub movement: MovementConfig,

    #[serde(default)]
    pub aggregate: AggregateConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            loss: LossConfig::default(),
            timeline: TimelineConfig::default(),
            movement: MovementConfig::default(),
            aggregate: AggregateConfig::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: AnalyzerConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.movement;
        if m.roam_min_ms <= 0 || m.fight_gap_ms <= 0 || m.jungle_early_cutoff_ms <= 0 {
            return Err(ConfigError::ValidationError(
                "movement windows must be greater than 0".to_string(),
            ));
        }

        if m.fight_presence_radius <= 0.0 || m.ward_range <= 0.0 || m.ward_snap_tolerance < 0.0 {
            return Err(ConfigError::ValidationError(
                "movement radii must be positive".to_string(),
            ));
        }

        if m.top_lane_min_y <= m.bottom_lane_max_y {
            return Err(ConfigError::ValidationError(format!(
                "top_lane_min_y ({}) must be above bottom_lane_max_y ({})",
                m.top_lane_min_y, m.bottom_lane_max_y
            )));
        }

        if self.timeline.pick_window_ms <= 0 {
            return Err(ConfigError::ValidationError(
                "pick window must be greater than 0".to_string(),
            ));
        }

        if self.aggregate.current_season_weight <= 0.0 {
            return Err(ConfigError::ValidationError(
                "current season weight must be greater than 0".to_string(),
            ));
        }

        if self.aggregate.recent_window_days <= 0 {
            return Err(ConfigError::ValidationError(
                "recent window must be at least one day".to_string(),
            ));
        }

        Ok(())
    }
}
