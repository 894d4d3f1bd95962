//! Timeline-derived outputs: gold summaries, loss diagnoses, movement and
//! fight summaries, and raw per-player extracts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Position, Role, MS_PER_MINUTE};

// ── Gold / objectives ───────────────────────────────────────────

/// One frame of the team gold difference (own team minus enemy team).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoldSample {
    pub minute: f64,
    pub gold_diff: f64,
}

/// A gold difference captured at a checkpoint minute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoldSnapshot {
    pub minute: f64,
    pub gold_diff: f64,
}

/// Dragon and baron takes per team, counted from kill events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveTally {
    pub my_dragons: u32,
    pub enemy_dragons: u32,
    pub dragon_gap: i32,
    pub my_barons: u32,
    pub enemy_barons: u32,
    pub baron_gap: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldSummary {
    pub series: Vec<GoldSample>,
    pub max_lead: f64,
    pub max_deficit: f64,
    pub early: GoldSnapshot,
    pub mid: GoldSnapshot,
    pub objectives: ObjectiveTally,
}

/// Teammate deaths shortly before enemy objective takes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickTally {
    pub picked_before_objective: u32,
    pub self_picked_before_objective: u32,
}

// ── Loss diagnosis ──────────────────────────────────────────────

/// Timeline-based loss cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossTag {
    ThrewLead,
    EarlyGap,
    ObjectiveGap,
    GotPickedBeforeObjective,
    EvenOrUnclear,
}

impl LossTag {
    /// Priority order used to pick the primary reason.
    pub const PRIORITY: [LossTag; 4] = [
        LossTag::ThrewLead,
        LossTag::EarlyGap,
        LossTag::ObjectiveGap,
        LossTag::GotPickedBeforeObjective,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LossTag::ThrewLead => "threw_lead",
            LossTag::EarlyGap => "early_gap",
            LossTag::ObjectiveGap => "objective_gap",
            LossTag::GotPickedBeforeObjective => "got_picked_before_objective",
            LossTag::EvenOrUnclear => "even_or_unclear",
        }
    }
}

impl std::fmt::Display for LossTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LossDiagnosis {
    pub primary_reason: LossTag,
    pub tags: Vec<LossTag>,
    pub max_lead: f64,
    pub max_deficit: f64,
    pub early: GoldSnapshot,
    pub mid: GoldSnapshot,
    pub objectives: ObjectiveTally,
    pub picks: PickTally,
}

impl LossDiagnosis {
    pub fn has(&self, tag: LossTag) -> bool {
        self.tags.contains(&tag)
    }
}

// ── Movement ────────────────────────────────────────────────────

/// Coarse map region used for dashboards and heatmaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapZone {
    TopQuadrant,
    BotQuadrant,
    MidJungle,
    BlueBase,
    RedBase,
    Other,
}

impl MapZone {
    pub fn from_position(pos: Position) -> Self {
        let (x, y) = (pos.x, pos.y);
        if x < 6000 && y > 10000 {
            MapZone::TopQuadrant
        } else if x > 11000 && y < 6000 {
            MapZone::BotQuadrant
        } else if 5000 < x && x < 11000 && 5000 < y && y < 11000 {
            MapZone::MidJungle
        } else if x < 5000 && y < 5000 {
            MapZone::BlueBase
        } else if x > 11000 && y > 11000 {
            MapZone::RedBase
        } else {
            MapZone::Other
        }
    }
}

/// Lane band derived from the Y coordinate alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LaneZone {
    Top,
    Middle,
    Bottom,
}

/// Where a position sample came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleSource {
    Frame,
    Kill,
    Death,
    WardPlaced,
    WardKilled,
    ItemPurchase,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionSample {
    pub time_ms: i64,
    pub x: i32,
    pub y: i32,
    pub zone: MapZone,
    pub source: SampleSource,
    /// Position was interpolated rather than reported
    pub estimated: bool,
}

impl PositionSample {
    pub fn new(time_ms: i64, pos: Position, source: SampleSource) -> Self {
        Self {
            time_ms,
            x: pos.x,
            y: pos.y,
            zone: MapZone::from_position(pos),
            source,
            estimated: false,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn time_min(&self) -> f64 {
        self.time_ms as f64 / MS_PER_MINUTE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoamWindow {
    pub start_ms: i64,
    pub end_ms: i64,
    pub lane: LaneZone,
    pub successful: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoamSummary {
    pub home_lane: Option<LaneZone>,
    pub total_roams: u32,
    pub successful_roams: u32,
    pub windows: Vec<RoamWindow>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JunglePathing {
    /// Early credited takedowns keyed by the victim's lane band
    pub early_kills_by_lane: BTreeMap<LaneZone, u32>,
}

// ── Fights ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FightKind {
    Teamfight,
    Skirmish,
    Pick,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FightCluster {
    pub start_ms: i64,
    pub end_ms: i64,
    pub kills: u32,
    pub kind: FightKind,
    pub ally_count: u32,
    pub enemy_count: u32,
    pub centroid: Option<Position>,
    pub on_scoreboard: bool,
    pub present: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FightSummary {
    pub teamfights: u32,
    pub teamfights_present: u32,
    pub teamfights_absent: u32,
    pub skirmishes: u32,
    pub skirmishes_present: u32,
    pub picks: u32,
    pub picks_present: u32,
    pub fights: Vec<FightCluster>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementSummary {
    pub role: Role,
    pub position_samples: Vec<PositionSample>,
    /// Present for laning roles only
    pub roams: Option<RoamSummary>,
    /// Present for junglers only
    pub jungle: Option<JunglePathing>,
    pub fights: FightSummary,
}

// ── Raw extracts ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillLevelUp {
    pub timestamp: i64,
    pub skill_slot: u32,
    pub level_up_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemAction {
    Purchased,
    Sold,
    Undo,
    Destroyed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemHistoryEntry {
    pub timestamp: i64,
    pub action: ItemAction,
    pub item_id: u32,
    pub before_id: u32,
    pub after_id: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WardAction {
    Placed,
    Killed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WardEvent {
    pub timestamp: i64,
    pub action: WardAction,
    pub ward_type: String,
    /// Creator for placements, killer for kills
    pub participant_id: u32,
    pub position: Option<Position>,
    pub estimated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingKillEvent {
    pub timestamp: i64,
    pub team_id: u32,
    pub building_type: Option<String>,
    pub lane_type: Option<String>,
    pub tower_type: Option<String>,
    pub position: Option<Position>,
}

/// The player's own resource curve, one sample per frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceSample {
    pub minute: f64,
    pub total_gold: i64,
    pub xp: i64,
    pub level: u32,
    pub creep_score: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineExtracts {
    pub skill_order: Vec<SkillLevelUp>,
    pub item_build: Vec<ItemHistoryEntry>,
    pub ward_events: Vec<WardEvent>,
    pub building_kills: Vec<BuildingKillEvent>,
    pub resource_series: Vec<ResourceSample>,
}

/// Everything derived from one match's timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineInsights {
    pub gold: GoldSummary,
    /// Present for losses only
    pub loss: Option<LossDiagnosis>,
    pub movement: MovementSummary,
    pub extracts: TimelineExtracts,
}
