//! Completed-match records in the match-v5 wire shape.
//!
//! Optional wire fields are modelled as `Option` and exposed through total
//! accessors that apply the documented fallback, so downstream code never
//! has to decide what a missing value means.

use serde::{Deserialize, Serialize};

use super::{MatchId, PlayerId};

/// Team id of the blue side.
pub const BLUE_TEAM: u32 = 100;

/// Team id of the red side.
pub const RED_TEAM: u32 = 200;

/// Number of item slots (six inventory slots plus trinket).
pub const ITEM_SLOTS: usize = 7;

/// Version strings that cannot be parsed are bucketed under this patch.
pub const UNKNOWN_PATCH: &str = "unknown";

/// The opposing team id for a two-team match.
pub fn opposing_team(team_id: u32) -> u32 {
    if team_id == BLUE_TEAM {
        RED_TEAM
    } else {
        BLUE_TEAM
    }
}

/// One completed game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub metadata: MatchMetadata,
    pub info: MatchInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchMetadata {
    #[serde(rename = "matchId")]
    pub match_id: MatchId,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchInfo {
    /// Game length in seconds
    #[serde(default)]
    pub game_duration: u64,

    /// Full client version, e.g. "14.3.556.1234"
    #[serde(default)]
    pub game_version: Option<String>,

    /// Epoch milliseconds when the game ended
    #[serde(default)]
    pub game_end_timestamp: Option<i64>,

    #[serde(default)]
    pub participants: Vec<Participant>,

    #[serde(default)]
    pub teams: Vec<TeamRecord>,
}

impl MatchRecord {
    pub fn id(&self) -> &MatchId {
        &self.metadata.match_id
    }

    /// Game length in minutes, floored at one minute so per-minute rates
    /// never divide by zero.
    pub fn duration_minutes(&self) -> f64 {
        (self.info.game_duration as f64 / 60.0).max(1.0)
    }

    /// Major.minor patch, or [`UNKNOWN_PATCH`].
    pub fn patch(&self) -> String {
        let Some(version) = self.info.game_version.as_deref() else {
            return UNKNOWN_PATCH.to_string();
        };
        let parts: Vec<&str> = version.split('.').take(2).collect();
        if parts.is_empty() || parts[0].is_empty() {
            return UNKNOWN_PATCH.to_string();
        }
        parts.join(".")
    }

    /// Leading numeric component of the version string.
    pub fn season(&self) -> Option<u32> {
        let version = self.info.game_version.as_deref()?;
        let leading = version.split('.').next()?;
        leading.trim().parse().ok()
    }

    pub fn participant(&self, player: &PlayerId) -> Option<&Participant> {
        self.info.participants.iter().find(|p| &p.puuid == player)
    }

    pub fn participant_by_id(&self, participant_id: u32) -> Option<&Participant> {
        self.info
            .participants
            .iter()
            .find(|p| p.participant_id == participant_id)
    }

    /// All participants on the given team.
    pub fn team(&self, team_id: u32) -> impl Iterator<Item = &Participant> {
        self.info
            .participants
            .iter()
            .filter(move |p| p.team_id == team_id)
    }

    /// Team id for a timeline participant id, if that participant exists.
    pub fn team_of(&self, participant_id: u32) -> Option<u32> {
        self.participant_by_id(participant_id).map(|p| p.team_id)
    }

    pub fn objectives(&self, team_id: u32) -> Objectives {
        self.info
            .teams
            .iter()
            .find(|t| t.team_id == team_id)
            .map(|t| t.objectives.clone())
            .unwrap_or_default()
    }
}

/// One player's final numbers for one match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub puuid: PlayerId,

    /// Timeline participant id (1..=10)
    #[serde(default)]
    pub participant_id: u32,

    pub team_id: u32,

    #[serde(default)]
    pub champion_name: Option<String>,

    #[serde(default)]
    pub riot_id_game_name: Option<String>,

    #[serde(default, alias = "riotIdTagLine")]
    pub riot_id_tagline: Option<String>,

    #[serde(default)]
    pub summoner_name: Option<String>,

    #[serde(default)]
    pub kills: u32,

    #[serde(default)]
    pub deaths: u32,

    #[serde(default)]
    pub assists: u32,

    #[serde(default)]
    pub total_damage_dealt_to_champions: u64,

    #[serde(default)]
    pub gold_earned: u64,

    #[serde(default)]
    pub vision_score: u32,

    #[serde(default)]
    pub total_minions_killed: u32,

    #[serde(default)]
    pub neutral_minions_killed: u32,

    #[serde(default)]
    pub item0: u32,
    #[serde(default)]
    pub item1: u32,
    #[serde(default)]
    pub item2: u32,
    #[serde(default)]
    pub item3: u32,
    #[serde(default)]
    pub item4: u32,
    #[serde(default)]
    pub item5: u32,
    #[serde(default)]
    pub item6: u32,

    /// Declared position; a hint only
    #[serde(default)]
    pub team_position: Option<String>,

    /// Secondary declared position
    #[serde(default)]
    pub individual_position: Option<String>,

    #[serde(default)]
    pub summoner1_id: Option<u32>,

    #[serde(default)]
    pub summoner2_id: Option<u32>,

    #[serde(default)]
    pub win: bool,
}

impl Participant {
    /// Character played; "Unknown" when absent.
    pub fn champion_name(&self) -> &str {
        self.champion_name.as_deref().unwrap_or("Unknown")
    }

    /// Display name: riot id game name, then summoner name, then the puuid.
    pub fn display_name(&self) -> &str {
        self.riot_id_game_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.summoner_name.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or(self.puuid.as_str())
    }

    pub fn tagline(&self) -> &str {
        self.riot_id_tagline.as_deref().unwrap_or("")
    }

    /// Lane minions plus neutral monsters.
    pub fn creep_score(&self) -> u32 {
        self.total_minions_killed + self.neutral_minions_killed
    }

    pub fn items(&self) -> [u32; ITEM_SLOTS] {
        [
            self.item0, self.item1, self.item2, self.item3, self.item4, self.item5, self.item6,
        ]
    }

    /// Both summoner-spell slots, absent slots as 0.
    pub fn summoner_spells(&self) -> [u32; 2] {
        [
            self.summoner1_id.unwrap_or(0),
            self.summoner2_id.unwrap_or(0),
        ]
    }

    pub fn takedowns(&self) -> u32 {
        self.kills + self.assists
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRecord {
    pub team_id: u32,

    #[serde(default)]
    pub win: bool,

    #[serde(default)]
    pub objectives: Objectives,
}

/// Final objective totals for one team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Objectives {
    #[serde(default)]
    pub dragon: ObjectiveCount,

    #[serde(default)]
    pub baron: ObjectiveCount,

    #[serde(default)]
    pub tower: ObjectiveCount,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveCount {
    #[serde(default)]
    pub first: bool,

    #[serde(default)]
    pub kills: u32,
}
