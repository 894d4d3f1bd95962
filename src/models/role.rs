//! Functional roles.

use serde::{Deserialize, Serialize};

/// A player's functional role in one game.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Top,
    Jungle,
    /// Fallback when nothing else identifies the role
    #[default]
    Middle,
    Bottom,
    Utility,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Top,
        Role::Jungle,
        Role::Middle,
        Role::Bottom,
        Role::Utility,
    ];

    /// Parse a declared position label. Returns `None` for empty strings,
    /// the `Invalid` sentinel and anything outside the five roles.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_uppercase().as_str() {
            "TOP" => Some(Role::Top),
            "JUNGLE" => Some(Role::Jungle),
            "MIDDLE" | "MID" => Some(Role::Middle),
            "BOTTOM" | "BOT" => Some(Role::Bottom),
            "UTILITY" | "SUPPORT" => Some(Role::Utility),
            _ => None,
        }
    }

    /// Laning roles are the ones roam detection applies to.
    pub fn is_laner(&self) -> bool {
        matches!(self, Role::Top | Role::Middle | Role::Bottom)
    }

    pub fn label_singular(&self) -> &'static str {
        match self {
            Role::Top => "top laner",
            Role::Jungle => "jungler",
            Role::Middle => "mid laner",
            Role::Bottom => "AD carry",
            Role::Utility => "support",
        }
    }

    pub fn label_plural(&self) -> &'static str {
        match self {
            Role::Top => "top laners",
            Role::Jungle => "junglers",
            Role::Middle => "mid laners",
            Role::Bottom => "bot laners",
            Role::Utility => "supports",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Top => write!(f, "TOP"),
            Role::Jungle => write!(f, "JUNGLE"),
            Role::Middle => write!(f, "MIDDLE"),
            Role::Bottom => write!(f, "BOTTOM"),
            Role::Utility => write!(f, "UTILITY"),
        }
    }
}
