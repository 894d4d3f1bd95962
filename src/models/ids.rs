//! Identifier newtypes and deterministic input fingerprints.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Unique match identifier (e.g. `NA1_4812345678`).
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(String);

impl MatchId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MatchId({})", self.0)
    }
}

impl From<String> for MatchId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MatchId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Stable, account-wide player identifier (the `puuid`).
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlayerId({})", self.0)
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A deterministic digest of the inputs a report was computed from.
///
/// Callers caching reports externally can key on this: the same player over
/// the same set of match ids always yields the same fingerprint, regardless
/// of the order the matches were supplied in.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputFingerprint(String);

impl InputFingerprint {
    /// Generate a fingerprint from a player and the match ids analyzed.
    /// Uses SHA256 and keeps the first 16 hex characters.
    pub fn generate(player: &PlayerId, match_ids: &[&MatchId]) -> Self {
        let mut sorted: Vec<&str> = match_ids.iter().map(|id| id.as_str()).collect();
        sorted.sort_unstable();

        let mut hasher = Sha256::new();
        hasher.update(player.as_str().as_bytes());
        for id in sorted {
            hasher.update(b"|");
            hasher.update(id.as_bytes());
        }
        let hash = hex::encode(hasher.finalize());
        Self(hash[..16].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InputFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for InputFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InputFingerprint({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_deterministic() {
        let player = PlayerId::from("puuid-1");
        let a = MatchId::from("NA1_1");
        let b = MatchId::from("NA1_2");

        let first = InputFingerprint::generate(&player, &[&a, &b]);
        let second = InputFingerprint::generate(&player, &[&a, &b]);
        assert_eq!(first, second);
        assert_eq!(first.as_str().len(), 16);
    }

    #[test]
    fn test_fingerprint_order_independent() {
        let player = PlayerId::from("puuid-1");
        let a = MatchId::from("NA1_1");
        let b = MatchId::from("NA1_2");

        assert_eq!(
            InputFingerprint::generate(&player, &[&a, &b]),
            InputFingerprint::generate(&player, &[&b, &a])
        );
    }

    #[test]
    fn test_fingerprint_differs_by_player() {
        let a = MatchId::from("NA1_1");
        let one = InputFingerprint::generate(&PlayerId::from("p1"), &[&a]);
        let two = InputFingerprint::generate(&PlayerId::from("p2"), &[&a]);
        assert_ne!(one, two);
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let id = MatchId::from("EUW1_42");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"EUW1_42\"");
        let parsed: PlayerId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(parsed.as_str(), "abc");
        assert_eq!(format!("{}", id), "EUW1_42");
    }
}
