//! Role classification from equipment and spell signals.

use crate::models::{Participant, Role};

/// Summoner spell id of the jungle-clear spell (Smite).
pub const JUNGLE_SPELL_ID: u32 = 11;

/// Support starter item line across item-id generations.
pub const SUPPORT_ITEM_IDS: [u32; 9] = [3850, 3851, 3853, 3862, 3863, 3864, 3865, 3866, 3867];

/// Declared position that means "no position".
const INVALID_POSITION: &str = "Invalid";

/// Infer a player's role for one game.
///
/// Rules, first match wins:
/// 1. Smite in either spell slot → JUNGLE
/// 2. A support starter item in any slot → UTILITY
/// 3. The declared team position, when present and valid
/// 4. The secondary declared position, else MIDDLE
pub fn classify_role(participant: &Participant) -> Role {
    if participant
        .summoner_spells()
        .iter()
        .any(|id| *id == JUNGLE_SPELL_ID)
    {
        return Role::Jungle;
    }

    if participant
        .items()
        .iter()
        .any(|item| SUPPORT_ITEM_IDS.contains(item))
    {
        return Role::Utility;
    }

    if let Some(role) = participant
        .team_position
        .as_deref()
        .filter(|p| *p != INVALID_POSITION)
        .and_then(Role::from_label)
    {
        return role;
    }

    participant
        .individual_position
        .as_deref()
        .and_then(Role::from_label)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant() -> Participant {
        Participant {
            team_position: Some("TOP".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_smite_overrides_declared_position() {
        let mut p = participant();
        p.team_position = Some("UTILITY".to_string());
        p.summoner2_id = Some(JUNGLE_SPELL_ID);
        assert_eq!(classify_role(&p), Role::Jungle);
    }

    #[test]
    fn test_support_item_means_utility() {
        let mut p = participant();
        p.team_position = Some("MIDDLE".to_string());
        p.item6 = 3865;
        assert_eq!(classify_role(&p), Role::Utility);
    }

    #[test]
    fn test_smite_beats_support_item() {
        let mut p = participant();
        p.summoner1_id = Some(JUNGLE_SPELL_ID);
        p.item0 = 3850;
        assert_eq!(classify_role(&p), Role::Jungle);
    }

    #[test]
    fn test_declared_position_used() {
        assert_eq!(classify_role(&participant()), Role::Top);
    }

    #[test]
    fn test_invalid_falls_back_to_individual_position() {
        let mut p = participant();
        p.team_position = Some("Invalid".to_string());
        p.individual_position = Some("BOTTOM".to_string());
        assert_eq!(classify_role(&p), Role::Bottom);
    }

    #[test]
    fn test_no_signals_defaults_to_middle() {
        let p = Participant::default();
        assert_eq!(classify_role(&p), Role::Middle);

        let mut empty = Participant::default();
        empty.team_position = Some(String::new());
        empty.individual_position = Some("Invalid".to_string());
        assert_eq!(classify_role(&empty), Role::Middle);
    }

    #[test]
    fn test_always_one_of_five_labels() {
        let labels = [None, Some(""), Some("Invalid"), Some("TOP"), Some("garbage")];
        for team in labels {
            for individual in labels {
                let p = Participant {
                    team_position: team.map(str::to_string),
                    individual_position: individual.map(str::to_string),
                    ..Default::default()
                };
                assert!(Role::ALL.contains(&classify_role(&p)));
            }
        }
    }
}
