//! Serde models for the live-client snapshot document.
//!
//! The document is consumed leniently: every field defaults, and records
//! missing identity fields are filtered downstream during reconciliation
//! instead of failing the whole snapshot.

use serde::Deserialize;

/// One authoritative read of current match state.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameSnapshot {
    pub active_player: ActivePlayer,
    pub all_players: Vec<ParticipantRecord>,
}

impl GameSnapshot {
    /// The viewer's team, resolved through the active participant's record.
    pub fn active_team(&self) -> Option<&str> {
        let active_name = self.active_player.summoner_name.as_deref()?;
        self.all_players
            .iter()
            .find(|p| p.summoner_name.as_deref() == Some(active_name))
            .and_then(|p| p.team.as_deref())
    }
}

/// The viewer's own identity.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivePlayer {
    pub summoner_name: Option<String>,
}

/// One participant in the match.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParticipantRecord {
    pub summoner_name: Option<String>,
    pub team: Option<String>,
    #[serde(default = "default_level")]
    pub level: u32,
    pub champion_name: Option<String>,
    pub summoner_spells: SummonerSpells,
    /// Pre-computed remaining cooldowns, present only on feeds that expose
    /// them. Absence means "use the catalog value".
    pub summoner_spell_cooldowns: Option<SlotCooldowns>,
}

fn default_level() -> u32 {
    1
}

impl ParticipantRecord {
    /// Display name of ability slot `index` (0 or 1), if present.
    pub fn spell_name(&self, index: usize) -> Option<&str> {
        let slot = match index {
            0 => self.summoner_spells.summoner_spell_one.as_ref(),
            1 => self.summoner_spells.summoner_spell_two.as_ref(),
            _ => None,
        };
        slot.and_then(|s| s.display_name.as_deref())
    }

    /// Explicit remaining-cooldown override for slot `index`, if supplied.
    pub fn explicit_cooldown(&self, index: usize) -> Option<u32> {
        let cooldowns = self.summoner_spell_cooldowns.as_ref()?;
        match index {
            0 => cooldowns.summoner_spell_one,
            1 => cooldowns.summoner_spell_two,
            _ => None,
        }
    }
}

/// The two named ability slots.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SummonerSpells {
    pub summoner_spell_one: Option<SpellSlotRecord>,
    pub summoner_spell_two: Option<SpellSlotRecord>,
}

/// One ability slot's feed data.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpellSlotRecord {
    pub display_name: Option<String>,
}

/// Optional per-slot cooldown overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SlotCooldowns {
    pub summoner_spell_one: Option<u32>,
    pub summoner_spell_two: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "activePlayer": { "summonerName": "Viewer" },
        "allPlayers": [
            {
                "summonerName": "Viewer",
                "team": "ORDER",
                "level": 6,
                "championName": "Lux",
                "summonerSpells": {
                    "summonerSpellOne": { "displayName": "Flash" },
                    "summonerSpellTwo": { "displayName": "Ignite" }
                }
            },
            {
                "summonerName": "Enemy",
                "team": "CHAOS",
                "level": 5,
                "championName": "Ahri",
                "summonerSpells": {
                    "summonerSpellOne": { "displayName": "Flash" },
                    "summonerSpellTwo": { "displayName": "Teleport" }
                },
                "summonerSpellCooldowns": { "summonerSpellTwo": 120 }
            }
        ]
    }"#;

    #[test]
    fn test_parse_snapshot() {
        let snapshot: GameSnapshot = serde_json::from_str(SNAPSHOT).unwrap();
        assert_eq!(snapshot.all_players.len(), 2);
        assert_eq!(snapshot.active_team(), Some("ORDER"));

        let enemy = &snapshot.all_players[1];
        assert_eq!(enemy.spell_name(0), Some("Flash"));
        assert_eq!(enemy.spell_name(1), Some("Teleport"));
        assert_eq!(enemy.explicit_cooldown(0), None);
        assert_eq!(enemy.explicit_cooldown(1), Some(120));
        assert_eq!(enemy.level, 5);
    }

    #[test]
    fn test_lenient_on_missing_fields() {
        let snapshot: GameSnapshot =
            serde_json::from_str(r#"{ "allPlayers": [ { "team": "CHAOS" } ] }"#).unwrap();
        assert_eq!(snapshot.active_team(), None);

        let record = &snapshot.all_players[0];
        assert_eq!(record.summoner_name, None);
        assert_eq!(record.level, 1, "missing level defaults to 1");
        assert_eq!(record.spell_name(0), None);
    }

    #[test]
    fn test_empty_document() {
        let snapshot: GameSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.all_players.is_empty());
        assert_eq!(snapshot.active_team(), None);
    }
}
