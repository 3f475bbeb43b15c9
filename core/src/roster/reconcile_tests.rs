//! Tests for snapshot reconciliation
//!
//! Verifies team filtering, first-seen ordering, idempotency, and the
//! precedence of running countdowns over polled values.

use super::{Roster, SpellSlot};
use crate::catalog::SpellCatalog;
use crate::telemetry::GameSnapshot;

fn catalog() -> SpellCatalog {
    SpellCatalog::load(None).unwrap()
}

fn snapshot(json: &str) -> GameSnapshot {
    serde_json::from_str(json).unwrap()
}

fn basic_snapshot() -> GameSnapshot {
    snapshot(
        r#"{
        "activePlayer": { "summonerName": "A" },
        "allPlayers": [
            {
                "summonerName": "A", "team": "100", "level": 5,
                "summonerSpells": {
                    "summonerSpellOne": { "displayName": "Flash" },
                    "summonerSpellTwo": { "displayName": "Heal" }
                }
            },
            {
                "summonerName": "B", "team": "200", "level": 5,
                "championName": "Ahri",
                "summonerSpells": {
                    "summonerSpellOne": { "displayName": "Flash" },
                    "summonerSpellTwo": { "displayName": "Ignite" }
                }
            }
        ]
    }"#,
    )
}

#[test]
fn test_tracks_only_opposing_participants() {
    let mut roster = Roster::new();
    let added = roster.reconcile(&basic_snapshot(), &catalog());

    assert!(added);
    assert_eq!(roster.len(), 1, "viewer's own team is never tracked");

    let entry = &roster.entries()[0];
    assert_eq!(entry.participant_id, "B");
    assert_eq!(entry.team_id, "200");
    assert_eq!(entry.champion.as_deref(), Some("Ahri"));
    assert_eq!(entry.spell(SpellSlot::One).base_cooldown(), 300);
    assert_eq!(entry.spell(SpellSlot::One).remaining(), 0);
    assert_eq!(entry.spell(SpellSlot::Two).base_cooldown(), 180);
}

#[test]
fn test_reconcile_is_idempotent() {
    let mut roster = Roster::new();
    let snap = basic_snapshot();

    roster.reconcile(&snap, &catalog());
    let before: Vec<_> = roster.entries().to_vec();

    let added = roster.reconcile(&snap, &catalog());
    assert!(!added, "unchanged snapshot adds nothing");
    assert_eq!(roster.len(), before.len());
    for (a, b) in roster.entries().iter().zip(&before) {
        assert_eq!(a.participant_id, b.participant_id);
        for slot in SpellSlot::ALL {
            assert_eq!(a.spell(slot).remaining(), b.spell(slot).remaining());
            assert_eq!(a.spell(slot).base_cooldown(), b.spell(slot).base_cooldown());
        }
    }
}

#[test]
fn test_entries_never_removed() {
    let mut roster = Roster::new();
    roster.reconcile(&basic_snapshot(), &catalog());
    assert_eq!(roster.len(), 1);

    // A later snapshot without "B" leaves the entry in place
    let shrunk = snapshot(
        r#"{
        "activePlayer": { "summonerName": "A" },
        "allPlayers": [ { "summonerName": "A", "team": "100" } ]
    }"#,
    );
    roster.reconcile(&shrunk, &catalog());
    assert_eq!(roster.len(), 1);
}

#[test]
fn test_malformed_record_skipped_without_aborting_siblings() {
    let mut roster = Roster::new();
    let snap = snapshot(
        r#"{
        "activePlayer": { "summonerName": "A" },
        "allPlayers": [
            { "summonerName": "A", "team": "100" },
            { "level": 9, "team": "200" },
            { "summonerName": "NoTeam" },
            {
                "summonerName": "C", "team": "200", "level": 2,
                "summonerSpells": {
                    "summonerSpellOne": { "displayName": "Smite" },
                    "summonerSpellTwo": { "displayName": "Flash" }
                }
            }
        ]
    }"#,
    );

    roster.reconcile(&snap, &catalog());
    assert_eq!(roster.len(), 1, "only the well-formed sibling is tracked");
    assert_eq!(roster.entries()[0].participant_id, "C");
}

#[test]
fn test_no_viewer_team_tracks_nothing() {
    let mut roster = Roster::new();
    let snap = snapshot(
        r#"{
        "allPlayers": [ { "summonerName": "B", "team": "200" } ]
    }"#,
    );
    assert!(!roster.reconcile(&snap, &catalog()));
    assert!(roster.is_empty());
}

#[test]
fn test_explicit_cooldown_applies_only_while_idle() {
    let mut roster = Roster::new();
    roster.reconcile(&basic_snapshot(), &catalog());

    let with_override = snapshot(
        r#"{
        "activePlayer": { "summonerName": "A" },
        "allPlayers": [
            { "summonerName": "A", "team": "100" },
            {
                "summonerName": "B", "team": "200", "level": 6,
                "summonerSpells": {
                    "summonerSpellOne": { "displayName": "Flash" },
                    "summonerSpellTwo": { "displayName": "Ignite" }
                },
                "summonerSpellCooldowns": { "summonerSpellOne": 270 }
            }
        ]
    }"#,
    );

    // Idle timer accepts the authoritative value
    roster.reconcile(&with_override, &catalog());
    let entry = roster.entry_mut("B").unwrap();
    assert_eq!(entry.spell(SpellSlot::One).base_cooldown(), 270);
    assert_eq!(entry.level, 6, "metadata refreshes");

    // A running countdown wins over the next poll
    entry.spell_mut(SpellSlot::One).activate();
    roster.reconcile(&basic_snapshot(), &catalog());
    let entry = roster.entry_mut("B").unwrap();
    assert_eq!(entry.spell(SpellSlot::One).base_cooldown(), 270);
    assert!(entry.spell(SpellSlot::One).is_running());
}

#[test]
fn test_level_seeds_scaled_cooldown_on_creation() {
    let mut roster = Roster::new();
    let snap = snapshot(
        r#"{
        "activePlayer": { "summonerName": "A" },
        "allPlayers": [
            { "summonerName": "A", "team": "100" },
            {
                "summonerName": "B", "team": "200", "level": 10,
                "summonerSpells": {
                    "summonerSpellOne": { "displayName": "Unleashed Teleport" },
                    "summonerSpellTwo": { "displayName": "Flash" }
                }
            }
        ]
    }"#,
    );

    roster.reconcile(&snap, &catalog());
    let entry = &roster.entries()[0];
    assert_eq!(entry.spell(SpellSlot::One).base_cooldown(), 240);
}
