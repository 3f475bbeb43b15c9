//! Roster of tracked opposing participants
//!
//! Pure storage plus one mutation entry point: [`Roster::reconcile`] merges a
//! polled snapshot into the tracked state. Entries are created on first
//! sight and never removed (participants do not leave a match once joined),
//! and per-entry updates defer to each timer's own conflict rule: a running
//! countdown is never overwritten by polled data.

#[cfg(test)]
mod reconcile_tests;

use crate::catalog::SpellCatalog;
use crate::telemetry::{GameSnapshot, ParticipantRecord};
use crate::timer::SpellTimer;
use tracing::{debug, trace};

/// The two fixed ability slots every participant carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpellSlot {
    One,
    Two,
}

impl SpellSlot {
    pub const ALL: [SpellSlot; 2] = [SpellSlot::One, SpellSlot::Two];

    pub fn index(self) -> usize {
        match self {
            SpellSlot::One => 0,
            SpellSlot::Two => 1,
        }
    }
}

/// One tracked opposing participant.
#[derive(Debug, Clone)]
pub struct RosterEntry {
    pub participant_id: String,
    pub team_id: String,
    pub champion: Option<String>,
    pub level: u32,
    spells: [SpellTimer; 2],
}

impl RosterEntry {
    fn from_record(record: &ParticipantRecord, catalog: &SpellCatalog) -> Option<Self> {
        let id = record.summoner_name.clone()?;
        let team = record.team.clone()?;

        let spells = std::array::from_fn(|i| {
            let name = record.spell_name(i).unwrap_or("Unknown");
            SpellTimer::new(name, catalog.cooldown_secs(name, record.level))
        });

        Some(Self {
            participant_id: id,
            team_id: team,
            champion: record.champion_name.clone(),
            level: record.level,
            spells,
        })
    }

    pub fn spell(&self, slot: SpellSlot) -> &SpellTimer {
        &self.spells[slot.index()]
    }

    pub fn spell_mut(&mut self, slot: SpellSlot) -> &mut SpellTimer {
        &mut self.spells[slot.index()]
    }
}

/// All tracked opposing participants, in first-seen order.
///
/// First-seen order is the display order, so a `Vec` with linear lookup is
/// the right shape: a match caps out at five enemies.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut [RosterEntry] {
        &mut self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry_mut(&mut self, participant_id: &str) -> Option<&mut RosterEntry> {
        self.entries
            .iter_mut()
            .find(|e| e.participant_id == participant_id)
    }

    /// Merge one authoritative snapshot.
    ///
    /// The viewer's team is resolved first; without it nothing is tracked
    /// (the whole snapshot is unusable, not an error). Records missing
    /// identity fields are skipped individually. Returns `true` when at
    /// least one new entry was created, so the caller can kick off icon
    /// resolution for it.
    pub fn reconcile(&mut self, snapshot: &GameSnapshot, catalog: &SpellCatalog) -> bool {
        let Some(viewer_team) = snapshot.active_team() else {
            trace!("snapshot has no resolvable viewer team; skipping");
            return false;
        };
        let viewer_team = viewer_team.to_string();

        let mut added = false;
        for record in &snapshot.all_players {
            let (Some(id), Some(team)) = (record.summoner_name.as_deref(), record.team.as_deref())
            else {
                trace!("skipping participant record without identity");
                continue;
            };
            if team == viewer_team {
                continue;
            }

            match self.entry_mut(id) {
                Some(entry) => update_entry(entry, record),
                None => {
                    if let Some(entry) = RosterEntry::from_record(record, catalog) {
                        debug!(
                            participant = %entry.participant_id,
                            champion = entry.champion.as_deref().unwrap_or("?"),
                            "tracking new opposing participant"
                        );
                        self.entries.push(entry);
                        added = true;
                    }
                }
            }
        }
        added
    }
}

/// Per-entry snapshot update for an already-tracked participant.
///
/// Only an explicit remaining-cooldown value from the feed touches a timer,
/// and only through the idle-guarded `update_base_cooldown`. Level and
/// champion metadata refresh freely.
fn update_entry(entry: &mut RosterEntry, record: &ParticipantRecord) {
    entry.level = record.level;
    if entry.champion.is_none() {
        entry.champion = record.champion_name.clone();
    }

    for slot in SpellSlot::ALL {
        if let Some(explicit) = record.explicit_cooldown(slot.index()) {
            entry.spell_mut(slot).update_base_cooldown(explicit);
        }
    }
}
