// src/query/compare.rs

use anyhow::{bail, Result};

use crate::schema::{Kind, Profile, Proposal};
use crate::store::{sort_by_name, DataStore};

pub const SLOT_COUNT: usize = 3;

/// What one comparison column shows for the selected theme.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell<'a> {
    EmptySlot,
    /// A party is chosen but no theme is selected yet.
    NoTheme(&'a Profile),
    /// The party has no comparison row for the theme.
    NoProposals(&'a Profile),
    Proposal(&'a Profile, &'a Proposal),
}

/// Side-by-side comparison of up to three parties, held by party id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonSlots {
    slots: [Option<String>; SLOT_COUNT],
}

impl ComparisonSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, index: usize) -> Option<&str> {
        self.slots.get(index).and_then(|s| s.as_deref())
    }

    /// Add a profile to the first free slot, or replace the last one when
    /// all are taken. Candidates are swapped for their party; a candidate
    /// whose party cannot be found is rejected.
    pub fn add(&mut self, store: &DataStore, profile: &Profile) -> Result<usize> {
        let Some(party) = store.resolve_party(profile) else {
            bail!(
                "no party found for {:?}; only parties can be compared",
                profile.nombre
            );
        };
        let index = self
            .slots
            .iter()
            .position(Option::is_none)
            .unwrap_or(SLOT_COUNT - 1);
        self.slots[index] = Some(party.id.clone());
        Ok(index)
    }

    /// Put party `party_id` in slot `index`. Ids that are not parties and
    /// out-of-range slots are ignored.
    pub fn set(&mut self, store: &DataStore, index: usize, party_id: &str) -> bool {
        if party_id.is_empty() || index >= SLOT_COUNT {
            return false;
        }
        match store.party_by_id(party_id) {
            Some(party) => {
                self.slots[index] = Some(party.id.clone());
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = None;
        }
    }

    /// Parties selectable in slot `index`, excluding the one it shows.
    pub fn party_options<'a>(&self, store: &'a DataStore, index: usize) -> Vec<&'a Profile> {
        let current = self.slot(index);
        let mut out: Vec<&Profile> = store
            .profiles()
            .items()
            .iter()
            .filter(|p| p.kind == Kind::Partido && Some(p.id.as_str()) != current)
            .collect();
        sort_by_name(&mut out);
        out
    }

    /// One cell per slot for `theme` (empty when none is selected).
    pub fn cells<'a>(&self, store: &'a DataStore, theme: &str) -> Vec<Cell<'a>> {
        self.slots
            .iter()
            .map(|slot| {
                let Some(party) = slot.as_deref().and_then(|id| store.party_by_id(id)) else {
                    return Cell::EmptySlot;
                };
                if theme.is_empty() {
                    return Cell::NoTheme(party);
                }
                match store.proposal_for(&party.id, theme) {
                    Some(p) => Cell::Proposal(party, p),
                    None => Cell::NoProposals(party),
                }
            })
            .collect()
    }
}
