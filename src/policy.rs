//! How loud and on which key each strike sounds.

use crate::config::{NoteMap, Velocities};
use crate::error::{Result, TabError};
use crate::midi::drums::STICKS;
use crate::types::midi_note::MidiNote;
use crate::types::strike_event::StrikeEvent;
use crate::BeatTime;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrikeType {
    Normal,
    Accent,
    Ghost,
    RimClick,
    /// Anything else found in a lane; played at the normal velocity.
    Unknown(char),
}

impl StrikeType {
    pub const KNOWN: [StrikeType; 4] = [
        StrikeType::Accent,
        StrikeType::Ghost,
        StrikeType::RimClick,
        StrikeType::Normal,
    ];

    pub fn symbol(&self) -> char {
        match self {
            StrikeType::Normal => 'o',
            StrikeType::Accent => 'O',
            StrikeType::Ghost => 'g',
            StrikeType::RimClick => 'r',
            StrikeType::Unknown(c) => *c,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, StrikeType::Unknown(_))
    }

    pub fn velocity(&self, velocities: &Velocities) -> u8 {
        match self {
            StrikeType::Accent => velocities.accent,
            StrikeType::Ghost => velocities.ghost,
            StrikeType::Normal | StrikeType::RimClick | StrikeType::Unknown(_) => {
                velocities.strike
            }
        }
    }
}

impl From<char> for StrikeType {
    fn from(c: char) -> Self {
        match c {
            'o' => StrikeType::Normal,
            'O' => StrikeType::Accent,
            'g' => StrikeType::Ghost,
            'r' => StrikeType::RimClick,
            other => StrikeType::Unknown(other),
        }
    }
}

/// Velocity of every strike character with defined handling.
pub fn strike_type_volume_map(velocities: &Velocities) -> BTreeMap<char, u8> {
    StrikeType::KNOWN
        .iter()
        .map(|strike| (strike.symbol(), strike.velocity(velocities)))
        .collect()
}

/// Keeps only the entries for labels that appear in the tab.
pub fn restrict_map(full_map: &NoteMap, present_labels: &BTreeSet<String>) -> NoteMap {
    full_map
        .iter()
        .filter(|(label, _)| present_labels.contains(*label))
        .map(|(label, key)| (label.clone(), *key))
        .collect()
}

/// Labels in `note_types` with no key in `note_map`.
pub fn unmappable_note_names(note_types: &BTreeSet<String>, note_map: &NoteMap) -> BTreeSet<String> {
    note_types
        .iter()
        .filter(|label| !note_map.contains_key(*label))
        .cloned()
        .collect()
}

pub struct StrikePolicy<'a> {
    pub note_map: &'a NoteMap,
    pub velocities: Velocities,
    pub duration: BeatTime,
}

impl StrikePolicy<'_> {
    pub fn pitch(&self, event: &StrikeEvent) -> Option<u8> {
        match StrikeType::from(event.strike) {
            StrikeType::RimClick => Some(STICKS),
            _ => self.note_map.get(&event.note_type).copied(),
        }
    }

    pub fn velocity(&self, event: &StrikeEvent) -> u8 {
        StrikeType::from(event.strike).velocity(&self.velocities)
    }

    pub fn to_midi_note(&self, event: &StrikeEvent) -> Result<MidiNote> {
        let pitch = self.pitch(event).ok_or_else(|| {
            TabError::UnmappableNoteNames(BTreeSet::from([event.note_type.clone()]))
        })?;
        Ok(MidiNote {
            pitch,
            time: event.time,
            duration: self.duration,
            velocity: self.velocity(event),
        })
    }
}
