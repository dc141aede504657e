use crate::config::{NoteMap, TabConfig, Velocities};
use crate::error::{Result, TabError};
use crate::grid::TabGrid;
use crate::layout::{BarGroup, Layout};
use crate::midi::drums::default_note_map;
use crate::policy::{
    StrikePolicy, StrikeType, restrict_map, strike_type_volume_map, unmappable_note_names,
};
use crate::types::midi_note::MidiNote;
use crate::walker::NoteWalker;
use crate::BeatTime;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

/// A parsed drum tab.
///
/// The normalized grid and its layout never change after construction, so the
/// derived label and strike sets are computed once and kept.
#[derive(Debug)]
pub struct Tab {
    grid: TabGrid,
    layout: Layout,
    bpm: f32,
    velocities: Velocities,
    note_map: NoteMap,
    note_types: OnceLock<BTreeSet<String>>,
    strike_types: OnceLock<BTreeSet<char>>,
}

impl Tab {
    pub fn new(text: &str) -> Result<Self> {
        Self::with_config(text, &TabConfig::default())
    }

    pub fn with_config(text: &str, config: &TabConfig) -> Result<Self> {
        config.validate()?;
        let grid = TabGrid::parse(text);
        let layout = Layout::analyze(&grid)?;

        let mut tab = Self {
            grid,
            layout,
            bpm: config.bpm,
            velocities: config.velocities,
            note_map: NoteMap::new(),
            note_types: OnceLock::new(),
            strike_types: OnceLock::new(),
        };
        let full_map = config.note_map.clone().unwrap_or_else(default_note_map);
        tab.note_map = restrict_map(&full_map, tab.note_types());
        Ok(tab)
    }

    /// The normalized lines: divider look-alikes replaced, count rows blanked.
    pub fn lines(&self) -> &[String] {
        self.grid.lines()
    }

    pub fn bar_groups(&self) -> &[BarGroup] {
        &self.layout.groups
    }

    pub fn bar_rows(&self) -> Vec<usize> {
        self.bar_groups().iter().map(BarGroup::start_row).collect()
    }

    pub fn divisions_in_bar(&self) -> u32 {
        self.layout.divisions
    }

    /// Length of every note, one time column.
    pub fn duration(&self) -> BeatTime {
        self.layout.duration
    }

    pub fn bpm(&self) -> f32 {
        self.bpm
    }

    /// Every lane label in the tab.
    pub fn note_types(&self) -> &BTreeSet<String> {
        self.note_types.get_or_init(|| {
            self.bar_groups()
                .iter()
                .flat_map(BarGroup::labels)
                .map(str::to_string)
                .collect()
        })
    }

    /// Every strike character in the tab.
    pub fn strike_types(&self) -> &BTreeSet<char> {
        self.strike_types.get_or_init(|| {
            self.walk_notes_ignoring_repetition()
                .map(|event| event.strike)
                .collect()
        })
    }

    /// Strike characters without defined handling; they play at the normal velocity.
    pub fn unknown_strike_types(&self) -> BTreeSet<char> {
        self.strike_types()
            .iter()
            .copied()
            .filter(|&strike| !StrikeType::from(strike).is_known())
            .collect()
    }

    pub fn strike_type_volume_map(&self) -> BTreeMap<char, u8> {
        strike_type_volume_map(&self.velocities)
    }

    /// The active note map, restricted to the labels present in this tab.
    pub fn note_name_to_number_map(&self) -> &NoteMap {
        &self.note_map
    }

    pub fn unmappable_note_names(&self) -> BTreeSet<String> {
        unmappable_note_names(self.note_types(), &self.note_map)
    }

    pub fn walk_notes(&self) -> NoteWalker<'_> {
        NoteWalker::new(&self.grid, &self.layout, false)
    }

    /// Walks every bar once, whatever its repeat count.
    pub fn walk_notes_ignoring_repetition(&self) -> NoteWalker<'_> {
        NoteWalker::new(&self.grid, &self.layout, true)
    }

    pub fn policy(&self) -> StrikePolicy<'_> {
        StrikePolicy {
            note_map: &self.note_map,
            velocities: self.velocities,
            duration: self.duration(),
        }
    }

    /// Notes for the MIDI writer, failing once for all unmapped labels.
    pub fn midi_notes(&self) -> Result<Vec<MidiNote>> {
        let unmappable = self.unmappable_note_names();
        if !unmappable.is_empty() {
            return Err(TabError::UnmappableNoteNames(unmappable));
        }
        let policy = self.policy();
        self.walk_notes()
            .map(|event| policy.to_midi_note(&event))
            .collect()
    }
}
