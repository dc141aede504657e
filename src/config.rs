use crate::error::{Result, TabError};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Note-type label (lane name) to MIDI key number.
pub type NoteMap = BTreeMap<String, u8>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Velocities {
    pub strike: u8,
    pub accent: u8,
    pub ghost: u8,
}

impl Default for Velocities {
    fn default() -> Self {
        Self {
            strike: 70,
            accent: 110,
            ghost: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TabConfig {
    pub bpm: f32,
    /// `None` selects the built-in shorthand map.
    pub note_map: Option<NoteMap>,
    pub velocities: Velocities,
}

impl Default for TabConfig {
    fn default() -> Self {
        Self {
            bpm: 100.0,
            note_map: None,
            velocities: Velocities::default(),
        }
    }
}

impl TabConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: TabConfig = serde_json::from_str(json)
            .map_err(|err| TabError::Config(format!("could not parse configuration: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_json(&read(path)?)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.bpm.is_finite() && self.bpm > 0.0) {
            return Err(TabError::Config(format!(
                "tempo must be a positive number of beats per minute, got {}",
                self.bpm
            )));
        }
        Ok(())
    }
}

/// Reads a standalone `{"S": 38, "B": 35}` style map.
pub fn note_map_from_json(json: &str) -> Result<NoteMap> {
    serde_json::from_str(json)
        .map_err(|err| TabError::Config(format!("could not parse note map: {err}")))
}

pub fn load_note_map(path: &Path) -> Result<NoteMap> {
    note_map_from_json(&read(path)?)
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|err| TabError::Config(format!("could not read {}: {err}", path.display())))
}
