//! Drum tab library
//!
//! Reads ASCII drum tablature (one lane per drum voice, bars delimited by `|`,
//! optional repeat annotations above the lanes) and turns it into a timed stream of
//! strike events, then into a General MIDI percussion track.

pub mod config;
pub mod error;
pub mod grid;
pub mod layout;
pub mod midi;
pub mod normalize;
pub mod policy;
pub mod repetition;
pub mod tab;
pub mod types;
pub mod util;
pub mod walker;

// Re-export commonly used types
pub use config::{NoteMap, TabConfig, Velocities};
pub use error::{Result, TabError};
pub use layout::{BarGroup, Lane, Layout};
pub use policy::{StrikePolicy, StrikeType};
pub use tab::Tab;
pub use types::beat_time::BeatTime;
pub use types::midi_note::MidiNote;
pub use types::strike_event::StrikeEvent;
pub use walker::NoteWalker;
