pub mod drums;
#[cfg(feature = "midi")]
mod tab_to_midi;

#[cfg(feature = "midi")]
pub use tab_to_midi::{convert_notes_to_midi_bytes, convert_tab_to_midi};
