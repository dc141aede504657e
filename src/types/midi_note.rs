use crate::BeatTime;

/// A percussion note ready for the MIDI writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidiNote {
    pub pitch: u8,
    pub time: BeatTime,
    pub duration: BeatTime,
    pub velocity: u8,
}

impl MidiNote {
    pub fn end(&self) -> BeatTime {
        self.time + self.duration
    }
}
