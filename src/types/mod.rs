pub mod beat_time;
pub mod midi_note;
pub mod strike_event;
