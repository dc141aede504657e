//! General MIDI percussion keys and the shorthand lane names commonly seen in tabs.

use crate::config::NoteMap;

pub struct GmDrum {
    pub name: &'static str,
    pub key: u8,
}

const fn drum(name: &'static str, key: u8) -> GmDrum {
    GmDrum { name, key }
}

/// GM1 sound set plus the GM2 additions.
pub const GM_DRUMS: &[GmDrum] = &[
    // Cymbals
    drum("Crash Cymbal 1", 49),
    drum("Crash Cymbal 2", 57),
    drum("Ride Cymbal 1", 51),
    drum("Ride Cymbal 2", 59),
    drum("Ride Bell", 53),
    drum("Splash Cymbal", 55),
    drum("Chinese Cymbal", 52),
    // Toms
    drum("High Tom", 50),
    drum("Hi-Mid Tom", 48),
    drum("Low-Mid Tom", 47),
    drum("Low Tom", 45),
    drum("High Floor Tom", 43),
    drum("Low Floor Tom", 41),
    // Hi-hat
    drum("Closed Hi-Hat", 42),
    drum("Open Hi-Hat", 46),
    drum("Pedal Hi-Hat", 44),
    // Bass drum
    drum("Acoustic Bass Drum", 35),
    drum("Bass Drum 1", 36),
    // Snare
    drum("Acoustic Snare", 38),
    drum("Electric Snare", 40),
    // Misc
    drum("Hi Bongo", 60),
    drum("Side Stick", 37),
    drum("Low Bongo", 61),
    drum("Mute Hi Conga", 62),
    drum("Hand Clap", 39),
    drum("Open Hi Conga", 63),
    drum("Low Conga", 64),
    drum("High Timbale", 65),
    drum("Low Timbale", 66),
    drum("High Agogo", 67),
    drum("Low Agogo", 68),
    drum("Cabasa", 69),
    drum("Maracas", 70),
    drum("Short Whistle", 71),
    drum("Long Whistle", 72),
    drum("Short Guiro", 73),
    drum("Long Guiro", 74),
    drum("Claves", 75),
    drum("Hi Wood Block", 76),
    drum("Low Wood Block", 77),
    drum("Tambourine", 54),
    drum("Mute Cuica", 78),
    drum("Open Cuica", 79),
    drum("Cowbell", 56),
    drum("Mute Triangle", 80),
    drum("Open Triangle", 81),
    drum("Vibraslap", 58),
    // GM2
    drum("High Q", 27),
    drum("Slap", 28),
    drum("Scratch 1", 29),
    drum("Scratch 2", 30),
    drum("Sticks", 31),
    drum("Square", 32),
    drum("Metronome 1", 33),
    drum("Metronome 2", 34),
    drum("Shaker", 82),
    drum("Jingle Bell", 83),
    drum("Belltree", 84),
    drum("Castanets", 85),
    drum("Mute Surdo", 86),
    drum("Open Surdo", 87),
];

/// Key every rim click sounds, whatever lane it is written on.
pub const STICKS: u8 = 31;

/// Lane shorthand to GM drum name.
const SHORTHAND: &[(&str, &str)] = &[
    ("B", "Acoustic Bass Drum"),
    ("C", "Crash Cymbal 1"),
    ("C1", "Crash Cymbal 1"),
    ("CC", "Crash Cymbal 1"),
    ("f", "High Floor Tom"),
    ("F", "Low Floor Tom"),
    ("F1", "High Floor Tom"),
    ("F2", "Low Floor Tom"),
    ("H", "Closed Hi-Hat"),
    ("Hf", "Pedal Hi-Hat"),
    ("HH", "Closed Hi-Hat"),
    ("R", "Ride Cymbal 1"),
    ("Rd", "Ride Cymbal 1"),
    ("S", "Acoustic Snare"),
    ("t", "High Tom"),
    ("T", "Low Tom"),
    ("T1", "High Tom"),
    ("T2", "Low Tom"),
];

pub fn gm_drum_key(name: &str) -> Option<u8> {
    GM_DRUMS
        .iter()
        .find(|drum| drum.name.eq_ignore_ascii_case(name))
        .map(|drum| drum.key)
}

pub fn default_note_map() -> NoteMap {
    SHORTHAND
        .iter()
        .filter_map(|(label, name)| Some((label.to_string(), gm_drum_key(name)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gm_lookup() {
        assert_eq!(gm_drum_key("Acoustic Snare"), Some(38));
        assert_eq!(gm_drum_key("closed hi-hat"), Some(42));
        assert_eq!(gm_drum_key("Sticks"), Some(STICKS));
        assert_eq!(gm_drum_key("Kazoo"), None);
    }

    #[test]
    fn test_default_map() {
        let map = default_note_map();
        assert_eq!(map.len(), SHORTHAND.len());
        assert_eq!(map["B"], 35);
        assert_eq!(map["HH"], 42);
        assert_eq!(map["Hf"], 44);
        assert_eq!(map["S"], 38);
        assert_eq!(map["F2"], 41);
        assert_eq!(map["t"], 50);
    }
}
