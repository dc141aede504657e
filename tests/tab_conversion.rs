use drumtab::{BeatTime, NoteMap, StrikeEvent, Tab, TabConfig, TabError};
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;
use std::path::PathBuf;

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(format!("{name}.txt"));
    std::fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()))
}

fn load(name: &str) -> Tab {
    Tab::new(&fixture(name)).unwrap_or_else(|err| panic!("failed to parse {name}: {err}"))
}

fn events(name: &str) -> Vec<StrikeEvent> {
    load(name).walk_notes().collect()
}

fn beats(numerator: u32, denominator: u32) -> BeatTime {
    BeatTime::from_ratio(numerator, denominator).unwrap()
}

fn event(label: &str, strike: char, time: BeatTime) -> StrikeEvent {
    StrikeEvent::new(label, strike, time)
}

#[test]
fn test_simple_4_4_beat() {
    let tab = load("simple_4_4_beat");
    assert_eq!(tab.bpm(), 100.0);
    assert_eq!(tab.divisions_in_bar(), 16);
    assert_eq!(tab.duration().to_string(), "0.25");
    assert_eq!(tab.bar_rows(), vec![2]);
    assert_eq!(
        tab.note_types(),
        &BTreeSet::from(["B".to_string(), "HH".to_string(), "S".to_string()])
    );
    // count row is blanked
    assert_eq!(tab.lines()[5], "");

    let events: Vec<StrikeEvent> = tab.walk_notes().collect();
    assert_eq!(events.len(), 25);
    assert_eq!(
        events[..4].to_vec(),
        vec![
            event("HH", 'x', BeatTime::zero()),
            event("B", 'o', BeatTime::zero()),
            event("HH", 'x', beats(1, 2)),
            event("HH", 'x', beats(1, 1)),
        ]
    );
    assert_eq!(events.last(), Some(&event("HH", 'x', beats(15, 2))));
}

#[test]
fn test_notation_variants_match_simple_beat() {
    let expected = events("simple_4_4_beat");
    for name in [
        "simple_4_4_beat_no_initial_pipe",
        "simple_4_4_beat_odd_pipe_chars",
        "simple_4_4_beat_trailing_text",
        "variable_bar_lengths",
    ] {
        assert_eq!(events(name), expected, "{name}");
    }
}

#[test]
fn test_repetition_variants_match_written_copies() {
    let expected = events("four_written_copies");
    assert_eq!(expected.len(), 4 * 13);
    for name in [
        "repetition_4x",
        "repetition_4x_underscore",
        "repetition_4x_equals",
        "repetition_2x_2x",
        "repetition_1x_1x",
    ] {
        assert_eq!(events(name), expected, "{name}");
    }
}

#[test]
fn test_two_bar_repetition() {
    let tab = load("two_bar_repetition");
    assert_eq!(tab.bar_groups()[0].annotation_row, Some(0));
    let repeated: Vec<StrikeEvent> = tab.walk_notes().collect();
    assert_eq!(repeated, events("two_bar_repetition_written_out"));
}

#[test]
fn test_repeat_keyword_row() {
    let tab = load("repeat_keyword");
    assert_eq!(tab.divisions_in_bar(), 8);
    assert_eq!(
        tab.note_types(),
        &BTreeSet::from(["HH".to_string(), "S".to_string()])
    );
    let events: Vec<StrikeEvent> = tab.walk_notes().collect();
    assert_eq!(events.len(), 12);
    assert_eq!(events.last(), Some(&event("S", 'o', beats(7, 1))));
}

#[test]
fn test_ignoring_repetition_walks_each_bar_once() {
    let tab = load("repetition_4x");
    assert_eq!(tab.walk_notes().count(), 52);
    assert_eq!(tab.walk_notes_ignoring_repetition().count(), 13);
}

#[test]
fn test_unknown_strike_types_are_identified() {
    let tab = load("unknown_strike_types");
    assert_eq!(
        tab.unknown_strike_types(),
        BTreeSet::from(['Q', 'S', 'X', 'Z', 'z'])
    );
    // unknown strikes still play, at the normal velocity
    assert_eq!(
        tab.midi_notes().unwrap(),
        load("simple_4_4_beat").midi_notes().unwrap()
    );
}

#[test]
fn test_walk_works_with_unmappable_note_names() {
    let config = TabConfig {
        note_map: Some(NoteMap::new()),
        ..TabConfig::default()
    };
    let tab = Tab::with_config(&fixture("simple_4_4_beat"), &config).unwrap();
    assert_eq!(tab.walk_notes().count(), 25);
    assert!(tab.note_name_to_number_map().is_empty());
    match tab.midi_notes() {
        Err(TabError::UnmappableNoteNames(names)) => assert_eq!(names.len(), 3),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_text_without_bars() {
    assert!(matches!(Tab::new(""), Err(TabError::NoBars)));
    assert!(matches!(
        Tab::new(&fixture("no_bars")),
        Err(TabError::NoBars)
    ));
}

#[test]
fn test_walk_is_restartable_and_ordered() {
    let tab = load("two_bar_repetition");
    let first: Vec<StrikeEvent> = tab.walk_notes().collect();
    let second: Vec<StrikeEvent> = tab.walk_notes().collect();
    assert_eq!(first, second);

    let duration = tab.duration();
    for pair in first.windows(2) {
        assert!(pair[0].time <= pair[1].time);
    }
    for event in &first {
        let steps = event.time.as_f64() / duration.as_f64();
        assert_eq!(steps, steps.round(), "{event}");
    }
}

#[cfg(feature = "midi")]
mod midi {
    use super::*;
    use pretty_assertions::assert_eq;
    use drumtab::midi::convert_tab_to_midi;

    fn midi_bytes(name: &str) -> Vec<u8> {
        convert_tab_to_midi(&load(name)).unwrap()
    }

    #[test]
    fn test_equivalent_tabs_write_identical_midi() {
        let simple = midi_bytes("simple_4_4_beat");
        for name in [
            "unknown_strike_types",
            "variable_bar_lengths",
            "simple_4_4_beat_no_initial_pipe",
            "simple_4_4_beat_odd_pipe_chars",
            "simple_4_4_beat_trailing_text",
        ] {
            assert_eq!(midi_bytes(name), simple, "{name}");
        }
        assert_eq!(
            midi_bytes("repetition_2x_2x"),
            midi_bytes("repetition_4x")
        );
    }

    #[test]
    fn test_midi_track_layout() {
        let bytes = midi_bytes("simple_4_4_beat");
        let smf = midly::Smf::parse(&bytes).unwrap();
        assert_eq!(smf.header.format, midly::Format::SingleTrack);
        assert_eq!(smf.tracks.len(), 1);
        let note_ons = smf.tracks[0]
            .iter()
            .filter(|event| {
                matches!(
                    event.kind,
                    midly::TrackEventKind::Midi {
                        message: midly::MidiMessage::NoteOn { .. },
                        ..
                    }
                )
            })
            .count();
        assert_eq!(note_ons, 25);
    }
}
