use crate::tab::Tab;
use crate::types::midi_note::MidiNote;
use anyhow::{Result, bail};
use midly::{MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind};

const PPQN: u16 = 480;

/// General MIDI percussion channel (channel 10).
const DRUM_CHANNEL: u8 = 9;

pub fn convert_tab_to_midi(tab: &Tab) -> Result<Vec<u8>> {
    let notes = tab.midi_notes()?;
    convert_notes_to_midi_bytes(&notes, tab.bpm())
}

pub fn convert_notes_to_midi_bytes(notes: &[MidiNote], bpm: f32) -> Result<Vec<u8>> {
    let smf = convert_notes_to_smf(notes, bpm)?;

    let mut buffer = Vec::new();
    smf.write(&mut buffer)
        .map_err(|e| anyhow::anyhow!("Failed to write MIDI: {}", e))?;

    Ok(buffer)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum NoteEdge {
    // off sorts first so a note ending where the next one starts is released first
    Off,
    On,
}

fn convert_notes_to_smf(notes: &[MidiNote], bpm: f32) -> Result<Smf<'static>> {
    if !(bpm.is_finite() && bpm > 0.0) {
        bail!("Tempo must be positive, got {}", bpm);
    }

    let mut edges = Vec::with_capacity(notes.len() * 2);
    for note in notes {
        if note.pitch > 127 || note.velocity > 127 {
            bail!(
                "Note {} out of range for MIDI (key {}, velocity {})",
                note.time,
                note.pitch,
                note.velocity
            );
        }
        edges.push((note.time.as_ticks(PPQN), NoteEdge::On, note));
        edges.push((note.end().as_ticks(PPQN), NoteEdge::Off, note));
    }
    edges.sort_by_key(|(tick, edge, _)| (*tick, *edge));

    let microseconds_per_quarter = (60_000_000.0 / bpm as f64).round() as u32;
    if microseconds_per_quarter > midly::num::u24::max_value().as_int() {
        bail!("Tempo {} is too slow for MIDI", bpm);
    }

    let mut track_events = vec![
        TrackEvent {
            delta: midly::num::u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::TrackName(b"")),
        },
        TrackEvent {
            delta: midly::num::u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::Tempo(midly::num::u24::new(
                microseconds_per_quarter,
            ))),
        },
    ];

    let channel = midly::num::u4::new(DRUM_CHANNEL);
    let mut last_tick = 0u64;

    for (tick, edge, note) in edges {
        let mut delta_tick = tick - last_tick;
        last_tick = tick;

        while delta_tick > midly::num::u28::max_value().as_int() as u64 {
            track_events.push(TrackEvent {
                delta: midly::num::u28::max_value(),
                kind: TrackEventKind::Meta(MetaMessage::Text(b"long delta")),
            });
            delta_tick -= midly::num::u28::max_value().as_int() as u64;
        }

        let key = midly::num::u7::new(note.pitch);
        let message = match edge {
            NoteEdge::On => MidiMessage::NoteOn {
                key,
                vel: midly::num::u7::new(note.velocity),
            },
            NoteEdge::Off => MidiMessage::NoteOff {
                key,
                vel: midly::num::u7::new(0),
            },
        };

        track_events.push(TrackEvent {
            delta: midly::num::u28::new(delta_tick as u32),
            kind: TrackEventKind::Midi { channel, message },
        });
    }

    track_events.push(TrackEvent {
        delta: midly::num::u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });

    Ok(Smf {
        header: midly::Header {
            format: midly::Format::SingleTrack,
            timing: Timing::Metrical(midly::num::u15::new(PPQN)),
        },
        tracks: vec![track_events],
    })
}
