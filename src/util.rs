use crate::error::{Result, TabError};
use crate::tab::Tab;
use crate::types::strike_event::StrikeEvent;

pub fn format_float32(value: f32) -> String {
    let trimmed_zeros = format!("{:.5}", value).trim_end_matches('0').to_string();

    if trimmed_zeros.ends_with('.') {
        trimmed_zeros + "0"
    } else {
        trimmed_zeros
    }
}

/// Width of the time column when every timestamp up to `max_beats` is padded
/// to the same length.
pub fn timestamp_width(max_beats: u64) -> usize {
    // digits + 1 (dot) + 5 (fractional digits)
    max_beats.to_string().len() + 1 + 5
}

/// Plain-text rendition of the performance, one strike per line:
/// `time label strike key velocity`.
pub fn event_listing(tab: &Tab) -> Result<String> {
    let unmappable = tab.unmappable_note_names();
    if !unmappable.is_empty() {
        return Err(TabError::UnmappableNoteNames(unmappable));
    }

    let policy = tab.policy();
    let events: Vec<StrikeEvent> = tab.walk_notes().collect();
    let last = events.last().map(|event| event.time).unwrap_or_default();
    let width = timestamp_width(last.whole_beats());

    let mut output = format!(
        "# bpm {}\n# divisions {}\n",
        format_float32(tab.bpm()),
        tab.divisions_in_bar()
    );
    for event in &events {
        let note = policy.to_midi_note(event)?;
        output.push_str(&format!(
            "{:<width$} {} {} {} {}\n",
            event.time, event.note_type, event.strike, note.pitch, note.velocity
        ));
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tests() {
        assert_eq!(format_float32(1.234567), "1.23457");
        assert_eq!(format_float32(1.23), "1.23");
        assert_eq!(format_float32(100.0), "100.0");
        assert_eq!(format_float32(92.5), "92.5");
        assert_eq!(format_float32(0.0), "0.0");
    }

    #[test]
    fn test_timestamp_width() {
        assert_eq!(timestamp_width(0), 7);
        assert_eq!(timestamp_width(12), 8);
    }

    #[test]
    fn test_event_listing() {
        let tab = Tab::new("HH|x---x---|\n S|--O---r-|").unwrap();
        let listing = event_listing(&tab).unwrap();
        assert_eq!(
            listing,
            "\
# bpm 100.0
# divisions 8
0.0     HH x 42 70
1.0     S O 38 110
2.0     HH x 42 70
3.0     S r 31 70
"
        );
    }

    #[test]
    fn test_event_listing_unmappable() {
        let tab = Tab::new("Cowbell|o---|").unwrap();
        assert!(matches!(
            event_listing(&tab),
            Err(TabError::UnmappableNoteNames(_))
        ));
    }
}
