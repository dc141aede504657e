use crate::BeatTime;
use std::fmt;

/// One non-silent cell of the tab: a lane struck at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StrikeEvent {
    pub note_type: String,
    pub strike: char,
    pub time: BeatTime,
}

impl StrikeEvent {
    pub fn new(note_type: impl Into<String>, strike: char, time: BeatTime) -> Self {
        Self {
            note_type: note_type.into(),
            strike,
            time,
        }
    }
}

impl fmt::Display for StrikeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.time, self.note_type, self.strike)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let event = StrikeEvent::new("HH", 'x', BeatTime::from_ratio(5, 4).unwrap());
        assert_eq!(event.to_string(), "1.25 HH x");
    }
}
