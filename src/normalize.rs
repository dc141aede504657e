//! First pass over the raw text: canonical dividers, trimmed lines, count rows removed.

/// The canonical bar divider.
pub const DIVIDER: char = '|';

/// Glyphs that are commonly pasted in place of a pipe.
const DIVIDER_LOOKALIKES: [char; 4] = ['\u{00a6}', '\u{2758}', '\u{ffc5}', '\u{ffe4}'];

/// A row holding either of these is a beat count such as `| 1 e & a 2 e & a |`.
const COUNT_MARKERS: [char; 2] = ['&', '+'];

pub fn normalize_lines(text: &str) -> Vec<String> {
    let text: String = text
        .chars()
        .map(|c| {
            if DIVIDER_LOOKALIKES.contains(&c) {
                DIVIDER
            } else {
                c
            }
        })
        .collect();

    text.lines()
        .map(str::trim_end)
        .map(|line| {
            if is_count_row(line) {
                String::new()
            } else {
                line.to_string()
            }
        })
        .collect()
}

fn is_count_row(line: &str) -> bool {
    line.contains(COUNT_MARKERS)
}
