//! Repeated sections: how many columns an annotation covers and how often they play.

use crate::grid::TabGrid;
use crate::normalize::DIVIDER;

/// Characters padding a repeat annotation such as `|----4x----|`.
const FILL_CHARACTERS: [char; 4] = ['=', '-', '_', ' '];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatSpan {
    /// Number of columns between the opening divider and the closing one.
    pub width: usize,
    pub count: u32,
}

/// Resolves the section opened by the divider at `column` on `lane_row`, reading
/// the annotation text from `annotation_row`.
///
/// The width comes from the annotation's own closing divider. When the annotation
/// stops before one (it is shorter than the bar), the lanes' next divider is used.
/// Returns `None` when neither row has a further divider.
pub fn resolve(
    grid: &TabGrid,
    annotation_row: usize,
    lane_row: usize,
    column: usize,
) -> Option<RepeatSpan> {
    let line = grid.line(annotation_row);
    let tail: String = line.chars().skip(column + 1).collect();
    let (text, closed) = match tail.split_once(DIVIDER) {
        Some((text, _)) => (text, true),
        None => (tail.as_str(), false),
    };

    let annotated_width = text.chars().count();
    let width = if closed && annotated_width > 0 {
        annotated_width
    } else {
        grid.find_divider_column(column + 1, lane_row)? - column - 1
    };

    Some(RepeatSpan {
        width,
        count: parse_repeat_count(text),
    })
}

/// Reads the play count out of annotation text like `---4x---`, `x3` or `repeat 2x`.
///
/// No digits means the section plays once. `1x` means "repeat once more", so
/// it plays twice.
pub fn parse_repeat_count(text: &str) -> u32 {
    let digits =
        text.trim_matches(|c: char| FILL_CHARACTERS.contains(&c) || c.is_ascii_alphabetic());
    if digits.is_empty() {
        return 1;
    }
    match digits.parse::<u32>() {
        Ok(1) => 2,
        Ok(count) => count,
        Err(_) => {
            log::warn!("Ignoring unreadable repeat count \"{}\"", text.trim());
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repeat_count() {
        assert_eq!(parse_repeat_count("-------4x-------"), 4);
        assert_eq!(parse_repeat_count("___x3___"), 3);
        assert_eq!(parse_repeat_count("== repeat 12x =="), 12);
        assert_eq!(parse_repeat_count("--2 times--"), 2);
        assert_eq!(parse_repeat_count("----------------"), 1);
        assert_eq!(parse_repeat_count(""), 1);
        assert_eq!(parse_repeat_count("--0x--"), 0);
    }

    #[test]
    fn test_one_x_plays_twice() {
        assert_eq!(parse_repeat_count("---1x---"), 2);
        assert_eq!(parse_repeat_count("x1"), 2);
    }

    #[test]
    fn test_unreadable_count_plays_once() {
        assert_eq!(parse_repeat_count("--(4x)--"), 1);
        assert_eq!(parse_repeat_count("--4 or 5x--"), 1);
        assert_eq!(parse_repeat_count("99999999999x"), 1);
    }

    #[test]
    fn test_resolve_from_annotation() {
        let grid = TabGrid::parse("  |---2x---|---3x---|\nHH|x-x-x-x-|x-x-x-x-|");
        assert_eq!(
            resolve(&grid, 0, 1, 2),
            Some(RepeatSpan { width: 8, count: 2 })
        );
        assert_eq!(
            resolve(&grid, 0, 1, 11),
            Some(RepeatSpan { width: 8, count: 3 })
        );
    }

    #[test]
    fn test_resolve_spanning_two_bars() {
        let grid = TabGrid::parse("  |--------2x-------|\nHH|x-x-x-x-|x-x-x-x-|");
        assert_eq!(
            resolve(&grid, 0, 1, 2),
            Some(RepeatSpan {
                width: 17,
                count: 2
            })
        );
    }

    #[test]
    fn test_resolve_short_annotation_uses_lanes() {
        let grid = TabGrid::parse("  |4x\nHH|x-x-x-x-|x-x-x-x-|");
        assert_eq!(
            resolve(&grid, 0, 1, 2),
            Some(RepeatSpan { width: 8, count: 4 })
        );
        // annotation ends before the second bar
        assert_eq!(
            resolve(&grid, 0, 1, 11),
            Some(RepeatSpan { width: 8, count: 1 })
        );
        assert_eq!(resolve(&grid, 0, 1, 20), None);
    }
}
