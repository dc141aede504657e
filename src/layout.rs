//! Structural inference: which rows form a bar group, which of them are lanes and
//! which carry annotations, and how many time columns a bar holds.

use crate::BeatTime;
use crate::error::{Result, TabError};
use crate::grid::TabGrid;
use crate::normalize::DIVIDER;
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static REPEAT_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"repeat|\|[-_=]*(\d+x|x\d+)[-_=]*\|").expect("repeat marker pattern is valid")
});

const TRIPLET_MARKER: &str = "(3)";

/// One drum voice of a bar group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lane {
    pub row: usize,
    pub label: String,
}

/// Consecutive rows sharing one set of divider columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarGroup {
    pub rows: Range<usize>,
    /// Row holding a repeat count (or no label at all) above the lanes.
    pub annotation_row: Option<usize>,
    pub lanes: Vec<Lane>,
    /// Row of the first lane; divider columns are tested from here down.
    pub lane_row: usize,
    /// First true divider column on `lane_row`.
    pub first_divider: usize,
}

impl BarGroup {
    pub fn start_row(&self) -> usize {
        self.rows.start
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.lanes.iter().map(|lane| lane.label.as_str())
    }

    /// Column the walk starts from.
    ///
    /// Normally the first divider. When a full bar of note characters sits in front
    /// of it the opening divider was left out, and the walk starts one bar earlier.
    pub fn start_column(&self, grid: &TabGrid, divisions: u32) -> usize {
        let bar_width = divisions as usize + 1;
        if self.first_divider <= bar_width {
            return self.first_divider;
        }
        let lead_in = self.first_divider - bar_width;
        let notes_before = (lead_in + 1..self.first_divider).all(|column| {
            grid.char_at(self.lane_row, column)
                .is_some_and(|c| !c.is_whitespace())
        });
        if notes_before {
            lead_in
        } else {
            self.first_divider
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub groups: Vec<BarGroup>,
    /// Time columns in the first bar, assumed for the whole document.
    pub divisions: u32,
    /// Length of one time column in quarter notes, `4 / divisions`.
    pub duration: BeatTime,
}

impl Layout {
    pub fn analyze(grid: &TabGrid) -> Result<Self> {
        let extents = segment(grid);
        if extents.is_empty() {
            return Err(TabError::NoBars);
        }

        let groups = extents
            .into_iter()
            .map(|rows| analyze_group(grid, rows))
            .collect::<Result<Vec<_>>>()?;

        let divisions = calculate_divisions(grid, &groups[0])?;
        let duration = BeatTime::from_ratio(4, divisions).ok_or_else(|| {
            TabError::structure("first bar has no time columns", groups[0].lane_row, None)
        })?;
        log::debug!(
            "Found {} bar groups with {} divisions per bar",
            groups.len(),
            divisions
        );

        Ok(Self {
            groups,
            divisions,
            duration,
        })
    }
}

fn segment(grid: &TabGrid) -> Vec<Range<usize>> {
    let mut extents = Vec::new();
    let mut row = 0;
    while row < grid.row_count() {
        if grid.has_divider(row) {
            let start = row;
            while row < grid.row_count() && (grid.has_divider(row) || is_triplet_row(grid, row)) {
                row += 1;
            }
            extents.push(start..row);
        } else {
            row += 1;
        }
    }
    extents
}

pub fn is_repetition_row(grid: &TabGrid, row: usize) -> bool {
    REPEAT_MARKER.is_match(grid.line(row)) || grid.note_label(row).is_empty()
}

pub fn is_triplet_row(grid: &TabGrid, row: usize) -> bool {
    grid.line(row).contains(TRIPLET_MARKER)
}

fn analyze_group(grid: &TabGrid, rows: Range<usize>) -> Result<BarGroup> {
    let annotation_row = is_repetition_row(grid, rows.start).then_some(rows.start);
    let search_from = rows.start + usize::from(annotation_row.is_some());

    let lane_row = (search_from..rows.end)
        .find(|&row| !is_repetition_row(grid, row) && !is_triplet_row(grid, row))
        .ok_or_else(|| TabError::structure("bar without notes", rows.start, None))?;

    let first_divider = grid
        .find_divider_column(0, lane_row)
        .ok_or_else(|| TabError::structure("could not find a vertical bar", lane_row, None))?;

    let lanes = (lane_row..rows.end)
        .take_while(|&row| grid.has_divider(row))
        .filter(|&row| !is_repetition_row(grid, row))
        .map(|row| Lane {
            row,
            label: grid.note_label(row).to_string(),
        })
        .collect::<Vec<_>>();

    check_lane_dividers(grid, lane_row, &lanes)?;

    Ok(BarGroup {
        rows,
        annotation_row,
        lanes,
        lane_row,
        first_divider,
    })
}

/// Every lane must put its dividers in the same columns as the first lane, as
/// far as both rows reach.
fn check_lane_dividers(grid: &TabGrid, lane_row: usize, lanes: &[Lane]) -> Result<()> {
    for lane in lanes.iter().filter(|lane| lane.row != lane_row) {
        let shared = grid.row_len(lane_row).min(grid.row_len(lane.row));
        let misaligned = (0..shared).find(|&column| {
            (grid.char_at(lane_row, column) == Some(DIVIDER))
                != (grid.char_at(lane.row, column) == Some(DIVIDER))
        });
        if let Some(column) = misaligned {
            return Err(TabError::structure(
                "bar lines of this lane do not line up with the lanes above",
                lane.row,
                Some(column),
            ));
        }
    }
    Ok(())
}

fn calculate_divisions(grid: &TabGrid, group: &BarGroup) -> Result<u32> {
    let row = group.lane_row;
    let start = group.first_divider;
    let end = grid.find_divider_column(start + 1, row).ok_or_else(|| {
        TabError::structure("could not find end vertical bar", row, Some(start + 1))
    })?;
    let divisions = end - start - 1;
    if divisions == 0 {
        return Err(TabError::structure(
            "first bar has no time columns",
            row,
            Some(start),
        ));
    }
    u32::try_from(divisions)
        .map_err(|_| TabError::structure("first bar is too long", row, Some(start)))
}
