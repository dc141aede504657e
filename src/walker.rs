//! Replays the analyzed layout as a time-ordered stream of strike events.

use crate::BeatTime;
use crate::grid::TabGrid;
use crate::layout::{BarGroup, Layout};
use crate::normalize::DIVIDER;
use crate::repetition::{self, RepeatSpan};
use crate::types::strike_event::StrikeEvent;
use std::collections::VecDeque;
use std::iter::FusedIterator;

/// Cells holding one of these produce no event.
const SILENT: [char; 4] = ['-', '_', '=', ' '];

/// Columns between two dividers, played `count` times.
#[derive(Debug, Clone, Copy)]
struct Section {
    column: usize,
    width: usize,
    count: u32,
    pass: u32,
    offset: usize,
}

/// Lazy walk over every strike of a tab.
///
/// Events come out column by column, lanes top to bottom within a column. The
/// clock advances one duration unit per time column, whether or not any lane
/// strikes in it.
pub struct NoteWalker<'a> {
    grid: &'a TabGrid,
    layout: &'a Layout,
    ignore_repetition: bool,
    time: BeatTime,
    group: usize,
    column: Option<usize>,
    section: Option<Section>,
    pending: VecDeque<StrikeEvent>,
}

impl<'a> NoteWalker<'a> {
    pub fn new(grid: &'a TabGrid, layout: &'a Layout, ignore_repetition: bool) -> Self {
        Self {
            grid,
            layout,
            ignore_repetition,
            time: BeatTime::zero(),
            group: 0,
            column: None,
            section: None,
            pending: VecDeque::new(),
        }
    }

    /// Clock position after the columns walked so far.
    pub fn time(&self) -> BeatTime {
        self.time
    }

    fn open_section(&self, group: &BarGroup, column: usize) -> Option<Section> {
        let grid = self.grid;
        if column + 1 >= grid.row_len(group.lane_row) {
            return None;
        }
        let span = match group.annotation_row {
            Some(annotation_row) if !self.ignore_repetition => {
                repetition::resolve(grid, annotation_row, group.lane_row, column)?
            }
            _ => {
                let next = grid.find_divider_column(column + 1, group.lane_row)?;
                RepeatSpan {
                    width: next - column - 1,
                    count: 1,
                }
            }
        };
        log::debug!(
            "Bar group at line {}: {} columns from column {}, played {} time(s)",
            group.start_row() + 1,
            span.width,
            column + 1,
            span.count
        );
        Some(Section {
            column,
            width: span.width,
            count: span.count,
            pass: 0,
            offset: 1,
        })
    }

    fn next_group(&mut self) {
        self.group += 1;
        self.column = None;
        self.section = None;
    }

    /// Moves to the next time column and queues its events.
    /// Returns false once every bar group has been walked.
    fn advance(&mut self) -> bool {
        let layout = self.layout;
        loop {
            let Some(group) = layout.groups.get(self.group) else {
                return false;
            };

            let mut section = match self.section {
                Some(section) => section,
                None => {
                    let column = self
                        .column
                        .unwrap_or_else(|| group.start_column(self.grid, layout.divisions));
                    match self.open_section(group, column) {
                        Some(section) => section,
                        None => {
                            self.next_group();
                            continue;
                        }
                    }
                }
            };

            if section.pass >= section.count {
                let next = section.column + section.width + 1;
                self.section = None;
                if self.grid.is_divider_column(next, group.lane_row) {
                    self.column = Some(next);
                } else {
                    self.next_group();
                }
                continue;
            }

            if section.offset > section.width {
                section.pass += 1;
                section.offset = 1;
                self.section = Some(section);
                continue;
            }

            let column = section.column + section.offset;
            section.offset += 1;
            self.section = Some(section);

            if self.grid.is_divider_column(column, group.lane_row) {
                continue;
            }
            self.play_column(group, column);
            return true;
        }
    }

    fn play_column(&mut self, group: &BarGroup, column: usize) {
        for lane in &group.lanes {
            // short rows are silent past their end
            let Some(strike) = self.grid.char_at(lane.row, column) else {
                continue;
            };
            if strike == DIVIDER || SILENT.contains(&strike) {
                continue;
            }
            self.pending
                .push_back(StrikeEvent::new(lane.label.as_str(), strike, self.time));
        }
        self.time = self.time + self.layout.duration;
    }
}

impl Iterator for NoteWalker<'_> {
    type Item = StrikeEvent;

    fn next(&mut self) -> Option<StrikeEvent> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }
            if !self.advance() {
                return None;
            }
        }
    }
}

impl FusedIterator for NoteWalker<'_> {}
