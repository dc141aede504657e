//! Character grid over the normalized lines, addressed by (row, column) in chars.

use crate::normalize::{DIVIDER, normalize_lines};

/// Characters stripped from the end of a lane label, as in `HH:` or `S--`.
const LABEL_SEPARATORS: [char; 3] = [' ', ':', '-'];

#[derive(Debug, Clone)]
pub struct TabGrid {
    lines: Vec<String>,
    cells: Vec<Vec<char>>,
}

impl TabGrid {
    pub fn parse(text: &str) -> Self {
        Self::from_lines(normalize_lines(text))
    }

    pub fn from_lines(lines: Vec<String>) -> Self {
        let cells = lines.iter().map(|line| line.chars().collect()).collect();
        Self { lines, cells }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line(&self, row: usize) -> &str {
        self.lines.get(row).map_or("", String::as_str)
    }

    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    pub fn row_len(&self, row: usize) -> usize {
        self.cells.get(row).map_or(0, Vec::len)
    }

    pub fn char_at(&self, row: usize, column: usize) -> Option<char> {
        self.cells.get(row)?.get(column).copied()
    }

    pub fn has_divider(&self, row: usize) -> bool {
        self.cells
            .get(row)
            .is_some_and(|cells| cells.contains(&DIVIDER))
    }

    pub fn is_blank(&self, row: usize) -> bool {
        self.line(row).trim().is_empty()
    }

    /// True if `column` holds a divider on `start_row` that continues straight down.
    ///
    /// Scanning stops without failing at the first row that is blank, too short, or
    /// has a space at `column`. Any other non-divider character before that stop
    /// means the divider on `start_row` is part of the note data.
    pub fn is_divider_column(&self, column: usize, start_row: usize) -> bool {
        if self.char_at(start_row, column) != Some(DIVIDER) {
            return false;
        }
        for row in start_row..self.row_count() {
            let cell = match self.char_at(row, column) {
                Some(cell) if cell != ' ' && !self.is_blank(row) => cell,
                _ => break,
            };
            if cell != DIVIDER {
                return false;
            }
        }
        true
    }

    /// First divider column on or after `start_column` in `row`.
    pub fn find_divider_column(&self, start_column: usize, row: usize) -> Option<usize> {
        (start_column..self.row_len(row)).find(|&column| self.is_divider_column(column, row))
    }

    /// Lane label: first word before the first divider, separators trimmed.
    pub fn note_label(&self, row: usize) -> &str {
        let line = self.line(row);
        let head = line.split(DIVIDER).next().unwrap_or("");
        head.split_whitespace()
            .next()
            .unwrap_or("")
            .trim_end_matches(LABEL_SEPARATORS)
    }
}
