//! Error types for tab parsing and conversion

use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, thiserror::Error)]
pub enum TabError {
    /// No line of the input contains a divider character.
    #[error("could not find any bars in input text")]
    NoBars,

    /// The bar layout could not be inferred; coordinates are zero-based.
    #[error("{message} ({})", location(.row, .column))]
    Structure {
        message: String,
        row: usize,
        column: Option<usize>,
    },

    #[error("some note names could not be mapped to midi notes: {}", join(.0))]
    UnmappableNoteNames(BTreeSet<String>),

    #[error("configuration error: {0}")]
    Config(String),
}

impl TabError {
    pub(crate) fn structure(message: impl Into<String>, row: usize, column: Option<usize>) -> Self {
        Self::Structure {
            message: message.into(),
            row,
            column,
        }
    }
}

struct Location {
    row: usize,
    column: Option<usize>,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}", self.row + 1)?;
        if let Some(column) = self.column {
            write!(f, ", column {}", column + 1)?;
        }
        Ok(())
    }
}

fn location(row: &usize, column: &Option<usize>) -> Location {
    Location {
        row: *row,
        column: *column,
    }
}

fn join(names: &BTreeSet<String>) -> String {
    names.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

pub type Result<T> = std::result::Result<T, TabError>;
