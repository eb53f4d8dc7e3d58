//! Loader errors.

use thiserror::Error;

/// Syntax errors in a text layout.
///
/// Only the shape of the text is checked. A layout that parses may still
/// describe an odd building (walls without mirrors, entrances mid-board).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScenarioError {
    #[error("expected {expected} wall rows, found {found}")]
    MissingWallRows { expected: u32, found: u32 },

    #[error("wall row {row}: expected {expected} masks, found {found}")]
    RowWidth { row: u32, expected: u32, found: u32 },

    #[error("wall row {row}, column {column}: malformed mask {mask:?}")]
    MalformedMask { row: u32, column: u32, mask: String },

    #[error("line {line}: coordinate {value:?} is not a 1-based number")]
    BadCoordinate { line: usize, value: String },

    #[error("line {line}: unexpected content {content:?}")]
    UnexpectedLine { line: usize, content: String },
}
