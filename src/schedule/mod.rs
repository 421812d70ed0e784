//! # Course Schedule Model
//!
//! The typed view over a schedule grid: the named column mapping, entries,
//! the parser that turns grid rows into entries, the ordered store with its
//! course-code contiguity rule, conflict detection and section merging.
use thiserror::Error;

pub mod book;
pub mod columns;
pub mod conflict;
pub mod entry;
pub mod merge;
pub mod parser;
pub mod store;

pub use book::ScheduleBook;
pub use columns::{ColumnLayout, ColumnMap, Field, Slot};
pub use conflict::{find_conflicts, Conflict, ConflictReport, SkippedComparison};
pub use entry::{GroupRow, Meeting, ScheduleEntry};
pub use merge::{apply_merge, merge, merge_suggestions};
pub use parser::{parse, ParsedSheet};
pub use store::{ScheduleStore, Snapshot};

/// Malformed grid or entry shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The grid is too short to contain the header row
    #[error("Sheet has {rows} rows, the header is expected at row {header_row}")]
    MissingHeaderRow { rows: usize, header_row: usize },

    /// A data row does not have one cell per header column
    #[error("Row {row} has {actual} columns, the header has {expected}")]
    ColumnCountMismatch { row: usize, expected: usize, actual: usize },

    /// An entry does not have one field per header column
    #[error("Schedule has {actual} fields, the header has {expected}")]
    EntryWidth { expected: usize, actual: usize },

    /// A named column points outside the header
    #[error("Column '{field}' at index {index} is outside the {width}-column header")]
    ColumnOutOfRange { field: Field, index: usize, width: usize },
}

/// A time or capacity value that is not a number.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Cannot parse {field} value '{value}' as a number")]
pub struct ParseError {
    pub field: Field,
    pub value: String,
}

/// Reasons two schedules cannot be merged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    #[error("Cannot merge schedules with different course codes '{0}' and '{1}'")]
    CourseCodeMismatch(String, String),

    #[error("Merged schedule has {actual} columns, the sheet has {expected}")]
    ColumnCountMismatch { expected: usize, actual: usize },

    #[error("{0}")]
    Capacity(#[from] ParseError),
}

/// Errors returned by schedule operations. All of them are recoverable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid schedule sheet: {0}")]
    Format(#[from] FormatError),

    #[error("No schedule matches [{0}]")]
    NotFound(String),

    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("Merge failed: {0}")]
    Merge(#[from] MergeError),
}

impl ScheduleError {
    /// Builds a `NotFound` error describing the entry that was looked up.
    pub(crate) fn not_found(entry: &ScheduleEntry) -> Self {
        ScheduleError::NotFound(entry.fields().join(", "))
    }
}
