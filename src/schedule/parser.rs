//! Grid to schedule entries.
//!
//! A schedule sheet is laid out as a free-form preamble, a header row with the
//! column labels, then data rows interleaved with group header rows such as a
//! college name alone in the first column:
//!
//! ```text
//! row 0..2   preamble (title, term, notes)
//! row 3      header labels
//! row 4      College of Engineering            <- group header
//! row 5      | CS1 | CS101 | Intro | ... | 101 | Mon | 900 | 1000 | ...
//! ```
use crate::config::ScheduleConfig;
use crate::helpers::string::is_blank;
use crate::schedule::columns::ColumnMap;
use crate::schedule::columns::Field;
use crate::schedule::entry::GroupRow;
use crate::schedule::entry::ScheduleEntry;
use crate::schedule::FormatError;
use crate::spreadsheet::Grid;

/// Group headers carry fewer than this many non-empty cells.
const GROUP_HEADER_MAX_CELLS: usize = 3;

/// Result of parsing a schedule grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedSheet {
    /// Rows up to and including the header row, verbatim
    pub preamble: Grid,
    /// Header labels with the resolved column layout
    pub columns: ColumnMap,
    /// Data rows in sheet order
    pub entries: Vec<ScheduleEntry>,
    /// Group header rows, positioned relative to the entries
    pub group_rows: Vec<GroupRow>,
}

/// Kind of a row following the header.
#[derive(Debug, PartialEq, Eq)]
enum RowKind<'a> {
    GroupHeader(&'a str),
    Empty,
    Data,
}

fn classify(row: &[String]) -> RowKind<'_> {
    let filled = row.iter().filter(|cell| !is_blank(cell)).count();
    match row.first() {
        _ if filled == 0 => RowKind::Empty,
        Some(first) if filled < GROUP_HEADER_MAX_CELLS && !is_blank(first) => RowKind::GroupHeader(first.trim()),
        _ => RowKind::Data,
    }
}

/// Splits a grid into preamble, header labels and typed entries.
///
/// Data rows whose group field is empty inherit the label of the nearest
/// preceding group header. Group header rows are kept as they are.
pub fn parse(grid: &[Vec<String>], config: &ScheduleConfig) -> Result<ParsedSheet, FormatError> {
    let header_row = config.header_row;
    if grid.len() <= header_row {
        return Err(FormatError::MissingHeaderRow {
            rows: grid.len(),
            header_row,
        });
    }

    let headers: Vec<String> = grid[header_row].iter().map(|label| label.trim().to_owned()).collect();
    let columns = ColumnMap::new(headers, config.layout)?;
    let group_index = columns.index(Field::GroupLabel);

    let mut group = String::new();
    let mut group_rows = Vec::new();
    let mut entries = Vec::with_capacity(grid.len() - header_row - 1);
    for (row_index, row) in grid.iter().enumerate().skip(header_row + 1) {
        let kind = classify(row);
        match kind {
            RowKind::GroupHeader(label) => {
                tracing::debug!(row = row_index, group = %label, "Found group header");
                group = label.to_owned();
                group_rows.push(GroupRow {
                    before: entries.len(),
                    cells: row.clone(),
                });
                continue;
            }
            RowKind::Empty if config.skip_empty_rows => continue,
            RowKind::Empty | RowKind::Data => {}
        }

        if row.len() != columns.len() {
            return Err(FormatError::ColumnCountMismatch {
                row: row_index,
                expected: columns.len(),
                actual: row.len(),
            });
        }
        let mut entry = ScheduleEntry::new(row.clone());
        if entry.get(group_index).map(is_blank).unwrap_or(false) {
            entry.inherit_group(group_index, &group);
        }
        entries.push(entry);
    }

    tracing::info!(
        columns = columns.len(),
        entries = entries.len(),
        groups = group_rows.len(),
        "Parsed schedule sheet"
    );
    Ok(ParsedSheet {
        preamble: grid[..=header_row].to_vec(),
        columns,
        entries,
        group_rows,
    })
}
