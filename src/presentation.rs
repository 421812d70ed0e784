//! # Presentation Adapter
//!
//! Contracts between the schedule model and whatever front end drives it.
//! Rendering adds one blank leading display column and marks group
//! boundaries; input goes through a [`FieldPrompter`] and reaches the model
//! only as a complete [`ScheduleEntry`] or not at all.
use crate::schedule::Conflict;
use crate::schedule::Field;
use crate::schedule::ScheduleEntry;
use crate::schedule::Snapshot;

/// Width of one column in fixed-width conflict listings.
pub const CONFLICT_COLUMN_WIDTH: usize = 30;

/// One rendered table row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayRow<'a> {
    /// Position of the entry in the store
    pub index: usize,
    /// Group label of the entry, trimmed
    pub group: &'a str,
    /// True on the first row of a new group label
    pub starts_group: bool,
    /// Blank display column followed by the entry fields
    pub cells: Vec<&'a str>,
}

/// Answer to one field prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PromptOutcome {
    /// Use this value
    Submit(String),
    /// Leave the field empty
    Skip,
    /// Abandon the whole entry
    Cancel,
}

/// Asks the user for one field value at a time.
pub trait FieldPrompter {
    /// Prompts for the column `label`, showing `current` as the existing value.
    fn prompt(&mut self, label: &str, current: &str) -> PromptOutcome;
}

impl<F> FieldPrompter for F
where
    F: FnMut(&str, &str) -> PromptOutcome,
{
    fn prompt(&mut self, label: &str, current: &str) -> PromptOutcome {
        self(label, current)
    }
}

/// Table headings: a blank display column, then the sheet headers.
pub fn display_headers(headers: &[String]) -> Vec<&str> {
    std::iter::once("").chain(headers.iter().map(String::as_str)).collect()
}

/// Table rows for every entry of the snapshot, in order.
pub fn display_rows<'a>(snapshot: Snapshot<'a>) -> Vec<DisplayRow<'a>> {
    let columns = snapshot.columns;
    let mut previous: Option<&str> = None;
    snapshot
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let group = columns.trimmed(entry, Field::GroupLabel);
            let starts_group = !group.is_empty() && previous != Some(group);
            previous = Some(group);
            DisplayRow {
                index,
                group,
                starts_group,
                cells: std::iter::once("").chain(entry.fields().iter().map(String::as_str)).collect(),
            }
        })
        .collect()
}

/// Collects one value per header column.
///
/// With `initial`, each prompt shows the existing value; a skipped field is
/// left empty either way. Returns `None` as soon as the user cancels.
pub fn collect_entry<P: FieldPrompter + ?Sized>(
    headers: &[String],
    initial: Option<&ScheduleEntry>,
    prompter: &mut P,
) -> Option<ScheduleEntry> {
    let mut fields = Vec::with_capacity(headers.len());
    for (index, label) in headers.iter().enumerate() {
        let current = initial.and_then(|entry| entry.get(index)).unwrap_or("");
        match prompter.prompt(label, current) {
            PromptOutcome::Submit(value) => fields.push(value),
            PromptOutcome::Skip => fields.push(String::new()),
            PromptOutcome::Cancel => {
                tracing::debug!(field = %label, "Entry input cancelled");
                return None;
            }
        }
    }
    Some(ScheduleEntry::new(fields))
}

/// Fixed-width text block for one conflict: the header line and both entries,
/// each cell padded and cut to `width` characters and joined with `" | "`.
pub fn format_conflict(headers: &[String], conflict: &Conflict<'_>, width: usize) -> Vec<String> {
    let line = |cells: &[String]| {
        cells
            .iter()
            .map(|cell| format!("{:<width$}", cell.chars().take(width).collect::<String>()))
            .collect::<Vec<_>>()
            .join(" | ")
    };
    vec![
        line(headers),
        line(conflict.first.fields()),
        line(conflict.second.fields()),
    ]
}
