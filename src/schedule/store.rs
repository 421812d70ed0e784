//! Ordered, in-memory schedule collection.
//!
//! Entries sharing a course code are kept together: new entries are inserted
//! right after the last entry of the same course, and edits re-insert.
//! Group header rows are anchored before an entry index and move with the
//! entries around them.
use crate::schedule::columns::ColumnMap;
use crate::schedule::columns::Field;
use crate::schedule::entry::GroupRow;
use crate::schedule::entry::ScheduleEntry;
use crate::schedule::ScheduleError;
use std::collections::HashSet;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleStore {
    columns: ColumnMap,
    entries: Vec<ScheduleEntry>,
    /// Sorted by `before`
    group_rows: Vec<GroupRow>,
}

/// Read-only view of a store at one point in time.
#[derive(Copy, Clone, Debug)]
pub struct Snapshot<'a> {
    pub columns: &'a ColumnMap,
    pub entries: &'a [ScheduleEntry],
}

impl<'a> Snapshot<'a> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'a, ScheduleEntry> {
        self.entries.iter()
    }
}

impl ScheduleStore {
    pub fn new(columns: ColumnMap, entries: Vec<ScheduleEntry>) -> Self {
        ScheduleStore {
            columns,
            entries,
            group_rows: Vec::new(),
        }
    }

    /// Attaches group header rows. Anchors past the last entry are clamped to the end.
    pub fn with_group_rows(mut self, mut group_rows: Vec<GroupRow>) -> Self {
        let len = self.entries.len();
        for row in &mut group_rows {
            row.before = row.before.min(len);
        }
        group_rows.sort_by_key(|row| row.before);
        self.group_rows = group_rows;
        self
    }

    pub fn group_rows(&self) -> &[GroupRow] {
        &self.group_rows
    }

    pub fn columns(&self) -> &ColumnMap {
        &self.columns
    }

    pub fn headers(&self) -> &[String] {
        self.columns.headers()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ScheduleEntry> {
        self.entries.get(index)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            columns: &self.columns,
            entries: &self.entries,
        }
    }

    /// Index of the first entry matching the identity.
    pub fn position(&self, identity: &ScheduleEntry) -> Option<usize> {
        self.entries.iter().position(|entry| entry.matches(identity))
    }

    /// Index after the last entry with the same trimmed course code, or the end.
    fn insertion_point(&self, entry: &ScheduleEntry) -> usize {
        let code = self.columns.trimmed(entry, Field::CourseCode);
        self.entries
            .iter()
            .rposition(|existing| self.columns.trimmed(existing, Field::CourseCode) == code)
            .map(|index| index + 1)
            .unwrap_or(self.entries.len())
    }

    /// Inserts an entry next to its course and returns its index.
    pub fn add(&mut self, entry: ScheduleEntry) -> Result<usize, ScheduleError> {
        self.columns.check_width(&entry)?;
        let index = self.insertion_point(&entry);
        tracing::debug!(
            index,
            course_code = %self.columns.trimmed(&entry, Field::CourseCode),
            "Added schedule"
        );
        self.insert_at(index, entry);
        Ok(index)
    }

    /// Replaces the entry matching `old` and returns the new entry's index.
    pub fn edit(&mut self, old: &ScheduleEntry, new: ScheduleEntry) -> Result<usize, ScheduleError> {
        self.columns.check_width(&new)?;
        let index = self.position(old).ok_or_else(|| ScheduleError::not_found(old))?;
        self.remove_at(index);
        tracing::debug!(index, "Removed schedule for edit");
        self.add(new)
    }

    /// Removes the first entry matching the identity and returns it.
    pub fn delete(&mut self, identity: &ScheduleEntry) -> Result<ScheduleEntry, ScheduleError> {
        let index = self.position(identity).ok_or_else(|| ScheduleError::not_found(identity))?;
        tracing::debug!(index, "Deleted schedule");
        Ok(self.remove_at(index))
    }

    /// Inserts at `index`. A group row anchored at `index` moves below the new
    /// entry, so the entry joins the group above it.
    fn insert_at(&mut self, index: usize, entry: ScheduleEntry) {
        self.entries.insert(index, entry);
        for row in self.group_rows.iter_mut().filter(|row| row.before >= index) {
            row.before += 1;
        }
    }

    fn remove_at(&mut self, index: usize) -> ScheduleEntry {
        for row in self.group_rows.iter_mut().filter(|row| row.before > index) {
            row.before -= 1;
        }
        self.entries.remove(index)
    }

    /// Removes two entries by index, lowest first so the other index stays valid.
    pub(crate) fn remove_pair(&mut self, first: usize, second: usize) -> (ScheduleEntry, ScheduleEntry) {
        let (low, high) = if first < second { (first, second) } else { (second, first) };
        let removed_high = self.remove_at(high);
        let removed_low = self.remove_at(low);
        if first < second {
            (removed_low, removed_high)
        } else {
            (removed_high, removed_low)
        }
    }

    /// True when entries of every course code form one unbroken run.
    pub fn is_contiguous(&self) -> bool {
        let mut finished = HashSet::new();
        let mut current: Option<&str> = None;
        for entry in &self.entries {
            let code = self.columns.trimmed(entry, Field::CourseCode);
            if current == Some(code) {
                continue;
            }
            if let Some(previous) = current {
                finished.insert(previous);
            }
            if finished.contains(code) {
                return false;
            }
            current = Some(code);
        }
        true
    }
}
