use std::fmt;

/// One data row of the schedule: positional text fields, one per header column.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScheduleEntry {
    fields: Vec<String>,
    /// Group label was copied from the preceding group header row
    inherits_group: bool,
}

/// A group header row (a college name alone in the first column), kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupRow {
    /// Index of the entry this row precedes; the entry count for trailing rows
    pub before: usize,
    /// Cells of the row as read from the sheet
    pub cells: Vec<String>,
}

impl GroupRow {
    /// Trimmed group label in the first cell.
    pub fn label(&self) -> &str {
        self.cells.first().map(|cell| cell.trim()).unwrap_or("")
    }
}

/// Trimmed room, day and times of one slot of an entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Meeting<'a> {
    pub room: &'a str,
    pub day: &'a str,
    pub begin: &'a str,
    pub end: &'a str,
}

impl ScheduleEntry {
    pub fn new(fields: Vec<String>) -> Self {
        ScheduleEntry {
            fields,
            inherits_group: false,
        }
    }

    /// An entry of `width` empty fields.
    pub fn blank(width: usize) -> Self {
        ScheduleEntry::new(vec![String::new(); width])
    }

    /// True when the group label came from a group header row rather than the
    /// entry's own cell. Such labels are written back as an empty cell.
    pub fn inherits_group(&self) -> bool {
        self.inherits_group
    }

    /// Fills the group field at `index` with the label of the enclosing group header.
    pub(crate) fn inherit_group(&mut self, index: usize, label: &str) {
        self.set(index, label.to_owned());
        self.inherits_group = true;
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<String> {
        self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True if every field is empty after trimming.
    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|field| field.trim().is_empty())
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    pub(crate) fn set(&mut self, index: usize, value: String) {
        if let Some(field) = self.fields.get_mut(index) {
            *field = value;
        }
    }

    /// Identity match: same width and field-wise equal once whitespace is trimmed.
    pub fn matches(&self, other: &ScheduleEntry) -> bool {
        self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .zip(&other.fields)
                .all(|(left, right)| left.trim() == right.trim())
    }
}

impl From<Vec<String>> for ScheduleEntry {
    fn from(fields: Vec<String>) -> Self {
        ScheduleEntry::new(fields)
    }
}

impl<S: Into<String>> FromIterator<S> for ScheduleEntry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        ScheduleEntry::new(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for ScheduleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.fields.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_ignores_surrounding_whitespace() {
        let stored: ScheduleEntry = ["CS101", " Alice ", "900"].into_iter().collect();
        let typed: ScheduleEntry = ["CS101 ", "Alice", "900"].into_iter().collect();
        assert!(stored.matches(&typed));
        assert_ne!(stored, typed);
    }

    #[test]
    fn identity_requires_same_width_and_text() {
        let entry: ScheduleEntry = ["CS101", "900"].into_iter().collect();
        let wider: ScheduleEntry = ["CS101", "900", ""].into_iter().collect();
        let number: ScheduleEntry = ["CS101", "900.0"].into_iter().collect();
        assert!(!entry.matches(&wider));
        assert!(!entry.matches(&number));
    }

    #[test]
    fn inherited_group_is_not_part_of_identity() {
        let own: ScheduleEntry = ["Engineering", "CS101"].into_iter().collect();
        let mut inherited: ScheduleEntry = ["", "CS101"].into_iter().collect();
        inherited.inherit_group(0, "Engineering");
        assert!(inherited.inherits_group());
        assert!(!own.inherits_group());
        assert!(own.matches(&inherited));
    }

    #[test]
    fn group_row_label_is_trimmed() {
        let row = GroupRow { before: 0, cells: vec![" Science ".to_owned(), "notes".to_owned()] };
        assert_eq!(row.label(), "Science");
        assert_eq!(GroupRow { before: 0, cells: Vec::new() }.label(), "");
    }

    #[test]
    fn blank_entries() {
        assert!(ScheduleEntry::blank(3).is_blank());
        let mut entry = ScheduleEntry::blank(3);
        entry.set(1, "x".to_owned());
        entry.set(7, "ignored".to_owned());
        assert_eq!(entry.fields(), ["", "x", ""]);
        assert_eq!(entry.to_string(), "[, x, ]");
    }
}
