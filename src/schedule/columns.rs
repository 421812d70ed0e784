//! Named column roles and their mapping onto sheet columns.
use crate::schedule::entry::Meeting;
use crate::schedule::entry::ScheduleEntry;
use crate::schedule::FormatError;
use crate::schedule::ParseError;
use crate::spreadsheet::reference::index_to_col;
use std::fmt;

/// Column roles inspected by the schedule logic. Other columns are passed through.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    GroupLabel,
    Takers,
    CourseCode,
    CourseTitle,
    OfferedTo,
    RoomA,
    DayA,
    BeginA,
    EndA,
    RoomB,
    DayB,
    BeginB,
    EndB,
    Capacity,
}

impl Field {
    /// Every role, in default column order.
    pub const ALL: [Field; 14] = [
        Field::GroupLabel,
        Field::Takers,
        Field::CourseCode,
        Field::CourseTitle,
        Field::OfferedTo,
        Field::RoomA,
        Field::DayA,
        Field::BeginA,
        Field::EndA,
        Field::RoomB,
        Field::DayB,
        Field::BeginB,
        Field::EndB,
        Field::Capacity,
    ];

    /// Configuration name of the role (`course_code`, `room_a`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Field::GroupLabel => "group",
            Field::Takers => "takers",
            Field::CourseCode => "course_code",
            Field::CourseTitle => "course_title",
            Field::OfferedTo => "offered_to",
            Field::RoomA => "room_a",
            Field::DayA => "day_a",
            Field::BeginA => "begin_a",
            Field::EndA => "end_a",
            Field::RoomB => "room_b",
            Field::DayB => "day_b",
            Field::BeginB => "begin_b",
            Field::EndB => "end_b",
            Field::Capacity => "capacity",
        }
    }

    /// Looks a role up by its configuration name, ignoring case and `-`/`_`.
    pub fn parse(name: &str) -> Option<Field> {
        let name = name.trim().to_ascii_lowercase().replace('-', "_");
        Field::ALL.into_iter().find(|field| field.as_str() == name)
    }

    fn position(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the two independent room/day/time assignments of an entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    A,
    B,
}

impl Slot {
    pub const ALL: [Slot; 2] = [Slot::A, Slot::B];

    /// The room, day, begin and end roles of this slot.
    pub fn fields(self) -> [Field; 4] {
        match self {
            Slot::A => [Field::RoomA, Field::DayA, Field::BeginA, Field::EndA],
            Slot::B => [Field::RoomB, Field::DayB, Field::BeginB, Field::EndB],
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::A => f.write_str("slot A"),
            Slot::B => f.write_str("slot B"),
        }
    }
}

/// Role to 0-based column index assignment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ColumnLayout {
    indexes: [usize; 14],
}

impl Default for ColumnLayout {
    /// Group 0, takers 1, code 2, title 3, offered-to 4, slot A 5..=8,
    /// slot B 11..=14 and capacity 15.
    fn default() -> Self {
        ColumnLayout {
            indexes: [0, 1, 2, 3, 4, 5, 6, 7, 8, 11, 12, 13, 14, 15],
        }
    }
}

impl ColumnLayout {
    /// Column index assigned to the role.
    pub fn index(&self, field: Field) -> usize {
        self.indexes[field.position()]
    }

    /// Assigns a role to a column index.
    pub fn set(&mut self, field: Field, index: usize) {
        self.indexes[field.position()] = index;
    }

    /// Builder-style variant of [`ColumnLayout::set`].
    pub fn with(mut self, field: Field, index: usize) -> Self {
        self.set(field, index);
        self
    }

    /// Checks every role against a header of `width` columns.
    pub fn validate(&self, width: usize) -> Result<(), FormatError> {
        for field in Field::ALL {
            let index = self.index(field);
            if index >= width {
                return Err(FormatError::ColumnOutOfRange { field, index, width });
            }
        }
        Ok(())
    }
}

/// Header labels plus a validated layout. The only place that turns roles into offsets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnMap {
    headers: Vec<String>,
    layout: ColumnLayout,
}

impl ColumnMap {
    /// Builds the mapping, failing if any role lies outside the header.
    pub fn new(headers: Vec<String>, layout: ColumnLayout) -> Result<Self, FormatError> {
        layout.validate(headers.len())?;
        Ok(ColumnMap { headers, layout })
    }

    /// Number of header columns, which is also the width of every entry.
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    pub fn index(&self, field: Field) -> usize {
        self.layout.index(field)
    }

    /// Header label of the role's column, falling back to the column letter.
    pub fn label(&self, field: Field) -> String {
        let index = self.index(field);
        match self.headers.get(index) {
            Some(label) if !label.is_empty() => label.to_owned(),
            _ => index_to_col(index),
        }
    }

    /// Checks that an entry has one field per header column.
    pub fn check_width(&self, entry: &ScheduleEntry) -> Result<(), FormatError> {
        if entry.len() == self.len() {
            Ok(())
        } else {
            Err(FormatError::EntryWidth {
                expected: self.len(),
                actual: entry.len(),
            })
        }
    }

    /// Raw value of a role; empty when the entry is too short.
    pub fn get<'a>(&self, entry: &'a ScheduleEntry, field: Field) -> &'a str {
        entry.get(self.index(field)).unwrap_or("")
    }

    /// Trimmed value of a role.
    pub fn trimmed<'a>(&self, entry: &'a ScheduleEntry, field: Field) -> &'a str {
        self.get(entry, field).trim()
    }

    /// Overwrites a role; out of range indexes are ignored.
    pub fn set(&self, entry: &mut ScheduleEntry, field: Field, value: impl Into<String>) {
        entry.set(self.index(field), value.into());
    }

    /// Trimmed room, day and times of one slot.
    pub fn meeting<'a>(&self, entry: &'a ScheduleEntry, slot: Slot) -> Meeting<'a> {
        let [room, day, begin, end] = slot.fields().map(|field| self.trimmed(entry, field));
        Meeting { room, day, begin, end }
    }

    /// Parses a role as an integer.
    pub fn integer(&self, entry: &ScheduleEntry, field: Field) -> Result<i64, ParseError> {
        let value = self.trimmed(entry, field);
        value.parse::<i64>().map_err(|_| ParseError {
            field,
            value: value.to_owned(),
        })
    }

    /// Parses a role as a finite decimal number.
    pub fn decimal(&self, entry: &ScheduleEntry, field: Field) -> Result<f64, ParseError> {
        let value = self.trimmed(entry, field);
        value
            .parse::<f64>()
            .ok()
            .filter(|number| number.is_finite())
            .ok_or_else(|| ParseError {
                field,
                value: value.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn headers(width: usize) -> Vec<String> {
        (0..width).map(|index| format!("H{index}")).collect()
    }

    #[test]
    fn field_names_parse_back() {
        for field in Field::ALL {
            assert_eq!(Field::parse(field.as_str()), Some(field));
        }
        assert_eq!(Field::parse("Course-Code"), Some(Field::CourseCode));
        assert_eq!(Field::parse("room"), None);
    }

    #[test]
    fn default_layout_matches_sheet() {
        let layout = ColumnLayout::default();
        assert_eq!(layout.index(Field::GroupLabel), 0);
        assert_eq!(layout.index(Field::CourseCode), 2);
        assert_eq!(Slot::A.fields().map(|field| layout.index(field)), [5, 6, 7, 8]);
        assert_eq!(Slot::B.fields().map(|field| layout.index(field)), [11, 12, 13, 14]);
        assert_eq!(layout.index(Field::Capacity), 15);
    }

    #[test]
    fn narrow_header_is_rejected() {
        assert_matches!(
            ColumnMap::new(headers(15), ColumnLayout::default()),
            Err(FormatError::ColumnOutOfRange { field: Field::Capacity, index: 15, width: 15 })
        );
        let layout = ColumnLayout::default().with(Field::Capacity, 9);
        assert!(ColumnMap::new(headers(15), layout).is_ok());
    }

    #[test]
    fn values_are_read_by_role() -> Result<(), FormatError> {
        let columns = ColumnMap::new(headers(16), ColumnLayout::default())?;
        let mut entry = ScheduleEntry::blank(16);
        columns.set(&mut entry, Field::RoomB, " 204 ");
        columns.set(&mut entry, Field::BeginB, "1300");
        columns.set(&mut entry, Field::Capacity, "12.5");

        let meeting = columns.meeting(&entry, Slot::B);
        assert_eq!(meeting.room, "204");
        assert_eq!(meeting.begin, "1300");
        assert_eq!(columns.integer(&entry, Field::BeginB), Ok(1300));
        assert_eq!(columns.decimal(&entry, Field::Capacity), Ok(12.5));
        assert_eq!(
            columns.integer(&entry, Field::EndB),
            Err(ParseError { field: Field::EndB, value: String::new() })
        );
        assert_eq!(columns.label(Field::Capacity), "H15");
        Ok(())
    }

    #[test]
    fn infinite_capacity_is_not_a_number() -> Result<(), FormatError> {
        let columns = ColumnMap::new(headers(16), ColumnLayout::default())?;
        let mut entry = ScheduleEntry::blank(16);
        columns.set(&mut entry, Field::Capacity, "inf");
        assert!(columns.decimal(&entry, Field::Capacity).is_err());
        Ok(())
    }
}
