//! Room and time conflict detection.
use crate::schedule::columns::ColumnMap;
use crate::schedule::columns::Field;
use crate::schedule::columns::Slot;
use crate::schedule::entry::ScheduleEntry;
use crate::schedule::store::Snapshot;
use crate::schedule::ParseError;

/// Two entries booked in the same room, on the same day, at overlapping times.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conflict<'a> {
    pub first: &'a ScheduleEntry,
    pub second: &'a ScheduleEntry,
    pub first_index: usize,
    pub second_index: usize,
    pub slot: Slot,
}

/// A same-room, same-day pair whose times could not be compared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedComparison {
    pub first_index: usize,
    pub second_index: usize,
    pub slot: Slot,
    pub error: ParseError,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConflictReport<'a> {
    /// Conflicts in scan order
    pub conflicts: Vec<Conflict<'a>>,
    /// Pairs skipped because a time is not an integer
    pub skipped: Vec<SkippedComparison>,
}

impl<'a> ConflictReport<'a> {
    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }
}

/// Outcome of checking one pair in one slot.
enum Comparison {
    Clear,
    Overlap,
    Skipped(ParseError),
}

/// Begin and end times of one slot. Two meetings overlap unless one begins
/// at or after the other ends, so meetings that only touch do not conflict.
fn interval(columns: &ColumnMap, entry: &ScheduleEntry, slot: Slot) -> Result<(i64, i64), ParseError> {
    let [_, _, begin, end] = slot.fields();
    Ok((columns.integer(entry, begin)?, columns.integer(entry, end)?))
}

fn compare(columns: &ColumnMap, first: &ScheduleEntry, second: &ScheduleEntry, slot: Slot) -> Comparison {
    let left = columns.meeting(first, slot);
    let right = columns.meeting(second, slot);
    if left.room.is_empty() || right.room.is_empty() {
        return Comparison::Clear;
    }
    if columns.trimmed(first, Field::GroupLabel).is_empty() || columns.trimmed(second, Field::GroupLabel).is_empty() {
        return Comparison::Clear;
    }
    if left.room != right.room || left.day != right.day {
        return Comparison::Clear;
    }
    let times = interval(columns, first, slot).and_then(|left| Ok((left, interval(columns, second, slot)?)));
    match times {
        Ok(((begin1, end1), (begin2, end2))) if !(begin1 >= end2 || begin2 >= end1) => Comparison::Overlap,
        Ok(_) => Comparison::Clear,
        Err(error) => Comparison::Skipped(error),
    }
}

/// Scans every pair of entries, slot A then slot B, for overlapping bookings.
pub fn find_conflicts<'a>(snapshot: Snapshot<'a>) -> ConflictReport<'a> {
    let columns = snapshot.columns;
    let entries = snapshot.entries;
    let mut report = ConflictReport::default();
    for (first_index, first) in entries.iter().enumerate() {
        for (second_index, second) in entries.iter().enumerate().skip(first_index + 1) {
            for slot in Slot::ALL {
                match compare(columns, first, second, slot) {
                    Comparison::Clear => {}
                    Comparison::Overlap => report.conflicts.push(Conflict {
                        first,
                        second,
                        first_index,
                        second_index,
                        slot,
                    }),
                    Comparison::Skipped(error) => {
                        tracing::warn!(first_index, second_index, %slot, %error, "Skipped conflict check");
                        report.skipped.push(SkippedComparison {
                            first_index,
                            second_index,
                            slot,
                            error,
                        });
                    }
                }
            }
        }
    }
    tracing::info!(
        entries = entries.len(),
        conflicts = report.conflicts.len(),
        skipped = report.skipped.len(),
        "Checked schedule conflicts"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::columns::ColumnLayout;

    const WIDTH: usize = 16;

    fn columns() -> ColumnMap {
        let headers = (0..WIDTH).map(|index| format!("H{index}")).collect();
        ColumnMap::new(headers, ColumnLayout::default()).expect("default layout fits 16 columns")
    }

    fn entry(code: &str, slot: Slot, meeting: [&str; 4]) -> ScheduleEntry {
        let columns = columns();
        let mut entry = ScheduleEntry::blank(WIDTH);
        columns.set(&mut entry, Field::GroupLabel, "Engineering");
        columns.set(&mut entry, Field::CourseCode, code);
        for (field, value) in slot.fields().into_iter().zip(meeting) {
            columns.set(&mut entry, field, value);
        }
        entry
    }

    fn pairs(report: &ConflictReport) -> Vec<(usize, usize, Slot)> {
        report.conflicts.iter().map(|conflict| (conflict.first_index, conflict.second_index, conflict.slot)).collect()
    }

    #[test]
    fn overlapping_times_conflict() {
        let columns = columns();
        let entries = vec![
            entry("X", Slot::A, ["101", "Mon", "900", "1000"]),
            entry("Y", Slot::A, [" 101", "Mon ", "930", "1030"]),
        ];
        let report = find_conflicts(Snapshot { columns: &columns, entries: &entries });
        assert_eq!(pairs(&report), [(0, 1, Slot::A)]);
        assert_eq!(report.conflicts[0].first, &entries[0]);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn touching_intervals_do_not_conflict() {
        let columns = columns();
        let entries = vec![
            entry("X", Slot::B, ["101", "Mon", "900", "1000"]),
            entry("Y", Slot::B, ["101", "Mon", "1000", "1100"]),
            entry("Z", Slot::B, ["101", "Tue", "900", "1000"]),
            entry("W", Slot::B, ["102", "Mon", "900", "1000"]),
        ];
        assert!(find_conflicts(Snapshot { columns: &columns, entries: &entries }).is_empty());
    }

    #[test]
    fn slots_are_checked_independently() {
        let columns = columns();
        let entries = vec![
            entry("X", Slot::A, ["101", "Mon", "900", "1000"]),
            entry("Y", Slot::B, ["101", "Mon", "900", "1000"]),
        ];
        assert!(find_conflicts(Snapshot { columns: &columns, entries: &entries }).is_empty());
    }

    #[test]
    fn empty_room_or_group_is_ignored() {
        let columns = columns();
        let mut ungrouped = entry("Y", Slot::A, ["101", "Mon", "900", "1000"]);
        columns.set(&mut ungrouped, Field::GroupLabel, " ");
        let entries = vec![
            entry("X", Slot::A, ["101", "Mon", "900", "1000"]),
            ungrouped,
            entry("Z", Slot::A, ["", "Mon", "900", "1000"]),
        ];
        assert!(find_conflicts(Snapshot { columns: &columns, entries: &entries }).is_empty());
    }

    #[test]
    fn unparsable_times_are_skipped_not_reported() {
        let columns = columns();
        let entries = vec![
            entry("X", Slot::A, ["101", "Mon", "9:00", "1000"]),
            entry("Y", Slot::A, ["101", "Mon", "930", "1030"]),
            entry("Z", Slot::A, ["101", "Mon", "945", "1015"]),
        ];
        let report = find_conflicts(Snapshot { columns: &columns, entries: &entries });
        assert_eq!(pairs(&report), [(1, 2, Slot::A)]);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(
            report.skipped[0],
            SkippedComparison {
                first_index: 0,
                second_index: 1,
                slot: Slot::A,
                error: ParseError { field: Field::BeginA, value: "9:00".to_owned() },
            }
        );
    }

    #[test]
    fn detection_is_symmetric() {
        let columns = columns();
        let entries = vec![
            entry("X", Slot::A, ["101", "Mon", "900", "1000"]),
            entry("Y", Slot::A, ["101", "Mon", "800", "1200"]),
            entry("Z", Slot::A, ["101", "Mon", "1100", "1300"]),
        ];
        let forward = find_conflicts(Snapshot { columns: &columns, entries: &entries });
        let reversed: Vec<ScheduleEntry> = entries.iter().rev().cloned().collect();
        let backward = find_conflicts(Snapshot { columns: &columns, entries: &reversed });

        let normalize = |report: &ConflictReport, len: usize, flip: bool| {
            let mut pairs: Vec<(usize, usize)> = report
                .conflicts
                .iter()
                .map(|conflict| {
                    let (a, b) = (conflict.first_index, conflict.second_index);
                    let (a, b) = if flip { (len - 1 - a, len - 1 - b) } else { (a, b) };
                    (a.min(b), a.max(b))
                })
                .collect();
            pairs.sort();
            pairs
        };
        assert_eq!(normalize(&forward, 3, false), [(0, 1), (1, 2)]);
        assert_eq!(normalize(&backward, 3, true), normalize(&forward, 3, false));
        assert!(forward.conflicts.iter().all(|conflict| conflict.first_index != conflict.second_index));
    }
}
