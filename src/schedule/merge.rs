//! Merging under-enrolled sections of the same course.
use crate::helpers::string::format_number;
use crate::schedule::columns::ColumnMap;
use crate::schedule::columns::Field;
use crate::schedule::entry::ScheduleEntry;
use crate::schedule::store::ScheduleStore;
use crate::schedule::store::Snapshot;
use crate::schedule::MergeError;
use crate::schedule::ScheduleError;

/// Entries whose capacity is a number strictly below `threshold`, in order.
/// Entries with a non-numeric capacity are left out.
pub fn merge_suggestions<'a>(snapshot: Snapshot<'a>, threshold: f64) -> Vec<&'a ScheduleEntry> {
    let columns = snapshot.columns;
    snapshot
        .iter()
        .filter(|entry| {
            columns
                .decimal(entry, Field::Capacity)
                .map(|capacity| capacity < threshold)
                .unwrap_or(false)
        })
        .collect()
}

/// Combines two sections of one course.
///
/// Takers are joined as `"a + b"` and capacities summed. Code, title and
/// offered-to come from `a`; every other field, both slots included, is blank.
pub fn merge(columns: &ColumnMap, a: &ScheduleEntry, b: &ScheduleEntry) -> Result<ScheduleEntry, MergeError> {
    let code_a = columns.trimmed(a, Field::CourseCode);
    let code_b = columns.trimmed(b, Field::CourseCode);
    if code_a != code_b {
        return Err(MergeError::CourseCodeMismatch(code_a.to_owned(), code_b.to_owned()));
    }
    for entry in [a, b] {
        if entry.len() != columns.len() {
            return Err(MergeError::ColumnCountMismatch {
                expected: columns.len(),
                actual: entry.len(),
            });
        }
    }
    let capacity = columns.decimal(a, Field::Capacity)? + columns.decimal(b, Field::Capacity)?;

    let mut merged = ScheduleEntry::blank(columns.len());
    let takers = format!("{} + {}", columns.get(a, Field::Takers), columns.get(b, Field::Takers));
    columns.set(&mut merged, Field::Takers, takers);
    for field in [Field::CourseCode, Field::CourseTitle, Field::OfferedTo] {
        columns.set(&mut merged, field, columns.get(a, field));
    }
    columns.set(&mut merged, Field::Capacity, format_number(capacity));
    Ok(merged)
}

/// Replaces `a` and `b` in the store with their merge and returns its index.
///
/// Everything that can fail is checked before the store is touched, so on
/// error the store is unchanged.
pub fn apply_merge(store: &mut ScheduleStore, a: &ScheduleEntry, b: &ScheduleEntry) -> Result<usize, ScheduleError> {
    let merged = merge(store.columns(), a, b)?;
    let index_a = store.position(a).ok_or_else(|| ScheduleError::not_found(a))?;
    let index_b = store
        .snapshot()
        .iter()
        .enumerate()
        .position(|(index, entry)| index != index_a && entry.matches(b))
        .ok_or_else(|| ScheduleError::not_found(b))?;

    let inserted = store.add(merged)?;
    let shift = |index: usize| if index >= inserted { index + 1 } else { index };
    let (index_a, index_b) = (shift(index_a), shift(index_b));
    store.remove_pair(index_a, index_b);
    let index = inserted - [index_a, index_b].iter().filter(|index| **index < inserted).count();

    tracing::info!(
        index,
        course_code = %store.columns().trimmed(a, Field::CourseCode),
        "Merged schedules"
    );
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::columns::ColumnLayout;
    use crate::schedule::columns::Slot;
    use crate::schedule::ParseError;
    use assert_matches::assert_matches;

    const WIDTH: usize = 17;

    fn columns() -> ColumnMap {
        let headers = (0..WIDTH).map(|index| format!("H{index}")).collect();
        ColumnMap::new(headers, ColumnLayout::default()).expect("default layout fits 17 columns")
    }

    fn entry(code: &str, takers: &str, capacity: &str) -> ScheduleEntry {
        let columns = columns();
        let mut entry = ScheduleEntry::blank(WIDTH);
        columns.set(&mut entry, Field::GroupLabel, "Engineering");
        columns.set(&mut entry, Field::CourseCode, code);
        columns.set(&mut entry, Field::CourseTitle, format!("{code} title"));
        columns.set(&mut entry, Field::OfferedTo, "BSCS");
        columns.set(&mut entry, Field::Takers, takers);
        columns.set(&mut entry, Field::Capacity, capacity);
        for (field, value) in Slot::A.fields().into_iter().zip(["101", "Mon", "900", "1000"]) {
            columns.set(&mut entry, field, value);
        }
        entry.set(16, "note".to_owned());
        entry
    }

    #[test]
    fn suggestions_below_threshold() {
        let columns = columns();
        let entries = vec![
            entry("CS101", "A", "20"),
            entry("CS102", "B", "N/A"),
            entry("CS103", "C", "30"),
            entry("CS104", "D", " 12.5 "),
        ];
        let suggestions = merge_suggestions(Snapshot { columns: &columns, entries: &entries }, 30.0);
        assert_eq!(suggestions, [&entries[0], &entries[3]]);
    }

    #[test]
    fn merge_joins_takers_and_sums_capacity() -> Result<(), MergeError> {
        let columns = columns();
        let merged = merge(&columns, &entry("CS101", "Alice", "15"), &entry(" CS101", "Bob", "20"))?;
        assert_eq!(columns.get(&merged, Field::Takers), "Alice + Bob");
        assert_eq!(columns.get(&merged, Field::Capacity), "35");
        assert_eq!(columns.get(&merged, Field::CourseCode), "CS101");
        assert_eq!(columns.get(&merged, Field::CourseTitle), "CS101 title");
        assert_eq!(columns.get(&merged, Field::OfferedTo), "BSCS");
        assert_eq!(columns.get(&merged, Field::GroupLabel), "");
        for slot in Slot::ALL {
            assert!(slot.fields().iter().all(|field| columns.get(&merged, *field).is_empty()));
        }
        assert_eq!(merged.get(16), Some(""));
        assert_eq!(merged.len(), WIDTH);
        Ok(())
    }

    #[test]
    fn fractional_capacity_sum_is_kept() -> Result<(), MergeError> {
        let columns = columns();
        let merged = merge(&columns, &entry("CS101", "A", "10.5"), &entry("CS101", "B", "2"))?;
        assert_eq!(columns.get(&merged, Field::Capacity), "12.5");
        Ok(())
    }

    #[test]
    fn merge_rejects_invalid_pairs() {
        let columns = columns();
        assert_matches!(
            merge(&columns, &entry("CS101", "A", "1"), &entry("CS102", "B", "1")),
            Err(MergeError::CourseCodeMismatch(a, b)) if a == "CS101" && b == "CS102"
        );
        assert_matches!(
            merge(&columns, &entry("CS101", "A", "1"), &entry("CS101", "B", "many")),
            Err(MergeError::Capacity(ParseError { field: Field::Capacity, value })) if value == "many"
        );
        let mut short = entry("CS101", "B", "1").into_fields();
        short.pop();
        assert_matches!(
            merge(&columns, &entry("CS101", "A", "1"), &ScheduleEntry::new(short)),
            Err(MergeError::ColumnCountMismatch { expected: 17, actual: 16 })
        );
    }

    #[test]
    fn apply_merge_replaces_both_sections() -> Result<(), ScheduleError> {
        let a = entry("CS101", "Alice", "15");
        let b = entry("CS101", "Bob", "20");
        let mut store = ScheduleStore::new(
            columns(),
            vec![entry("MA201", "X", "40"), a.clone(), b.clone(), entry("PH100", "Y", "10")],
        );
        let index = apply_merge(&mut store, &a, &b)?;
        assert_eq!(index, 1);
        assert_eq!(store.len(), 3);
        let merged = store.get(index).expect("merged entry");
        assert_eq!(store.columns().get(merged, Field::Takers), "Alice + Bob");
        assert_eq!(store.position(&a), None);
        assert_eq!(store.position(&b), None);
        Ok(())
    }

    #[test]
    fn apply_merge_handles_identical_sections() -> Result<(), ScheduleError> {
        let a = entry("CS101", "Same", "5");
        let mut store = ScheduleStore::new(columns(), vec![a.clone(), entry("MA201", "X", "40"), a.clone()]);
        let index = apply_merge(&mut store, &a, &a)?;
        assert_eq!(index, 1);
        assert_eq!(store.len(), 2);
        assert_eq!(store.columns().get(&store.snapshot().entries[1], Field::Capacity), "10");
        Ok(())
    }

    #[test]
    fn failed_apply_merge_leaves_store_unchanged() {
        let a = entry("CS101", "Alice", "15");
        let mut store = ScheduleStore::new(columns(), vec![a.clone(), entry("MA201", "X", "40")]);
        let before = store.clone();
        assert_matches!(apply_merge(&mut store, &a, &a), Err(ScheduleError::NotFound(_)));
        assert_matches!(
            apply_merge(&mut store, &a, &entry("MA201", "X", "40")),
            Err(ScheduleError::Merge(MergeError::CourseCodeMismatch(..)))
        );
        assert_eq!(store, before);
    }
}
