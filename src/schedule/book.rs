use crate::config::ScheduleConfig;
use crate::error::CourseSheetError;
use crate::error::ResultMessage;
use crate::schedule::columns::Field;
use crate::schedule::parser::parse;
use crate::schedule::store::ScheduleStore;
use crate::schedule::ScheduleError;
use crate::spreadsheet;
use crate::spreadsheet::Grid;
use std::path::Path;

/// A schedule sheet: the preamble rows kept verbatim plus the editable store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleBook {
    preamble: Grid,
    store: ScheduleStore,
}

impl ScheduleBook {
    /// Parses an in-memory grid.
    pub fn from_grid(grid: &[Vec<String>], config: &ScheduleConfig) -> Result<Self, ScheduleError> {
        let parsed = parse(grid, config)?;
        Ok(ScheduleBook {
            preamble: parsed.preamble,
            store: ScheduleStore::new(parsed.columns, parsed.entries).with_group_rows(parsed.group_rows),
        })
    }

    /// Loads and parses a spreadsheet file.
    pub fn open<P: AsRef<Path>>(path: P, config: &ScheduleConfig) -> Result<Self, CourseSheetError> {
        let path = path.as_ref();
        let grid = spreadsheet::load(path, &config.criteria()?)?;
        Self::from_grid(&grid, config)
            .map_err(CourseSheetError::from)
            .with_prefix(&format!("Parse '{}' failed", path.display()))
    }

    pub fn preamble(&self) -> &[Vec<String>] {
        &self.preamble
    }

    pub fn headers(&self) -> &[String] {
        self.store.headers()
    }

    pub fn store(&self) -> &ScheduleStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ScheduleStore {
        &mut self.store
    }

    /// Renders the whole sheet: preamble, then entries with the group header
    /// rows written back where they were read. Labels an entry inherited from
    /// its group header are left empty; its own labels are kept.
    pub fn to_grid(&self) -> Grid {
        let group_index = self.store.columns().index(Field::GroupLabel);
        let mut group_rows = self.store.group_rows().iter().peekable();
        let mut grid = self.preamble.clone();
        for (index, entry) in self.store.snapshot().iter().enumerate() {
            while let Some(header) = group_rows.next_if(|header| header.before <= index) {
                grid.push(header.cells.clone());
            }
            let mut row = entry.fields().to_vec();
            if entry.inherits_group() {
                if let Some(cell) = row.get_mut(group_index) {
                    cell.clear();
                }
            }
            grid.push(row);
        }
        grid.extend(group_rows.map(|header| header.cells.clone()));
        grid
    }

    /// Writes the sheet back, replacing the file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), CourseSheetError> {
        spreadsheet::save(path, &self.to_grid())
    }
}
