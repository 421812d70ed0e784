//! Comma-separated values reader and writer.

use crate::error::CourseSheetError;
use crate::spreadsheet::criteria::Criteria;
use crate::spreadsheet::sheet::make_rectangular;
use crate::spreadsheet::Grid;
use crate::spreadsheet::Spreadsheet;
use std::path::Path;

/// A CSV file exposed as a single-sheet spreadsheet
pub(crate) struct CsvSpreadsheet {
    name: String,
}

impl CsvSpreadsheet {
    pub(crate) fn open(file_name: &str) -> Result<CsvSpreadsheet, CourseSheetError> {
        if !Path::new(file_name).is_file() {
            Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("No such file: '{file_name}'"),
            ))?;
        }
        Ok(CsvSpreadsheet { name: file_name.to_owned() })
    }
}

impl Spreadsheet for CsvSpreadsheet {
    fn name(&self) -> String {
        self.name.to_owned()
    }

    /// Reads all records without treating the first one as a header; ragged rows are padded.
    /// Sheet name patterns do not apply to CSV files.
    fn read_grid(&mut self, _criteria: &Criteria) -> Result<Grid, CourseSheetError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.name)?;

        let mut grid = Grid::new();
        for result in reader.records() {
            let record = result?;
            grid.push(record.iter().map(str::to_owned).collect());
        }
        Ok(make_rectangular(grid))
    }
}

/// Writes every grid row as one CSV record, replacing any existing file
pub(crate) fn write_csv(path: &Path, rows: &[Vec<String>]) -> Result<(), CourseSheetError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    for row in rows {
        writer.write_record(row)?;
    }

    writer.flush()?;
    Ok(())
}
