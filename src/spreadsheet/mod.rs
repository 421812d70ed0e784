//! # Spreadsheet I/O
//!
//! Reads course schedule workbooks into a plain row/column [`Grid`] of text
//! and writes grids back. Supported formats are Office Open XML workbooks
//! (`.xlsx`, `.xlsm`) and comma-separated values (`.csv`).
//!
//! Every cell of a loaded grid is a `String`; missing cells are empty strings
//! and rows are padded to the widest row, so callers never see ragged input.
use crate::error::CourseSheetError;
use crate::error::ResultMessage;
use std::ffi::OsStr;
use std::path::Path;
use thiserror::Error;

pub(crate) mod cell;
pub mod criteria;
pub(crate) mod csv_file;
pub(crate) mod excel;
pub(crate) mod reference;
pub(crate) mod sheet;
pub(crate) mod writer;
pub(crate) mod xlsx;

pub use criteria::Criteria;

/// Rows × columns of untyped cell text.
pub type Grid = Vec<Vec<String>>;

/// Errors raised while locating or decoding spreadsheet content.
#[derive(Error, Debug)]
pub enum SpreadsheetError {
    /// Unsupported or unrecognized file format
    #[error("Cannot detect file format for '{0}'")]
    InvalidFileFormat(String),

    /// A required part of the workbook archive is missing
    #[error("Missing workbook part '{0}'")]
    FileError(String),

    /// No worksheet matches the requested criteria
    #[error("No matching sheet in '{0}'")]
    SheetNotFound(String),

    /// The workbook declares no worksheets
    #[error("Spreadsheet '{0}' contains no sheets")]
    SpreadsheetEmptyError(String),

    /// A cell value that cannot be decoded
    #[error("Invalid cell value at '{0}': {1}")]
    CellValueError(String, String),
}

/// Supported on-disk formats, detected from the file extension.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpreadsheetFormat {
    /// Office Open XML workbook (.xlsx, .xlsm)
    Xlsx,
    /// Comma-separated values (.csv)
    Csv,
}

impl SpreadsheetFormat {
    /// Detects the format of a path from its (case-insensitive) extension.
    pub fn detect(path: &Path) -> Result<Self, SpreadsheetError> {
        let extension = path
            .extension()
            .and_then(OsStr::to_str)
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("xlsx") | Some("xlsm") => Ok(Self::Xlsx),
            Some("csv") => Ok(Self::Csv),
            _ => Err(SpreadsheetError::InvalidFileFormat(path.to_string_lossy().to_string())),
        }
    }
}

/// A readable spreadsheet source.
pub(crate) trait Spreadsheet {
    /// Returns the file name of this spreadsheet
    fn name(&self) -> String;

    /// Reads the selected worksheet as a rectangular grid
    fn read_grid(&mut self, criteria: &Criteria) -> Result<Grid, CourseSheetError>;
}

/// Opens the spreadsheet reader matching the file extension.
pub(crate) fn open(path: &Path) -> Result<Box<dyn Spreadsheet>, CourseSheetError> {
    let file_name = path.to_string_lossy();
    let spreadsheet: Box<dyn Spreadsheet> = match SpreadsheetFormat::detect(path)? {
        SpreadsheetFormat::Xlsx => Box::new(xlsx::XlsxSpreadsheet::open(&file_name)?),
        SpreadsheetFormat::Csv => Box::new(csv_file::CsvSpreadsheet::open(&file_name)?),
    };
    Ok(spreadsheet)
}

/// Reads a spreadsheet file into a grid.
pub fn load<P: AsRef<Path>>(path: P, criteria: &Criteria) -> Result<Grid, CourseSheetError> {
    let path = path.as_ref();
    let mut spreadsheet = open(path)?;
    let grid = spreadsheet
        .read_grid(criteria)
        .with_prefix(&format!("Read '{}' failed", spreadsheet.name()))?;
    tracing::info!(
        file = %path.display(),
        rows = grid.len(),
        cols = grid.first().map(Vec::len).unwrap_or(0),
        "Loaded spreadsheet"
    );
    Ok(grid)
}

/// Writes a grid to a spreadsheet file, replacing it entirely.
pub fn save<P: AsRef<Path>>(path: P, grid: &[Vec<String>]) -> Result<(), CourseSheetError> {
    let path = path.as_ref();
    match SpreadsheetFormat::detect(path)? {
        SpreadsheetFormat::Xlsx => writer::write_xlsx(path, grid),
        SpreadsheetFormat::Csv => csv_file::write_csv(path, grid),
    }
    .with_prefix(&format!("Write '{}' failed", path.display()))?;
    tracing::info!(file = %path.display(), rows = grid.len(), "Saved spreadsheet");
    Ok(())
}
