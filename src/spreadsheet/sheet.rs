use crate::error::CourseSheetError;
use crate::spreadsheet::cell::Cell;
use crate::spreadsheet::Grid;

/// Cells collected from one worksheet, in file order, with the used data range.
pub(crate) struct Sheet {
    /// Source file name
    pub(crate) file_name: String,
    /// Sheet name
    pub(crate) name: String,
    /// All non-empty cells in the sheet
    pub(crate) cells: Vec<Cell>,
    /// Largest row index seen
    pub(crate) row_upper_bound: Option<usize>,
    /// Largest column index seen
    pub(crate) col_upper_bound: Option<usize>,
}

impl Sheet {
    /// Creates an empty sheet.
    pub(crate) fn new(file_name: &str, name: &str) -> Self {
        Self {
            file_name: file_name.to_owned(),
            name: name.to_owned(),
            cells: Vec::new(),
            row_upper_bound: None,
            col_upper_bound: None,
        }
    }

    /// Returns true if the sheet contains no cells.
    pub(crate) fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Adds a cell to the sheet, updating the data range.
    pub(crate) fn push(&mut self, cell: Cell) {
        if self.row_upper_bound.map(|bound| bound < cell.row).unwrap_or(true) {
            self.row_upper_bound = Some(cell.row);
        }
        if self.col_upper_bound.map(|bound| bound < cell.col).unwrap_or(true) {
            self.col_upper_bound = Some(cell.col);
        }
        self.cells.push(cell);
    }

    /// Widens the data range to cover the cell at `row`, `col` without adding a cell.
    pub(crate) fn extend_to(&mut self, row: usize, col: usize) {
        self.row_upper_bound = Some(self.row_upper_bound.map_or(row, |bound| bound.max(row)));
        self.col_upper_bound = Some(self.col_upper_bound.map_or(col, |bound| bound.max(col)));
    }

    /// Lays the cells out as a rectangular grid anchored at A1.
    /// Positions without a cell become empty strings.
    pub(crate) fn to_grid(&self, shared_strings: &[String], error_as_empty: bool) -> Result<Grid, CourseSheetError> {
        let (rows, cols) = match self.row_upper_bound.zip(self.col_upper_bound) {
            Some((row, col)) => (row + 1, col + 1),
            None => return Ok(Grid::new()),
        };
        let mut grid = vec![vec![String::new(); cols]; rows];
        for cell in &self.cells {
            grid[cell.row][cell.col] = cell.to_text(shared_strings, error_as_empty)?;
        }
        Ok(grid)
    }
}

/// Pads every row to the width of the widest row.
pub(crate) fn make_rectangular(mut grid: Grid) -> Grid {
    let width = grid.iter().map(Vec::len).max().unwrap_or(0);
    for row in grid.iter_mut() {
        row.resize(width, String::new());
    }
    grid
}
