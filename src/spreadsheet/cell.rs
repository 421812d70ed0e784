use crate::error::CourseSheetError;
use crate::helpers::string::normalize_number;
use crate::spreadsheet::reference::index_to_reference;
use crate::spreadsheet::SpreadsheetError;
use chrono::Duration;
use chrono::NaiveDate;

/// Types of cell data in spreadsheet files.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) enum CellType {
    #[default]
    Empty,
    /// Boolean values (true/false)
    Boolean,
    /// Numeric values
    Number,
    /// Date/time values stored as numbers from 1900 epoch
    NumberDateTime1900,
    /// Date values stored as numbers from 1900 epoch
    NumberDate1900,
    /// Time values stored as numbers from 1900 epoch
    NumberTime1900,
    /// Date/time values stored as numbers from 1904 epoch
    NumberDateTime1904,
    /// Date values stored as numbers from 1904 epoch
    NumberDate1904,
    /// Time values stored as numbers from 1904 epoch
    NumberTime1904,
    /// ISO 8601 date/time strings
    IsoDateTime,
    /// Inline string values
    InlineString,
    /// Shared string table references
    SharedString,
    /// Error values
    Error,
}

impl CellType {
    /// Parses built-in Excel number format IDs to determine cell type.
    pub(crate) fn parse_builtin_number_format_id(id: &str, is_1904: bool) -> Option<Self> {
        match id {
            "22" => Some(if is_1904 { Self::NumberDateTime1904 } else { Self::NumberDateTime1900 }),
            "14" | "15" | "16" | "17" => Some(if is_1904 { Self::NumberDate1904 } else { Self::NumberDate1900 }),
            "18" | "19" | "20" | "21" | "45" | "46" | "47" => Some(if is_1904 { Self::NumberTime1904 } else { Self::NumberTime1900 }),
            _ => None,
        }
    }

    /// Parses custom number format strings to determine cell type.
    /// Analyzes format codes for date/time patterns, ignoring literals and colors.
    pub(crate) fn parse_custom_number_format(format: &str, is_1904: bool) -> Self {
        let mut is_escaped = false;
        let mut is_literal = false;
        let mut is_date = false;
        let mut is_time = false;
        let mut is_color = false;
        for character in format.chars() {
            match character {
                _ if is_escaped => is_escaped = false,
                '_' | '\\' => is_escaped = true,

                '"' if is_literal => is_literal = false,
                '"' if !is_color => is_literal = true,

                ']' if is_color => is_color = false,
                '[' if !is_literal => is_color = true,
                _ if is_literal || is_color => (),

                'Y' | 'y' | 'D' | 'd' => is_date = true,
                'H' | 'h' | 'S' | 's' => is_time = true,
                _ => (),
            }
        }

        match (is_date, is_time, is_1904) {
            (true, true, false) => Self::NumberDateTime1900,
            (true, true, true) => Self::NumberDateTime1904,
            (true, false, false) => Self::NumberDate1900,
            (true, false, true) => Self::NumberDate1904,
            (false, true, false) => Self::NumberTime1900,
            (false, true, true) => Self::NumberTime1904,
            (false, false, _) => Self::Number,
        }
    }
}

/// Represents a single cell in a spreadsheet with position, type, and raw value.
#[derive(Clone, Debug)]
pub(crate) struct Cell {
    /// Row index (0-based)
    pub(crate) row: usize,
    /// Column index (0-based)
    pub(crate) col: usize,
    /// Cell data type
    pub(crate) kind: CellType,
    /// Raw cell value as stored in the file
    pub(crate) value: String,
}

impl Cell {
    /// Returns the Excel-style cell reference (e.g., "A1", "B2").
    pub(crate) fn reference(&self) -> String {
        index_to_reference(self.row, self.col)
    }

    /// Renders the cell as grid text.
    ///
    /// Integral numbers lose their fractional part, booleans become `TRUE`/`FALSE`,
    /// date and time formatted numbers become ISO text, and error cells become
    /// empty when `error_as_empty` is set.
    pub(crate) fn to_text(&self, shared_strings: &[String], error_as_empty: bool) -> Result<String, CourseSheetError> {
        let text = match self.kind {
            CellType::Empty => String::new(),
            CellType::Boolean => if self.value == "1" { "TRUE" } else { "FALSE" }.to_owned(),
            CellType::Number => normalize_number(&self.value),
            CellType::NumberDate1900 => to_date_string(&self.value, false)?.ok_or_else(|| self.invalid())?,
            CellType::NumberDate1904 => to_date_string(&self.value, true)?.ok_or_else(|| self.invalid())?,
            CellType::NumberDateTime1900 => to_datetime_string(&self.value, false)?.ok_or_else(|| self.invalid())?,
            CellType::NumberDateTime1904 => to_datetime_string(&self.value, true)?.ok_or_else(|| self.invalid())?,
            CellType::NumberTime1900 | CellType::NumberTime1904 => to_time_string(&self.value)?,
            CellType::IsoDateTime => self.value.replace('T', " "),
            CellType::InlineString => self.value.to_owned(),
            CellType::SharedString => {
                let index = self.value.trim().parse::<usize>()?;
                shared_strings
                    .get(index)
                    .cloned()
                    .ok_or_else(|| self.invalid())?
            }
            CellType::Error if error_as_empty => String::new(),
            CellType::Error => self.value.to_owned(),
        };
        Ok(text)
    }

    /// Error describing this cell's undecodable value.
    fn invalid(&self) -> SpreadsheetError {
        SpreadsheetError::CellValueError(self.reference(), self.value.to_owned())
    }
}

/// Converts Excel numeric date to ISO date string.
/// Handles Lotus 1-2-3 leap year bug for 1900 epoch.
/// Serials outside the calendar range yield `None`.
fn to_date_string(value: &str, is_1904: bool) -> Result<Option<String>, CourseSheetError> {
    let days = value.trim().parse::<f64>()?.trunc() as i64;
    let offset = if is_1904 {
        1462
    } else if days < 60 {
        1
    } else {
        0
    };
    let date = days
        .checked_add(offset)
        .and_then(Duration::try_days)
        .and_then(|duration| NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_signed(duration));
    Ok(date.map(|date| date.format("%Y-%m-%d").to_string()))
}

/// Converts Excel numeric time (fraction of a day) to ISO time string.
fn to_time_string(value: &str) -> Result<String, CourseSheetError> {
    let factor = value.trim().parse::<f64>()?.fract();
    let mut remainder = (factor * 86_400_000f64).round() as i64;
    let milliseconds = remainder % 1_000; remainder /= 1_000;
    let seconds = remainder % 60; remainder /= 60;
    let minutes = remainder % 60; remainder /= 60;
    let hours = remainder;
    let timestamp = if milliseconds > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}.{milliseconds:03}")
    } else {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    };
    Ok(timestamp)
}

/// Converts Excel numeric datetime to ISO datetime string.
fn to_datetime_string(value: &str, is_1904: bool) -> Result<Option<String>, CourseSheetError> {
    let date = match to_date_string(value, is_1904)? {
        Some(date) => date,
        None => return Ok(None),
    };
    let time = to_time_string(value)?;
    Ok(Some(format!("{date} {time}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn cell(kind: CellType, value: &str) -> Cell {
        Cell { row: 0, col: 0, kind, value: value.to_owned() }
    }

    #[test]
    fn custom_formats_detect_dates_and_times() {
        assert_eq!(CellType::parse_custom_number_format("yyyy-mm-dd", false), CellType::NumberDate1900);
        assert_eq!(CellType::parse_custom_number_format("hh:mm", true), CellType::NumberTime1904);
        assert_eq!(CellType::parse_custom_number_format("d/m/yy h:mm", false), CellType::NumberDateTime1900);
        assert_eq!(CellType::parse_custom_number_format("[Red]0.00", false), CellType::Number);
        assert_eq!(CellType::parse_custom_number_format("0 \"days\"", false), CellType::Number);
    }

    #[test]
    fn numbers_are_normalized() -> Result<(), CourseSheetError> {
        assert_eq!(cell(CellType::Number, "900").to_text(&[], true)?, "900");
        assert_eq!(cell(CellType::Number, "35.0").to_text(&[], true)?, "35");
        assert_eq!(cell(CellType::Number, "0.5").to_text(&[], true)?, "0.5");
        Ok(())
    }

    #[test]
    fn dates_and_times_render_as_iso() -> Result<(), CourseSheetError> {
        assert_eq!(cell(CellType::NumberDate1900, "45292").to_text(&[], true)?, "2024-01-01");
        assert_eq!(cell(CellType::NumberTime1900, "0.5").to_text(&[], true)?, "12:00:00");
        assert_eq!(cell(CellType::NumberDateTime1900, "45292.75").to_text(&[], true)?, "2024-01-01 18:00:00");
        Ok(())
    }

    #[test]
    fn out_of_range_dates_are_cell_errors() {
        assert_matches!(
            cell(CellType::NumberDate1900, "1e12").to_text(&[], true),
            Err(CourseSheetError::SpreadsheetError(SpreadsheetError::CellValueError(reference, value)))
                if reference == "A1" && value == "1e12"
        );
        assert!(cell(CellType::NumberDateTime1904, "-1e300").to_text(&[], true).is_err());
    }

    #[test]
    fn shared_strings_and_errors() -> Result<(), CourseSheetError> {
        let shared = vec!["Room 101".to_owned()];
        assert_eq!(cell(CellType::SharedString, "0").to_text(&shared, true)?, "Room 101");
        assert!(cell(CellType::SharedString, "3").to_text(&shared, true).is_err());
        assert_eq!(cell(CellType::Error, "#N/A").to_text(&shared, true)?, "");
        assert_eq!(cell(CellType::Error, "#N/A").to_text(&shared, false)?, "#N/A");
        assert_eq!(cell(CellType::Boolean, "1").to_text(&shared, true)?, "TRUE");
        Ok(())
    }
}
