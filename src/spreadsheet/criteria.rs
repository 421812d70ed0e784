use glob::Pattern;

/// Criteria for selecting and decoding a worksheet.
#[derive(Clone, Debug)]
pub struct Criteria {
    /// Sheet name pattern selecting which worksheet to read; the first sheet when absent.
    pub sheet_name_pattern: Option<Pattern>,

    /// Convert spreadsheet error cells (`#N/A`, `#REF!`) to empty text.
    pub error_as_empty: bool,
}

impl Default for Criteria {
    fn default() -> Self {
        Criteria {
            sheet_name_pattern: None,
            error_as_empty: true,
        }
    }
}

impl Criteria {
    /// Checks if a sheet name matches the criteria pattern.
    /// Returns true if no pattern is specified.
    pub fn accept(&self, sheet_name: &str) -> bool {
        self.sheet_name_pattern
            .as_ref()
            .map(|pattern| pattern.matches(sheet_name))
            .unwrap_or(true)
    }
}
