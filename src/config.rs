//! Load options for schedule sheets.
//!
//! Options can be set field by field or from `name = value` text pairs, e.g.
//! `header_row=3`, `sheet=Fall*`, `column.capacity=P`.
use crate::schedule::ColumnLayout;
use crate::schedule::Field;
use crate::schedule::FormatError;
use crate::spreadsheet::reference::col_to_index;
use crate::spreadsheet::Criteria;
use glob::Pattern;
use regex::Regex;
use thiserror::Error;

/// Prefix of per-role column options.
const COLUMN_OPTION_PREFIX: &str = "column.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown option '{0}'")]
    UnknownOption(String),

    #[error("Invalid value '{value}' for option '{name}': {message}")]
    InvalidValue {
        name: String,
        value: String,
        message: String,
    },

    #[error("{0}")]
    LayoutError(#[from] FormatError),
}

impl ConfigError {
    fn invalid(name: &str, value: &str, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            name: name.to_owned(),
            value: value.to_owned(),
            message: message.into(),
        }
    }
}

/// How a schedule grid is located and interpreted.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduleConfig {
    /// 0-based index of the row holding the column labels
    pub header_row: usize,
    /// Drop completely empty rows instead of keeping them as blank entries
    pub skip_empty_rows: bool,
    /// Column of every schedule role
    pub layout: ColumnLayout,
    /// Glob pattern selecting the worksheet; the first sheet when absent
    pub sheet_name_pattern: Option<String>,
    /// Read error cells (`#N/A`, `#DIV/0!`) as empty text
    pub error_as_empty: bool,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        ScheduleConfig {
            header_row: 3,
            skip_empty_rows: false,
            layout: ColumnLayout::default(),
            sheet_name_pattern: None,
            error_as_empty: true,
        }
    }
}

impl ScheduleConfig {
    pub fn with_header_row(mut self, header_row: usize) -> Self {
        self.header_row = header_row;
        self
    }

    pub fn with_skip_empty_rows(mut self, skip_empty_rows: bool) -> Self {
        self.skip_empty_rows = skip_empty_rows;
        self
    }

    pub fn with_layout(mut self, layout: ColumnLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_sheet(mut self, pattern: impl Into<String>) -> Self {
        self.sheet_name_pattern = Some(pattern.into());
        self
    }

    /// Applies one named option given as text.
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        let key = name.trim().to_ascii_lowercase();
        let value = value.trim();
        match key.as_str() {
            "header_row" => {
                self.header_row = value
                    .parse()
                    .map_err(|_| ConfigError::invalid(name, value, "expected a row index"))?;
            }
            "skip_empty_rows" => self.skip_empty_rows = parse_bool(name, value)?,
            "error_as_empty" => self.error_as_empty = parse_bool(name, value)?,
            "sheet" => {
                Pattern::new(value).map_err(|error| ConfigError::invalid(name, value, error.to_string()))?;
                self.sheet_name_pattern = Some(value.to_owned()).filter(|pattern| !pattern.is_empty());
            }
            _ => match key.strip_prefix(COLUMN_OPTION_PREFIX) {
                Some(field) => self.layout.assign(&format!("{field}={value}"))?,
                None => return Err(ConfigError::UnknownOption(name.to_owned())),
            },
        }
        tracing::debug!(option = %key, value = %value, "Applied schedule option");
        Ok(())
    }

    /// Applies `name=value` pairs in order.
    pub fn apply_options<'a, I>(&mut self, options: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for option in options {
            let (name, value) = option
                .split_once('=')
                .ok_or_else(|| ConfigError::invalid(option, "", "expected name=value"))?;
            self.set_option(name, value)?;
        }
        Ok(())
    }

    /// Compiles the worksheet selection for the spreadsheet readers.
    pub fn criteria(&self) -> Result<Criteria, ConfigError> {
        let sheet_name_pattern = match &self.sheet_name_pattern {
            Some(pattern) => Some(
                Pattern::new(pattern)
                    .map_err(|error| ConfigError::invalid("sheet", pattern, error.to_string()))?,
            ),
            None => None,
        };
        Ok(Criteria {
            sheet_name_pattern,
            error_as_empty: self.error_as_empty,
        })
    }
}

impl ColumnLayout {
    /// Applies a `<field>=<column>` assignment such as `capacity=P` or `capacity=15`.
    /// Letters are Excel column names, numbers are 0-based indexes.
    pub fn assign(&mut self, assignment: &str) -> Result<(), ConfigError> {
        let (field, index) = parse_assignment(assignment)?;
        self.set(field, index);
        Ok(())
    }
}

impl TryFrom<&str> for ColumnLayout {
    type Error = ConfigError;

    /// Parses comma-separated assignments on top of the default layout,
    /// e.g. `"capacity=P, takers=B"`.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let mut layout = ColumnLayout::default();
        for assignment in value.split(',').filter(|part| !part.trim().is_empty()) {
            layout.assign(assignment)?;
        }
        Ok(layout)
    }
}

fn parse_assignment(assignment: &str) -> Result<(Field, usize), ConfigError> {
    let pattern = Regex::new(r"^\s*([A-Za-z_\-]+)\s*=\s*(?:([A-Za-z]+)|(\d+))\s*$").expect("Hardcode regex pattern");
    let captures = pattern
        .captures(assignment)
        .ok_or_else(|| ConfigError::invalid("column", assignment, "expected <field>=<column>"))?;
    let name = captures.get(1).map(|matcher| matcher.as_str()).unwrap_or_default();
    let field = Field::parse(name).ok_or_else(|| ConfigError::UnknownOption(format!("{COLUMN_OPTION_PREFIX}{name}")))?;
    let index = match (captures.get(2), captures.get(3)) {
        (Some(letters), _) => col_to_index(letters.as_str()),
        (_, Some(number)) => number.as_str().parse::<usize>().ok(),
        _ => None,
    }
    .ok_or_else(|| ConfigError::invalid(field.as_str(), assignment, "column out of range"))?;
    Ok((field, index))
}

fn parse_bool(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(ConfigError::invalid(name, value, "expected true or false")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn defaults() {
        let config = ScheduleConfig::default();
        assert_eq!(config.header_row, 3);
        assert!(!config.skip_empty_rows);
        assert!(config.error_as_empty);
        assert_eq!(config.layout, ColumnLayout::default());
    }

    #[test]
    fn column_assignments_accept_letters_and_numbers() -> Result<(), ConfigError> {
        let mut layout = ColumnLayout::default();
        layout.assign("capacity=Q")?;
        assert_eq!(layout.index(Field::Capacity), 16);
        layout.assign(" takers = 9 ")?;
        assert_eq!(layout.index(Field::Takers), 9);

        let layout = ColumnLayout::try_from("room_b=j, day-b=k")?;
        assert_eq!(layout.index(Field::RoomB), 9);
        assert_eq!(layout.index(Field::DayB), 10);
        Ok(())
    }

    #[test]
    fn malformed_assignments_are_rejected() {
        let mut layout = ColumnLayout::default();
        assert_matches!(layout.assign("capacity"), Err(ConfigError::InvalidValue { .. }));
        assert_matches!(layout.assign("capacity=P1"), Err(ConfigError::InvalidValue { .. }));
        assert_matches!(layout.assign("seats=P"), Err(ConfigError::UnknownOption(name)) if name == "column.seats");
        assert_eq!(layout, ColumnLayout::default());
    }

    #[test]
    fn named_options() -> Result<(), ConfigError> {
        let mut config = ScheduleConfig::default();
        config.apply_options(["header_row=0", "skip_empty_rows=yes", "sheet=Fall*", "column.capacity=P"])?;
        assert_eq!(config.header_row, 0);
        assert!(config.skip_empty_rows);
        assert_eq!(config.sheet_name_pattern.as_deref(), Some("Fall*"));
        assert_eq!(config.layout.index(Field::Capacity), 15);

        let criteria = config.criteria()?;
        assert!(criteria.accept("Fall 2024"));
        assert!(!criteria.accept("Spring 2025"));
        Ok(())
    }

    #[test]
    fn invalid_options() {
        let mut config = ScheduleConfig::default();
        assert_matches!(config.set_option("colour", "red"), Err(ConfigError::UnknownOption(_)));
        assert_matches!(config.set_option("header_row", "-1"), Err(ConfigError::InvalidValue { .. }));
        assert_matches!(config.set_option("error_as_empty", "maybe"), Err(ConfigError::InvalidValue { .. }));
        assert_matches!(config.set_option("sheet", "[Fall"), Err(ConfigError::InvalidValue { .. }));
        assert_eq!(config, ScheduleConfig::default());
    }

    #[test]
    fn invalid_pattern_in_struct_fails_criteria() {
        let config = ScheduleConfig::default().with_sheet("[");
        assert_matches!(config.criteria(), Err(ConfigError::InvalidValue { name, .. }) if name == "sheet");
    }
}
