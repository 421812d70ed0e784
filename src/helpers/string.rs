//! Text conversion utilities shared by the spreadsheet readers and the schedule model.

/// Largest magnitude at which every integral `f64` is rendered exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992f64;

/// Renders a number the way a person would type it into a cell:
/// integral values lose their fractional part (`35.0` becomes `35`).
pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Normalizes a raw numeric cell value; non-numeric text is returned unchanged.
pub(crate) fn normalize_number(raw: &str) -> String {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => format_number(value),
        _ => raw.to_owned(),
    }
}

/// Returns true if the value is empty after trimming whitespace.
#[inline]
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_numbers_drop_fraction() {
        assert_eq!(format_number(35.0), "35");
        assert_eq!(format_number(-2.0), "-2");
        assert_eq!(format_number(12.5), "12.5");
    }

    #[test]
    fn normalize_keeps_text() {
        assert_eq!(normalize_number("900.0"), "900");
        assert_eq!(normalize_number("1E3"), "1000");
        assert_eq!(normalize_number("N/A"), "N/A");
        assert_eq!(normalize_number("NaN"), "NaN");
    }

    #[test]
    fn blank_detection_trims() {
        assert!(is_blank("   "));
        assert!(!is_blank(" x "));
    }
}
