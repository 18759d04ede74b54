// Utility functions

/// Parses a decimal that may use a comma as the decimal separator.
/// Returns `None` for empty, non-numeric or non-finite input.
pub fn parse_decimal(text: &str) -> Option<f64> {
    let cleaned = text.trim().replace(',', ".");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Formats a number the way the price lists print it: integral values keep one decimal.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
