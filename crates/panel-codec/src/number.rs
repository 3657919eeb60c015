//! Millimetre values inside shortcodes.

/// Regex fragment for one unsigned number; `,` is accepted as decimal separator.
pub(crate) const NUM: &str = r"(\d+(?:[.,]\d+)?)";

/// Parse a millimetre value as written in a code (`4`, `22.5`, `22,5`).
pub fn parse_mm(text: &str) -> Option<f64> {
    let value = text.trim().replace(',', ".").parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

/// Shortest spelling that parses back to the same value (`4.0` -> `4`).
pub fn format_mm(value: f64) -> String {
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_without_trailing_zero() {
        assert_eq!(format_mm(4.0), "4");
        assert_eq!(format_mm(22.5), "22.5");
        assert_eq!(parse_mm("22,5"), Some(22.5));
        assert_eq!(parse_mm("inf"), None);
    }
}
