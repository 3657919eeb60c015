//! Reading column and flag cells against a dialect's yes/no sets.

use panel_dialect::Dialect;
use panel_model::{ParamValue, ServiceFamily};

/// What a single cell says.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Mark {
    Blank,
    Yes,
    No,
    Number(f64),
    Text(String),
}

pub(crate) fn mark(dialect: &Dialect, family: ServiceFamily, value: &ParamValue) -> Mark {
    match value {
        ParamValue::Flag(true) => Mark::Yes,
        ParamValue::Flag(false) => Mark::No,
        _ => {
            let text = value.as_text();
            if text.is_empty() {
                Mark::Blank
            } else if dialect.is_yes(family, &text) {
                Mark::Yes
            } else if dialect.is_no(family, &text) {
                Mark::No
            } else if let Some(number) = value.as_f64() {
                Mark::Number(number)
            } else {
                Mark::Text(text)
            }
        }
    }
}

/// A cell holding a small whole number, read as a count.
pub(crate) fn small_count(value: &ParamValue, max: u32) -> Option<u32> {
    let number = value.as_f64()?;
    if number.fract() != 0.0 || number < 1.0 || number > f64::from(max) {
        return None;
    }
    Some(number as u32)
}

/// How a column cell is shown in the resolution trace.
pub(crate) fn column_input(header: &str, value: &ParamValue) -> String {
    format!("{header}={value}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_dialect::global_default;

    #[test]
    fn marks_follow_dialect_sets() {
        let dialect = global_default();
        let family = ServiceFamily::EdgeBand;
        assert_eq!(mark(&dialect, family, &ParamValue::from(" x ")), Mark::Yes);
        assert_eq!(mark(&dialect, family, &ParamValue::from("no")), Mark::No);
        assert_eq!(mark(&dialect, family, &ParamValue::from("")), Mark::Blank);
        assert_eq!(mark(&dialect, family, &ParamValue::from(0.8)), Mark::Number(0.8));
        assert_eq!(
            mark(&dialect, family, &ParamValue::from("PVC-WHITE")),
            Mark::Text("PVC-WHITE".to_string())
        );
        assert_eq!(small_count(&ParamValue::from("2"), 2), Some(2));
        assert_eq!(small_count(&ParamValue::from("3"), 2), None);
    }
}
