//! Numeric token parsing
//!
//! Label values use either `.` or `,` as decimal separator and sometimes
//! carry a percent sign. Failures are expressed as None, never as errors.

use std::sync::LazyLock;

use regex::Regex;

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-+]?\d+(?:[.,]\d+)?").expect("valid number regex"));

/// Parse a number token such as `"3,2"`, `" 12.5 "` or `"8%"`
pub fn parse_number(text: &str) -> Option<f64> {
    let cleaned = text.replace(',', ".").replace('%', "");
    cleaned.trim().parse::<f64>().ok()
}

/// The last two numeric values of a line, in reading order
///
/// Nutrition tables print two value columns per row (per 100 and per
/// serving); anything earlier on the line is treated as noise.
/// One value yields `(v, None)`, none yields `(None, None)`.
pub fn last_two_numbers(line: &str) -> (Option<f64>, Option<f64>) {
    let values: Vec<f64> = NUMBER_RE
        .find_iter(line)
        .filter_map(|m| parse_number(m.as_str()))
        .collect();

    match values.as_slice() {
        [] => (None, None),
        [only] => (Some(*only), None),
        [.., a, b] => (Some(*a), Some(*b)),
    }
}

/// Round to 3 decimal places
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Proportional scaling, `value * to_qty / from_qty` rounded to 3 decimals
///
/// None when any input is missing, `from_qty` is zero, or the result is not
/// finite.
pub fn scale(value: Option<f64>, from_qty: Option<f64>, to_qty: Option<f64>) -> Option<f64> {
    let (value, from_qty, to_qty) = (value?, from_qty?, to_qty?);
    if from_qty == 0.0 {
        return None;
    }
    let scaled = value * to_qty / from_qty;
    scaled.is_finite().then(|| round3(scaled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_separators() {
        assert_eq!(parse_number("3,2"), Some(3.2));
        assert_eq!(parse_number(" 12.5 "), Some(12.5));
        assert_eq!(parse_number("8%"), Some(8.0));
        assert_eq!(parse_number("-0,75 %"), Some(-0.75));
    }

    #[test]
    fn test_parse_number_failures() {
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("1,2,3"), None);
    }

    #[test]
    fn test_parse_number_round_trip() {
        for v in [0.0, 1.5, 250.0, 0.013, 1234.567, -4.25] {
            let dotted = format!("{}", v);
            let comma = dotted.replace('.', ",");
            assert!((parse_number(&dotted).unwrap() - v).abs() < 1e-9);
            assert!((parse_number(&comma).unwrap() - v).abs() < 1e-9);
            assert!((parse_number(&format!("{}%", comma)).unwrap() - v).abs() < 1e-9);
        }
    }

    #[test]
    fn test_last_two_numbers() {
        assert_eq!(last_two_numbers("ABC123 12 0,5 3,2"), (Some(0.5), Some(3.2)));
        assert_eq!(last_two_numbers("solo 7"), (Some(7.0), None));
        assert_eq!(last_two_numbers("sin numeros"), (None, None));
        assert_eq!(last_two_numbers("Sodio (mg) 450 113"), (Some(450.0), Some(113.0)));
    }

    #[test]
    fn test_scale() {
        assert_eq!(scale(Some(10.0), Some(100.0), Some(250.0)), Some(25.0));
        assert_eq!(scale(None, Some(100.0), Some(250.0)), None);
        assert_eq!(scale(Some(10.0), Some(0.0), Some(250.0)), None);
        assert_eq!(scale(Some(10.0), Some(100.0), None), None);
        assert_eq!(scale(Some(1.0), Some(3.0), Some(1.0)), Some(0.333));
    }
}
