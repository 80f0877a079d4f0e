//! Serving size and unit detection

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{LabelUnit, ServingInfo};

use super::numeric::last_two_numbers;

static GRAM_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bg\b").expect("valid gram regex"));

/// Find the serving descriptor, e.g. `Porción: un vaso (200 ml)`
///
/// Scans bracketed lines in order. The unit is taken from each bracketed
/// line that names one; the first bracketed line with a usable number fixes
/// the serving size and ends the scan. Zero is not a usable serving size.
pub fn detect_serving(lines: &[String]) -> ServingInfo {
    let mut info = ServingInfo::default();

    for line in lines {
        let lower = line.to_lowercase();
        if !(lower.contains('(') && lower.contains(')')) {
            continue;
        }

        if lower.contains("ml") {
            info.unit = Some(LabelUnit::Milliliters);
        } else if GRAM_WORD_RE.is_match(&lower) {
            info.unit = Some(LabelUnit::Grams);
        }

        let (a, b) = last_two_numbers(&lower);
        let candidate = a.filter(|v| *v != 0.0).or(b).filter(|v| *v != 0.0);
        if let Some(serving) = candidate {
            info.serving = Some(serving);
            tracing::debug!("Serving {} {:?} from line '{}'", serving, info.unit, line);
            break;
        }
    }

    info
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_volume_serving() {
        let info = detect_serving(&lines(&["INFORMACION NUTRICIONAL", "Porción: un vaso (200 ml)"]));
        assert_eq!(info.serving, Some(200.0));
        assert_eq!(info.unit, Some(LabelUnit::Milliliters));
    }

    #[test]
    fn test_leading_count_wins_over_bracketed_size() {
        // The first of the last two numbers is taken, even when it is a count
        let info = detect_serving(&lines(&["Porción: 1 vaso (200 ml)"]));
        assert_eq!(info.serving, Some(1.0));
        assert_eq!(info.unit, Some(LabelUnit::Milliliters));
    }

    #[test]
    fn test_mass_serving_uses_first_of_two_numbers() {
        let info = detect_serving(&lines(&["Porción 25 g (1 barra)", "Energía (kcal) 400 100"]));
        assert_eq!(info.serving, Some(25.0));
        assert_eq!(info.unit, Some(LabelUnit::Grams));
    }

    #[test]
    fn test_unit_requires_standalone_g() {
        let info = detect_serving(&lines(&["Sodio (mg) 450 113"]));
        assert_eq!(info.serving, Some(450.0));
        assert_eq!(info.unit, None);
    }

    #[test]
    fn test_bracketed_line_without_number_keeps_scanning() {
        let info = detect_serving(&lines(&["Porción (g)", "Porciones por envase: 10", "Una barra (30)"]));
        assert_eq!(info.serving, Some(30.0));
        assert_eq!(info.unit, Some(LabelUnit::Grams));
    }

    #[test]
    fn test_no_bracketed_line() {
        let info = detect_serving(&lines(&["Porcion 200 ml", "Sodio 45 90"]));
        assert_eq!(info, ServingInfo::default());
        assert_eq!(detect_serving(&[]), ServingInfo::default());
    }

    #[test]
    fn test_zero_serving_skipped() {
        let info = detect_serving(&lines(&["Grasa trans (g) 0", "Porción (30 g)"]));
        assert_eq!(info.serving, Some(30.0));
        assert_eq!(info.unit, Some(LabelUnit::Grams));
    }
}
