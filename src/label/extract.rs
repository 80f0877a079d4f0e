//! Nutrient row matching and column extraction

use crate::config::TransFatRecovery;
use crate::models::{NutrientKey, NutrientMap, NutrientQuantityPair, ServingInfo};

use super::error::PipelineResult;
use super::numeric::{last_two_numbers, round3, scale};

/// Lowercase substrings that identify one nutrient row
#[derive(Debug, Clone, Copy)]
pub struct AliasRule {
    pub key: NutrientKey,
    pub aliases: &'static [&'static str],
}

impl AliasRule {
    pub fn matches(&self, line_lower: &str) -> bool {
        self.aliases.iter().any(|alias| line_lower.contains(alias))
    }
}

/// Rules in priority order; a line can contain substrings of several keys
/// (e.g. "grasa total" and "grasa saturada" rows both say "grasa").
pub const ALIAS_TABLE: &[AliasRule] = &[
    AliasRule {
        key: NutrientKey::EnergiaKcal,
        aliases: &["energía (kcal)", "energia (kcal)", "energia"],
    },
    AliasRule {
        key: NutrientKey::ProteinasG,
        aliases: &["proteinas (g)", "proteinas"],
    },
    AliasRule {
        key: NutrientKey::GrasaTotalG,
        aliases: &["grasa total (g)", "grasa total"],
    },
    AliasRule {
        key: NutrientKey::GrasaSaturadaG,
        aliases: &["grasa saturada (g)", "grasa saturada"],
    },
    AliasRule {
        key: NutrientKey::GrasaMonoinsaturadaG,
        aliases: &["grasa monoinsaturada (g)", "monoinsaturada (g)", "monoinsaturada"],
    },
    AliasRule {
        key: NutrientKey::GrasaPoliinsaturadaG,
        aliases: &["grasa poliinsaturada (g)", "poliinsaturada (g)", "poliinsaturada"],
    },
    AliasRule {
        key: NutrientKey::GrasaTransG,
        aliases: &["grasa trans (g)", " trans (g)"],
    },
    AliasRule {
        key: NutrientKey::ColesterolMg,
        aliases: &["colesterol (mg)", "colesterol"],
    },
    AliasRule {
        key: NutrientKey::CarbohidratosDisponiblesG,
        aliases: &["carbohidratos disponibles (g)", "carbohidratos disponibles"],
    },
    AliasRule {
        key: NutrientKey::AzucaresTotalesG,
        aliases: &["azucares totales (g)", "azúcares totales (g)", "azucares totales"],
    },
    AliasRule {
        key: NutrientKey::SodioMg,
        aliases: &["sodio (mg)", "sodio"],
    },
    AliasRule {
        key: NutrientKey::CalcioMg,
        aliases: &["calcio (mg)", "calcio"],
    },
    AliasRule {
        key: NutrientKey::FosforoMg,
        aliases: &["fosforo (mg)", "fósforo (mg)", "fosforo"],
    },
];

/// First key whose rule matches the lowercased line
pub fn match_key(line_lower: &str) -> Option<NutrientKey> {
    ALIAS_TABLE
        .iter()
        .find(|rule| rule.matches(line_lower))
        .map(|rule| rule.key)
}

/// Turns normalized lines into per-nutrient quantity pairs
pub trait NutrientExtractor: Send + Sync {
    fn extract(
        &self,
        lines: &[String],
        serving: &ServingInfo,
        base_qty: f64,
    ) -> PipelineResult<NutrientMap>;
}

/// Alias-table matching with a configurable trans-fat recovery
#[derive(Debug, Clone, Copy, Default)]
pub struct AliasTableExtractor {
    pub trans_fat_recovery: TransFatRecovery,
}

impl AliasTableExtractor {
    pub fn new(trans_fat_recovery: TransFatRecovery) -> Self {
        Self { trans_fat_recovery }
    }
}

impl NutrientExtractor for AliasTableExtractor {
    fn extract(
        &self,
        lines: &[String],
        serving: &ServingInfo,
        base_qty: f64,
    ) -> PipelineResult<NutrientMap> {
        Ok(extract_nutrients(
            lines,
            serving.serving,
            base_qty,
            self.trans_fat_recovery,
        ))
    }
}

/// Extract every recognized nutrient row
///
/// The first value column is read as per `base_qty`, the second as per
/// serving; whichever is missing is scaled from the other. When a key matches
/// several lines the last one wins.
pub fn extract_nutrients(
    lines: &[String],
    serving: Option<f64>,
    base_qty: f64,
    recovery: TransFatRecovery,
) -> NutrientMap {
    let mut nutrients = NutrientMap::new();
    let mut previous_key: Option<NutrientKey> = None;

    for line in lines {
        let lower = line.to_lowercase();

        let Some(key) = match_key(&lower) else {
            if recovers_trans_fat(&lower, recovery, previous_key, &nutrients) {
                tracing::debug!("Recovered trans fat row from '{}'", line);
                nutrients.insert(NutrientKey::GrasaTransG, recovered_pair(line, serving, base_qty));
            }
            previous_key = None;
            continue;
        };

        let pair = column_pair(line, serving, base_qty);
        tracing::trace!("{} = {:?} from '{}'", key, pair, line);
        nutrients.insert(key, pair);
        previous_key = Some(key);
    }

    tracing::debug!("Extracted {} nutrients from {} lines", nutrients.len(), lines.len());
    nutrients
}

fn recovers_trans_fat(
    lower: &str,
    recovery: TransFatRecovery,
    previous_key: Option<NutrientKey>,
    nutrients: &NutrientMap,
) -> bool {
    if !lower.contains("(g)") {
        return false;
    }
    match recovery {
        TransFatRecovery::LiteralValue => lower.contains("0,13") || lower.contains("0.13"),
        TransFatRecovery::Positional => {
            previous_key == Some(NutrientKey::GrasaPoliinsaturadaG)
                && !nutrients.contains_key(&NutrientKey::GrasaTransG)
        }
        TransFatRecovery::Off => false,
    }
}

fn column_pair(line: &str, serving: Option<f64>, base_qty: f64) -> NutrientQuantityPair {
    let (mut per_base, mut per_serving) = last_two_numbers(line);

    if per_serving.is_none() && per_base.is_some() && serving.is_some() {
        per_serving = scale(per_base, Some(base_qty), serving);
    }
    if per_base.is_none() && per_serving.is_some() && serving.is_some() {
        per_base = scale(per_serving, serving, Some(base_qty));
    }

    NutrientQuantityPair {
        per_base: per_base.map(round3),
        per_serving: per_serving.map(round3),
    }
}

fn recovered_pair(line: &str, serving: Option<f64>, base_qty: f64) -> NutrientQuantityPair {
    let (v1, v2) = last_two_numbers(line);
    let per_serving = v2.or_else(|| scale(v1, Some(base_qty), serving));

    NutrientQuantityPair {
        per_base: v1.map(round3),
        per_serving: per_serving.map(round3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn pair(per_base: Option<f64>, per_serving: Option<f64>) -> NutrientQuantityPair {
        NutrientQuantityPair { per_base, per_serving }
    }

    #[test]
    fn test_match_key_priority() {
        assert_eq!(match_key("energía (kcal) 250 62"), Some(NutrientKey::EnergiaKcal));
        assert_eq!(match_key("grasa saturada (g) 1,2 0,3"), Some(NutrientKey::GrasaSaturadaG));
        assert_eq!(match_key("grasa trans (g) 0 0"), Some(NutrientKey::GrasaTransG));
        assert_eq!(match_key("azúcares totales (g) 5 1"), Some(NutrientKey::AzucaresTotalesG));
        // Both "proteinas" and "sodio" appear; the earlier rule wins
        assert_eq!(match_key("proteinas y sodio"), Some(NutrientKey::ProteinasG));
        assert_eq!(match_key("fibra dietetica (g) 2 1"), None);
    }

    #[test]
    fn test_alias_table_covers_every_key_once() {
        let keys: Vec<NutrientKey> = ALIAS_TABLE.iter().map(|r| r.key).collect();
        assert_eq!(keys, NutrientKey::ALL.to_vec());
    }

    #[test]
    fn test_both_columns_read() {
        let map = extract_nutrients(
            &lines(&["Sodio (mg) 450 113"]),
            Some(100.0),
            100.0,
            TransFatRecovery::LiteralValue,
        );
        assert_eq!(map.len(), 1);
        assert_eq!(map[&NutrientKey::SodioMg], pair(Some(450.0), Some(113.0)));
    }

    #[test]
    fn test_missing_serving_column_scaled() {
        let map = extract_nutrients(
            &lines(&["Proteinas (g) 8"]),
            Some(25.0),
            100.0,
            TransFatRecovery::LiteralValue,
        );
        assert_eq!(map[&NutrientKey::ProteinasG], pair(Some(8.0), Some(2.0)));
    }

    #[test]
    fn test_missing_serving_column_without_serving_size() {
        let map = extract_nutrients(&lines(&["Proteinas (g) 8"]), None, 100.0, TransFatRecovery::Off);
        assert_eq!(map[&NutrientKey::ProteinasG], pair(Some(8.0), None));
    }

    #[test]
    fn test_matched_line_without_numbers() {
        let map = extract_nutrients(&lines(&["Colesterol (mg)"]), Some(30.0), 100.0, TransFatRecovery::Off);
        assert_eq!(map[&NutrientKey::ColesterolMg], pair(None, None));
    }

    #[test]
    fn test_values_rounded_to_three_decimals() {
        let map = extract_nutrients(
            &lines(&["Calcio (mg) 10"]),
            Some(33.0),
            100.0,
            TransFatRecovery::Off,
        );
        assert_eq!(map[&NutrientKey::CalcioMg], pair(Some(10.0), Some(3.3)));

        let map = extract_nutrients(
            &lines(&["Calcio (mg) 1,23456 0,98765"]),
            Some(33.0),
            100.0,
            TransFatRecovery::Off,
        );
        assert_eq!(map[&NutrientKey::CalcioMg], pair(Some(1.235), Some(0.988)));
    }

    #[test]
    fn test_last_matching_line_wins() {
        let map = extract_nutrients(
            &lines(&["Sodio (mg) 450 113", "Sodio 500 125"]),
            Some(25.0),
            100.0,
            TransFatRecovery::Off,
        );
        assert_eq!(map.len(), 1);
        assert_eq!(map[&NutrientKey::SodioMg], pair(Some(500.0), Some(125.0)));
    }

    #[test]
    fn test_literal_trans_fat_recovery() {
        let table = lines(&["Grasa tr4ns (g) 0,13 0,03"]);
        let map = extract_nutrients(&table, Some(25.0), 100.0, TransFatRecovery::LiteralValue);
        assert_eq!(map[&NutrientKey::GrasaTransG], pair(Some(0.13), Some(0.03)));

        let single = lines(&["G. tr. (g) 0.13"]);
        let map = extract_nutrients(&single, Some(200.0), 100.0, TransFatRecovery::LiteralValue);
        assert_eq!(map[&NutrientKey::GrasaTransG], pair(Some(0.13), Some(0.26)));

        let map = extract_nutrients(&table, Some(25.0), 100.0, TransFatRecovery::Off);
        assert!(map.is_empty());
    }

    #[test]
    fn test_positional_trans_fat_recovery() {
        let table = lines(&[
            "Grasa poliinsaturada (g) 0,4 0,1",
            "Gr@s@ tr@ns (g) 0,2 0,05",
            "Colesterol (mg) 5 1",
            "?? (g) 9 9",
        ]);
        let map = extract_nutrients(&table, Some(25.0), 100.0, TransFatRecovery::Positional);
        assert_eq!(map[&NutrientKey::GrasaTransG], pair(Some(0.2), Some(0.05)));
        assert_eq!(map.len(), 3);

        // The literal rule does not fire on a row without the 0,13 value
        let map = extract_nutrients(&table, Some(25.0), 100.0, TransFatRecovery::LiteralValue);
        assert!(!map.contains_key(&NutrientKey::GrasaTransG));
    }

    #[test]
    fn test_extractor_trait_uses_serving() {
        let extractor = AliasTableExtractor::new(TransFatRecovery::LiteralValue);
        let serving = ServingInfo { serving: Some(50.0), unit: None };
        let map = extractor
            .extract(&lines(&["Energía (kcal) 200"]), &serving, 100.0)
            .unwrap();
        assert_eq!(map[&NutrientKey::EnergiaKcal], pair(Some(200.0), Some(100.0)));
    }
}
