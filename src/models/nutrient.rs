//! Canonical nutrient keys and per-nutrient quantity pairs

use std::collections::BTreeMap;

use rmcp::schemars;
use serde::{Deserialize, Serialize};

/// Canonical nutrient row of the nutrition-facts table
///
/// Declaration order is matching priority and also the order keys appear in
/// serialized maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutrientKey {
    EnergiaKcal,
    ProteinasG,
    GrasaTotalG,
    GrasaSaturadaG,
    GrasaMonoinsaturadaG,
    GrasaPoliinsaturadaG,
    GrasaTransG,
    ColesterolMg,
    CarbohidratosDisponiblesG,
    AzucaresTotalesG,
    SodioMg,
    CalcioMg,
    FosforoMg,
}

impl NutrientKey {
    /// Every key, in matching priority order
    pub const ALL: [NutrientKey; 13] = [
        NutrientKey::EnergiaKcal,
        NutrientKey::ProteinasG,
        NutrientKey::GrasaTotalG,
        NutrientKey::GrasaSaturadaG,
        NutrientKey::GrasaMonoinsaturadaG,
        NutrientKey::GrasaPoliinsaturadaG,
        NutrientKey::GrasaTransG,
        NutrientKey::ColesterolMg,
        NutrientKey::CarbohidratosDisponiblesG,
        NutrientKey::AzucaresTotalesG,
        NutrientKey::SodioMg,
        NutrientKey::CalcioMg,
        NutrientKey::FosforoMg,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NutrientKey::EnergiaKcal => "energia_kcal",
            NutrientKey::ProteinasG => "proteinas_g",
            NutrientKey::GrasaTotalG => "grasa_total_g",
            NutrientKey::GrasaSaturadaG => "grasa_saturada_g",
            NutrientKey::GrasaMonoinsaturadaG => "grasa_monoinsaturada_g",
            NutrientKey::GrasaPoliinsaturadaG => "grasa_poliinsaturada_g",
            NutrientKey::GrasaTransG => "grasa_trans_g",
            NutrientKey::ColesterolMg => "colesterol_mg",
            NutrientKey::CarbohidratosDisponiblesG => "carbohidratos_disponibles_g",
            NutrientKey::AzucaresTotalesG => "azucares_totales_g",
            NutrientKey::SodioMg => "sodio_mg",
            NutrientKey::CalcioMg => "calcio_mg",
            NutrientKey::FosforoMg => "fosforo_mg",
        }
    }
}

impl std::fmt::Display for NutrientKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two readings of one nutrient row
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct NutrientQuantityPair {
    /// Per base quantity (per 100 g/ml)
    #[serde(rename = "por_base")]
    pub per_base: Option<f64>,
    /// Per declared serving
    #[serde(rename = "por_porcion")]
    pub per_serving: Option<f64>,
}

/// Extracted nutrients, at most one entry per key
pub type NutrientMap = BTreeMap<NutrientKey, NutrientQuantityPair>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_strings_match_serde() {
        for key in NutrientKey::ALL {
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
            assert_eq!(key.to_string(), key.as_str());
        }
    }

    #[test]
    fn test_map_serializes_in_priority_order() {
        let mut map = NutrientMap::new();
        map.insert(NutrientKey::SodioMg, NutrientQuantityPair::default());
        map.insert(
            NutrientKey::EnergiaKcal,
            NutrientQuantityPair { per_base: Some(250.0), per_serving: Some(62.5) },
        );
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(
            json,
            r#"{"energia_kcal":{"por_base":250.0,"por_porcion":62.5},"sodio_mg":{"por_base":null,"por_porcion":null}}"#
        );
    }
}
