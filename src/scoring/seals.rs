//! Chilean "ALTO EN" warning seals

use serde::Serialize;

use super::inputs::{first_nonzero, NutrientInputs};

/// A front-of-pack warning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Seal {
    #[serde(rename = "ALTO EN CALORÍAS")]
    Calories,
    #[serde(rename = "ALTO EN AZÚCARES")]
    Sugars,
    #[serde(rename = "ALTO EN GRASAS SATURADAS")]
    SaturatedFat,
    #[serde(rename = "ALTO EN SODIO")]
    Sodium,
}

/// Per-100 limits; a value at or above its limit earns the seal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SealLimits {
    pub energy_kcal: f64,
    pub sugars_g: f64,
    pub sat_fat_g: f64,
    pub sodium_mg: f64,
}

impl SealLimits {
    pub const SOLIDS: SealLimits = SealLimits {
        energy_kcal: 275.0,
        sugars_g: 10.0,
        sat_fat_g: 4.0,
        sodium_mg: 400.0,
    };

    pub const LIQUIDS: SealLimits = SealLimits {
        energy_kcal: 70.0,
        sugars_g: 5.0,
        sat_fat_g: 3.0,
        sodium_mg: 100.0,
    };
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SealValues {
    pub energia_kcal: f64,
    pub azucares_g: f64,
    pub grasa_saturada_g: f64,
    pub sodio_mg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChileSeals {
    pub unidad_base: Option<String>,
    pub categoria_liquido: bool,
    pub valores_100: SealValues,
    pub sellos: Vec<Seal>,
    pub cumple_sin_sellos: bool,
}

fn is_liquid(unit: &str) -> bool {
    unit.contains("ml") || unit == "l" || unit.contains("litro")
}

/// Evaluate the warning seals for per-100 values in `base_unit`
pub fn chile_seals(nutrients: &NutrientInputs, base_unit: Option<&str>) -> ChileSeals {
    let unit = base_unit.unwrap_or("").trim().to_lowercase();
    let liquid = is_liquid(&unit);
    let limits = if liquid {
        SealLimits::LIQUIDS
    } else {
        SealLimits::SOLIDS
    };

    let values = SealValues {
        energia_kcal: first_nonzero(nutrients, &["energia_kcal"]),
        azucares_g: first_nonzero(nutrients, &["azucares_g", "azucar_g", "azucares_totales_g"]),
        grasa_saturada_g: first_nonzero(nutrients, &["grasa_saturada_g", "grasas_saturadas_g"]),
        sodio_mg: first_nonzero(nutrients, &["sodio_mg"]),
    };

    let checks = [
        (Seal::Calories, values.energia_kcal, limits.energy_kcal),
        (Seal::Sugars, values.azucares_g, limits.sugars_g),
        (Seal::SaturatedFat, values.grasa_saturada_g, limits.sat_fat_g),
        (Seal::Sodium, values.sodio_mg, limits.sodium_mg),
    ];
    let seals: Vec<Seal> = checks
        .iter()
        .filter(|(_, value, limit)| value >= limit)
        .map(|(seal, _, _)| *seal)
        .collect();

    ChileSeals {
        unidad_base: (!unit.is_empty()).then_some(unit),
        categoria_liquido: liquid,
        valores_100: values,
        cumple_sin_sellos: seals.is_empty(),
        sellos: seals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::NutrientInput;

    fn inputs(pairs: &[(&str, f64)]) -> NutrientInputs {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), NutrientInput::Amount(*v)))
            .collect()
    }

    #[test]
    fn test_liquid_detection() {
        assert!(is_liquid("ml"));
        assert!(is_liquid("l"));
        assert!(is_liquid("litros"));
        assert!(!is_liquid("g"));
        assert!(!is_liquid(""));
    }

    #[test]
    fn test_solid_limits_inclusive() {
        let result = chile_seals(
            &inputs(&[("energia_kcal", 275.0), ("azucares_totales_g", 9.9), ("sodio_mg", 400.0)]),
            Some("g"),
        );
        assert!(!result.categoria_liquido);
        assert_eq!(result.sellos, vec![Seal::Calories, Seal::Sodium]);
        assert!(!result.cumple_sin_sellos);
        assert_eq!(result.valores_100.azucares_g, 9.9);
    }

    #[test]
    fn test_liquid_limits_are_stricter() {
        let nutrients = inputs(&[("energia_kcal", 80.0), ("azucares_g", 6.0)]);
        let as_liquid = chile_seals(&nutrients, Some("ML"));
        assert_eq!(as_liquid.unidad_base.as_deref(), Some("ml"));
        assert_eq!(as_liquid.sellos, vec![Seal::Calories, Seal::Sugars]);

        let as_solid = chile_seals(&nutrients, None);
        assert_eq!(as_solid.unidad_base, None);
        assert!(as_solid.cumple_sin_sellos);
    }

    #[test]
    fn test_seal_labels_serialize() {
        let json = serde_json::to_string(&vec![Seal::SaturatedFat]).unwrap();
        assert_eq!(json, r#"["ALTO EN GRASAS SATURADAS"]"#);
    }
}
