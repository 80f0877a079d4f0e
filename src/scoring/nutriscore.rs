//! Nutri-Score, classic algorithm for general foods

use serde::Serialize;

use super::inputs::{first_nonzero, NutrientInputs};

pub const NUTRISCORE_ALGORITHM: &str = "off_food_classic_v1";

const KJ_PER_KCAL: f64 = 4.184;

// Negative components, 0..=10 points each
const NEG_ENERGY_KJ: [f64; 10] = [335.0, 670.0, 1005.0, 1340.0, 1675.0, 2010.0, 2345.0, 2680.0, 3015.0, 3350.0];
const NEG_SUGARS_G: [f64; 10] = [4.5, 9.0, 13.5, 18.0, 22.5, 27.0, 31.0, 36.0, 40.0, 45.0];
const NEG_SAT_FAT_G: [f64; 10] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
const NEG_SODIUM_MG: [f64; 10] = [90.0, 180.0, 270.0, 360.0, 450.0, 540.0, 630.0, 720.0, 810.0, 900.0];

// Positive components, 0..=5 points each
const POS_FIBER_G: [f64; 5] = [0.9, 1.9, 2.8, 3.7, 4.7];
const POS_PROTEIN_G: [f64; 5] = [1.6, 3.2, 4.8, 6.4, 8.0];

/// Protein only counts below this many negative points (cheese excepted)
const PROTEIN_NEGATIVE_CAP: u32 = 11;

const SUGAR_KEYS: &[&str] = &["azucares_g", "azucar_g", "azucares_totales_g"];
const SAT_FAT_KEYS: &[&str] = &["grasa_saturada_g", "grasas_saturadas_g"];
const PROTEIN_KEYS: &[&str] = &["proteinas_g", "proteina_g"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NutriScoreGrade {
    A,
    B,
    C,
    D,
    E,
}

impl NutriScoreGrade {
    pub fn from_score(score: i32) -> Self {
        match score {
            i32::MIN..=-1 => NutriScoreGrade::A,
            0..=2 => NutriScoreGrade::B,
            3..=10 => NutriScoreGrade::C,
            11..=18 => NutriScoreGrade::D,
            _ => NutriScoreGrade::E,
        }
    }
}

/// Per-100 values the score was computed from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutriScoreInputs {
    pub energy_kj: f64,
    pub sugars_g: f64,
    pub sat_fat_g: f64,
    pub sodium_mg: f64,
    pub fiber_g: f64,
    pub protein_g: f64,
    pub fvnl_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NegativePoints {
    pub energy: u32,
    pub sugars: u32,
    pub sat_fat: u32,
    pub sodium: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PositivePoints {
    pub fvnl: u32,
    pub fiber: u32,
    pub protein: u32,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutriScore {
    pub inputs_100: NutriScoreInputs,
    pub neg_points: NegativePoints,
    pub pos_points: PositivePoints,
    pub final_score: i32,
    pub letter: NutriScoreGrade,
    pub algo: &'static str,
}

/// Index of the first threshold the value does not exceed
fn points_from_thresholds(value: f64, thresholds: &[f64]) -> u32 {
    thresholds
        .iter()
        .position(|t| value <= *t)
        .unwrap_or(thresholds.len()) as u32
}

/// Fruit, vegetable and nut content points
fn fvnl_points(pct: f64) -> u32 {
    if pct >= 80.0 {
        5
    } else if pct >= 60.0 {
        2
    } else if pct >= 40.0 {
        1
    } else {
        0
    }
}

/// Compute the Nutri-Score from per-100 nutrient values
pub fn nutriscore(nutrients: &NutrientInputs, fvnl_pct: f64, is_cheese: bool) -> NutriScore {
    let fvnl_pct = if fvnl_pct.is_finite() { fvnl_pct } else { 0.0 };

    let energy_kcal = first_nonzero(nutrients, &["energia_kcal"]);
    let sugars_g = first_nonzero(nutrients, SUGAR_KEYS);
    let sat_fat_g = first_nonzero(nutrients, SAT_FAT_KEYS);
    let sodium_mg = first_nonzero(nutrients, &["sodio_mg"]);
    let fiber_g = first_nonzero(nutrients, &["fibra_g"]);
    let protein_g = first_nonzero(nutrients, PROTEIN_KEYS);

    let energy_kj = energy_kcal * KJ_PER_KCAL;

    let mut neg = NegativePoints {
        energy: points_from_thresholds(energy_kj, &NEG_ENERGY_KJ),
        sugars: points_from_thresholds(sugars_g, &NEG_SUGARS_G),
        sat_fat: points_from_thresholds(sat_fat_g, &NEG_SAT_FAT_G),
        sodium: points_from_thresholds(sodium_mg, &NEG_SODIUM_MG),
        total: 0,
    };
    neg.total = neg.energy + neg.sugars + neg.sat_fat + neg.sodium;

    let mut pos = PositivePoints {
        fvnl: fvnl_points(fvnl_pct),
        fiber: points_from_thresholds(fiber_g, &POS_FIBER_G),
        protein: points_from_thresholds(protein_g, &POS_PROTEIN_G),
        total: 0,
    };
    pos.total = if neg.total < PROTEIN_NEGATIVE_CAP || is_cheese {
        pos.fvnl + pos.fiber + pos.protein
    } else {
        pos.fvnl + pos.fiber
    };

    let final_score = neg.total as i32 - pos.total as i32;

    NutriScore {
        inputs_100: NutriScoreInputs {
            energy_kj: (energy_kj * 100.0).round() / 100.0,
            sugars_g,
            sat_fat_g,
            sodium_mg,
            fiber_g,
            protein_g,
            fvnl_pct,
        },
        neg_points: neg,
        pos_points: pos,
        final_score,
        letter: NutriScoreGrade::from_score(final_score),
        algo: NUTRISCORE_ALGORITHM,
    }
}
