//! Front-of-pack evaluation of extracted nutrients
//!
//! Nutri-Score (classic general-food algorithm) and the Chilean "ALTO EN"
//! warning seals, both computed from per-100 values.

mod inputs;
mod nutriscore;
mod seals;

pub use inputs::{from_nutrient_map, NutrientInput, NutrientInputs};
pub use nutriscore::{
    nutriscore, NegativePoints, NutriScore, NutriScoreGrade, NutriScoreInputs, PositivePoints,
    NUTRISCORE_ALGORITHM,
};
pub use seals::{chile_seals, ChileSeals, Seal, SealLimits, SealValues};

use serde::Serialize;

/// Both evaluations for one product
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelEvaluation {
    pub nutriscore_off: NutriScore,
    pub sellos_chile: ChileSeals,
}

pub fn evaluate(
    nutrients: &NutrientInputs,
    fvnl_pct: f64,
    is_cheese: bool,
    base_unit: Option<&str>,
) -> LabelEvaluation {
    LabelEvaluation {
        nutriscore_off: nutriscore(nutrients, fvnl_pct, is_cheese),
        sellos_chile: chile_seals(nutrients, base_unit),
    }
}
