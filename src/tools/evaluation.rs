//! Label evaluation tools
//!
//! Wrap scoring results in the response envelopes the tools return.

use serde::Serialize;

use crate::scoring::{self, ChileSeals, LabelEvaluation, NutriScore, NutrientInputs};

/// Response for the nutriscore tool
#[derive(Debug, Serialize)]
pub struct NutriScoreResponse {
    pub nutriscore: NutriScore,
}

/// Response for the chile_seals tool
#[derive(Debug, Serialize)]
pub struct ChileSealsResponse {
    pub sellos_chile: ChileSeals,
}

pub fn nutriscore(nutrients: &NutrientInputs, fvnl_pct: f64, is_cheese: bool) -> NutriScoreResponse {
    NutriScoreResponse {
        nutriscore: scoring::nutriscore(nutrients, fvnl_pct, is_cheese),
    }
}

pub fn chile_seals(nutrients: &NutrientInputs, base_unit: Option<&str>) -> ChileSealsResponse {
    ChileSealsResponse {
        sellos_chile: scoring::chile_seals(nutrients, base_unit),
    }
}

pub fn evaluate_label(
    nutrients: &NutrientInputs,
    fvnl_pct: f64,
    is_cheese: bool,
    base_unit: Option<&str>,
) -> LabelEvaluation {
    scoring::evaluate(nutrients, fvnl_pct, is_cheese, base_unit)
}
