//! Loosely typed nutrient input
//!
//! Callers send either the extractor's `{por_base, por_porcion}` pairs or a
//! bare per-100 number per key. Anything missing reads as zero.

use std::collections::BTreeMap;

use rmcp::schemars;
use serde::{Deserialize, Serialize};

use crate::models::{NutrientMap, NutrientQuantityPair};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(untagged)]
pub enum NutrientInput {
    /// Per-100 value
    Amount(f64),
    Pair(NutrientQuantityPair),
    Empty,
}

impl NutrientInput {
    /// The per-100 reading, zero when absent or not finite
    pub fn per_base(&self) -> f64 {
        let value = match self {
            NutrientInput::Amount(v) => *v,
            NutrientInput::Pair(pair) => pair.per_base.unwrap_or(0.0),
            NutrientInput::Empty => 0.0,
        };
        if value.is_finite() {
            value
        } else {
            0.0
        }
    }
}

/// Nutrient inputs keyed by free-form key name
pub type NutrientInputs = BTreeMap<String, NutrientInput>;

/// Per-100 value of the first key that is present and non-zero
pub(crate) fn first_nonzero(inputs: &NutrientInputs, keys: &[&str]) -> f64 {
    keys.iter()
        .map(|key| inputs.get(*key).map(NutrientInput::per_base).unwrap_or(0.0))
        .find(|v| *v != 0.0)
        .unwrap_or(0.0)
}

/// Re-key an extracted nutrient map for evaluation
pub fn from_nutrient_map(map: &NutrientMap) -> NutrientInputs {
    map.iter()
        .map(|(key, pair)| (key.as_str().to_string(), NutrientInput::Pair(*pair)))
        .collect()
}
