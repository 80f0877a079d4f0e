//! Serving information and the final label record

use serde::{Deserialize, Serialize};

use super::nutrient::NutrientMap;

/// Measurement unit of the label's reference quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelUnit {
    /// Mass, label values per 100 g
    #[serde(rename = "g")]
    Grams,
    /// Volume, label values per 100 ml
    #[serde(rename = "ml")]
    Milliliters,
}

impl LabelUnit {
    pub fn canonical_unit(&self) -> &'static str {
        match self {
            LabelUnit::Grams => "g",
            LabelUnit::Milliliters => "ml",
        }
    }
}

/// Detected serving size and unit; either may be missing
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ServingInfo {
    #[serde(rename = "porcion")]
    pub serving: Option<f64>,
    #[serde(rename = "unidad")]
    pub unit: Option<LabelUnit>,
}

/// Identifying metadata supplied by the caller and passed through untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductMetadata {
    #[serde(rename = "nombre")]
    pub name: Option<String>,
    #[serde(rename = "marca")]
    pub brand: Option<String>,
    #[serde(rename = "categoria")]
    pub category: Option<String>,
}

/// Structured nutrition-facts record for one label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelRecord {
    #[serde(rename = "nombre")]
    pub name: Option<String>,
    #[serde(rename = "marca")]
    pub brand: Option<String>,
    #[serde(rename = "categoria")]
    pub category: Option<String>,
    #[serde(rename = "unidad_base")]
    pub base_unit: Option<LabelUnit>,
    pub base_qty: f64,
    #[serde(rename = "porcion")]
    pub serving: Option<f64>,
    #[serde(rename = "nutrientes")]
    pub nutrients: NutrientMap,
}

impl LabelRecord {
    /// Best-effort record returned when the pipeline fails
    pub fn fallback(product: ProductMetadata, base_qty: f64) -> Self {
        Self {
            name: product.name,
            brand: product.brand,
            category: product.category,
            base_unit: None,
            base_qty,
            serving: None,
            nutrients: NutrientMap::new(),
        }
    }
}
