//! Data models
//!
//! Types shared by the label pipeline, the engines and the tool layer.

mod fragment;
mod nutrient;
mod record;

pub use fragment::{Fragment, RawBox, Recognition, Rect};
pub use nutrient::{NutrientKey, NutrientMap, NutrientQuantityPair};
pub use record::{LabelRecord, LabelUnit, ProductMetadata, ServingInfo};
