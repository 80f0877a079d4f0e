//! Nutrition label reconstruction
//!
//! Turns recognized text fragments into label lines, a serving size and
//! per-nutrient quantity pairs.

pub mod cluster;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod numeric;
pub mod pipeline;
pub mod serving;

pub use cluster::{cluster_lines, group_lines};
pub use error::{PipelineError, PipelineResult};
pub use extract::{extract_nutrients, match_key, AliasRule, AliasTableExtractor, NutrientExtractor, ALIAS_TABLE};
pub use normalize::{LineNormalizer, Replacement, DEFAULT_REPLACEMENTS};
pub use numeric::{last_two_numbers, parse_number, round3, scale};
pub use pipeline::{LabelPipeline, DEFAULT_SERVING, DEFAULT_UNIT};
pub use serving::detect_serving;
