//! Label pipeline orchestration
//!
//! Fragments -> lines -> serving -> nutrients -> record. The public
//! `process_*` entry points always return a well-formed record; the `try_*`
//! variants expose the tagged failure instead.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::config::{PipelineConfig, BASE_QTY};
use crate::engine::{LabelImage, RecognitionEngine};
use crate::models::{Fragment, LabelRecord, LabelUnit, ProductMetadata, Recognition, ServingInfo};

use super::cluster::cluster_lines;
use super::error::{PipelineError, PipelineResult};
use super::extract::{AliasTableExtractor, NutrientExtractor};
use super::normalize::LineNormalizer;
use super::serving::detect_serving;

/// Unit assumed when no serving descriptor names one
pub const DEFAULT_UNIT: LabelUnit = LabelUnit::Milliliters;
/// Serving size assumed when none is detected
pub const DEFAULT_SERVING: f64 = 100.0;

/// Stateless label pipeline; one instance can serve any number of requests
#[derive(Debug, Clone)]
pub struct LabelPipeline<X = AliasTableExtractor> {
    config: PipelineConfig,
    extractor: X,
}

impl LabelPipeline<AliasTableExtractor> {
    pub fn new(config: PipelineConfig) -> Self {
        let extractor = AliasTableExtractor::new(config.trans_fat_recovery);
        Self { config, extractor }
    }
}

impl Default for LabelPipeline<AliasTableExtractor> {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl<X: NutrientExtractor> LabelPipeline<X> {
    /// Pipeline with a custom nutrient extraction stage
    pub fn with_extractor(config: PipelineConfig, extractor: X) -> Self {
        Self { config, extractor }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Reconstructed, normalized label lines
    pub fn lines(&self, fragments: &[Fragment]) -> Vec<String> {
        let normalizer = LineNormalizer::new(&self.config.replacements);
        cluster_lines(
            fragments,
            self.config.score_min,
            self.config.vertical_tolerance,
            &normalizer,
        )
    }

    pub fn try_process_fragments(
        &self,
        fragments: &[Fragment],
        product: &ProductMetadata,
    ) -> PipelineResult<LabelRecord> {
        self.read(fragments, product).map(|(record, _)| record)
    }

    fn read(
        &self,
        fragments: &[Fragment],
        product: &ProductMetadata,
    ) -> PipelineResult<(LabelRecord, Vec<String>)> {
        let lines = self.lines(fragments);
        let record = self.record_from_lines(&lines, product)?;
        Ok((record, lines))
    }

    fn record_from_lines(&self, lines: &[String], product: &ProductMetadata) -> PipelineResult<LabelRecord> {
        let detected = detect_serving(lines);

        let resolved = ServingInfo {
            serving: Some(detected.serving.unwrap_or(DEFAULT_SERVING)),
            unit: Some(detected.unit.unwrap_or(DEFAULT_UNIT)),
        };
        if detected != resolved {
            tracing::debug!("Serving defaults applied: detected {:?}", detected);
        }

        let nutrients = self.extractor.extract(lines, &resolved, BASE_QTY)?;

        Ok(LabelRecord {
            name: product.name.clone(),
            brand: product.brand.clone(),
            category: product.category.clone(),
            base_unit: resolved.unit,
            base_qty: BASE_QTY,
            serving: resolved.serving,
            nutrients,
        })
    }

    /// Like `try_process_fragments`, but an engine failure is an error too
    pub fn try_process_image(
        &self,
        engine: &dyn RecognitionEngine,
        image: &LabelImage,
        product: &ProductMetadata,
    ) -> PipelineResult<LabelRecord> {
        let recognition = engine.recognize(image)?;
        self.try_process_fragments(&recognition.fragments(), product)
    }

    /// Process fragments, falling back to the empty record on any failure
    pub fn process_fragments(&self, fragments: &[Fragment], product: ProductMetadata) -> LabelRecord {
        self.process_fragments_with_lines(fragments, product).0
    }

    /// Like `process_fragments`, also returning the normalized lines the
    /// record was read from. The lines are empty when the record is the
    /// fallback.
    pub fn process_fragments_with_lines(
        &self,
        fragments: &[Fragment],
        product: ProductMetadata,
    ) -> (LabelRecord, Vec<String>) {
        match guarded(|| self.read(fragments, &product)) {
            Ok(read) => read,
            Err(e) => (fallback(e, product), Vec::new()),
        }
    }

    /// Recognize an image and process it
    ///
    /// An engine failure counts as an empty recognition: the record carries
    /// the serving defaults and no nutrients.
    pub fn process_image(
        &self,
        engine: &dyn RecognitionEngine,
        image: &LabelImage,
        product: ProductMetadata,
    ) -> LabelRecord {
        let outcome = guarded(|| {
            let recognition = match engine.recognize(image) {
                Ok(recognition) => recognition,
                Err(e) => {
                    tracing::warn!("{}; continuing with no fragments", PipelineError::from(e));
                    Recognition::empty()
                }
            };
            self.try_process_fragments(&recognition.fragments(), &product)
        });
        settle(outcome, product)
    }
}

fn guarded<T, F>(run: F) -> PipelineResult<T>
where
    F: FnOnce() -> PipelineResult<T>,
{
    panic::catch_unwind(AssertUnwindSafe(run))
        .unwrap_or_else(|payload| Err(PipelineError::Panicked(panic_message(payload.as_ref()))))
}

fn settle(outcome: PipelineResult<LabelRecord>, product: ProductMetadata) -> LabelRecord {
    outcome.unwrap_or_else(|e| fallback(e, product))
}

fn fallback(error: PipelineError, product: ProductMetadata) -> LabelRecord {
    tracing::warn!("Returning fallback record: {}", error);
    LabelRecord::fallback(product, BASE_QTY)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
