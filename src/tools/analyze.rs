//! Label analysis tools

use serde::Serialize;

use crate::engine::{LabelImage, RecognitionEngine};
use crate::label::LabelPipeline;
use crate::models::{LabelRecord, ProductMetadata, Recognition};

/// Response for analyze_label_fragments / analyze_label_image
#[derive(Debug, Serialize)]
pub struct AnalyzeLabelResponse {
    #[serde(flatten)]
    pub record: LabelRecord,
    /// Reconstructed label lines, only when requested
    #[serde(rename = "lineas", skip_serializing_if = "Option::is_none")]
    pub lines: Option<Vec<String>>,
}

/// Run the pipeline over fragments supplied by the caller
pub fn analyze_fragments(
    pipeline: &LabelPipeline,
    recognition: &Recognition,
    product: ProductMetadata,
    include_lines: bool,
) -> AnalyzeLabelResponse {
    let fragments = recognition.fragments();
    if fragments.len() != recognition.texts.len() {
        tracing::warn!(
            "Parallel sequences differ in length ({} texts, {} scores, {} boxes); extra entries ignored",
            recognition.texts.len(),
            recognition.scores.len(),
            recognition.boxes.len()
        );
    }

    let (record, lines) = pipeline.process_fragments_with_lines(&fragments, product);
    AnalyzeLabelResponse {
        record,
        lines: include_lines.then_some(lines),
    }
}

/// Recognize a base64 image with `engine` and run the pipeline
pub fn analyze_image(
    pipeline: &LabelPipeline,
    engine: &dyn RecognitionEngine,
    image_b64: &str,
    product: ProductMetadata,
) -> Result<AnalyzeLabelResponse, String> {
    let image = LabelImage::new(image_b64);
    if image.is_empty() {
        return Err("Missing 'image_b64'".to_string());
    }

    Ok(AnalyzeLabelResponse {
        record: pipeline.process_image(engine, &image, product),
        lines: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::StaticRecognitionEngine;
    use crate::models::RawBox;

    fn label() -> Recognition {
        Recognition {
            texts: vec![
                "Porción: un vaso".into(),
                "(200 mi)".into(),
                "Energía (kcal)".into(),
                "60".into(),
                "120".into(),
                "Sodio (mg)".into(),
                "45".into(),
            ],
            scores: [0.98, 0.95, 0.99, 0.97, 0.96, 0.99, 0.94].map(Some).to_vec(),
            boxes: vec![
                RawBox::Flat(vec![10.0, 10.0, 150.0, 30.0]),
                RawBox::Flat(vec![160.0, 12.0, 230.0, 32.0]),
                RawBox::Flat(vec![10.0, 60.0, 150.0, 80.0]),
                RawBox::Flat(vec![200.0, 61.0, 230.0, 81.0]),
                RawBox::Flat(vec![300.0, 59.0, 340.0, 79.0]),
                RawBox::Flat(vec![10.0, 100.0, 120.0, 120.0]),
                RawBox::Flat(vec![200.0, 101.0, 230.0, 121.0]),
            ],
        }
    }

    #[test]
    fn test_full_label() {
        let pipeline = LabelPipeline::default();
        let response = analyze_fragments(&pipeline, &label(), ProductMetadata::default(), true);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["unidad_base"], "ml");
        assert_eq!(json["porcion"], 200.0);
        assert_eq!(json["base_qty"], 100.0);
        assert_eq!(json["nutrientes"]["energia_kcal"]["por_base"], 60.0);
        assert_eq!(json["nutrientes"]["energia_kcal"]["por_porcion"], 120.0);
        assert_eq!(json["nutrientes"]["sodio_mg"]["por_porcion"], 90.0);
        assert_eq!(json["lineas"][0], "Porción: un vaso (200 ml)");
    }

    #[test]
    fn test_lines_omitted_by_default() {
        let pipeline = LabelPipeline::default();
        let response = analyze_fragments(&pipeline, &label(), ProductMetadata::default(), false);
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("lineas").is_none());
    }

    #[test]
    fn test_image_requires_payload() {
        let pipeline = LabelPipeline::default();
        let engine = StaticRecognitionEngine::new(label());
        assert!(analyze_image(&pipeline, &engine, "", ProductMetadata::default()).is_err());

        let response = analyze_image(&pipeline, &engine, "aW1n", ProductMetadata::default()).unwrap();
        assert_eq!(response.record.nutrients.len(), 2);
    }
}
