//! Engine that replays a fixed recognition result

use crate::models::Recognition;

use super::{EngineError, LabelImage, RecognitionEngine};

/// Returns the same recognition for every image
///
/// Used for saved engine output and in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticRecognitionEngine {
    recognition: Recognition,
}

impl StaticRecognitionEngine {
    pub fn new(recognition: Recognition) -> Self {
        Self { recognition }
    }

    /// Load a saved recognition from JSON
    pub fn from_json(raw: &str) -> Result<Self, EngineError> {
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| EngineError::Malformed(e.to_string()))?;
        Ok(Self::new(super::decode_recognition(value)?))
    }

    pub fn recognition(&self) -> &Recognition {
        &self.recognition
    }
}

impl RecognitionEngine for StaticRecognitionEngine {
    fn recognize(&self, _image: &LabelImage) -> Result<Recognition, EngineError> {
        Ok(self.recognition.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replays_saved_output() {
        let engine = StaticRecognitionEngine::from_json(
            r#"{"texts": ["Sodio"], "scores": [0.9], "boxes": [[0, 0, 10, 10]]}"#,
        )
        .unwrap();
        let rec = engine.recognize(&LabelImage::new("")).unwrap();
        assert_eq!(rec.texts, vec!["Sodio"]);
    }

    #[test]
    fn test_rejects_invalid_json() {
        assert!(matches!(
            StaticRecognitionEngine::from_json("not json"),
            Err(EngineError::Malformed(_))
        ));
    }
}
