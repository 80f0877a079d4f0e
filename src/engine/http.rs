//! Remote OCR service client
//!
//! Talks to a PaddleOCR style HTTP service: the image goes out as
//! `{"image_b64": ...}` and the `rec_texts` / `rec_scores` / `rec_boxes`
//! triple comes back, either bare or wrapped in a one-element list.

use reqwest::blocking::Client;
use serde::Serialize;

use crate::config::EngineConfig;
use crate::models::Recognition;

use super::{EngineError, LabelImage, RecognitionEngine};

#[derive(Debug, Serialize)]
struct RecognizeRequest<'a> {
    image_b64: &'a str,
}

/// Blocking client for a remote recognition service
#[derive(Debug, Clone)]
pub struct HttpRecognitionEngine {
    client: Client,
    url: String,
}

impl HttpRecognitionEngine {
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl RecognitionEngine for HttpRecognitionEngine {
    fn recognize(&self, image: &LabelImage) -> Result<Recognition, EngineError> {
        if image.is_empty() {
            return Err(EngineError::EmptyImage);
        }

        let response = self
            .client
            .post(&self.url)
            .json(&RecognizeRequest {
                image_b64: image.base64.trim(),
            })
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(EngineError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let value: serde_json::Value = response.json()?;
        let recognition = decode_recognition(value)?;
        tracing::debug!("OCR service returned {} fragments", recognition.texts.len());
        Ok(recognition)
    }
}

/// Decode a recognition triple, unwrapping a leading result list
pub fn decode_recognition(value: serde_json::Value) -> Result<Recognition, EngineError> {
    let value = match value {
        serde_json::Value::Array(items) => match items.into_iter().next() {
            Some(first) => first,
            None => return Ok(Recognition::empty()),
        },
        other => other,
    };
    serde_json::from_value(value).map_err(|e| EngineError::Malformed(e.to_string()))
}
