//! Text recognition engines
//!
//! The pipeline never owns an engine; callers construct one and pass it in.

mod fixture;
mod http;

pub use fixture::StaticRecognitionEngine;
pub use http::{decode_recognition, HttpRecognitionEngine};

use thiserror::Error;

use crate::models::Recognition;

/// Engine error types
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("OCR request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OCR service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed recognition payload: {0}")]
    Malformed(String),

    #[error("Image payload is empty")]
    EmptyImage,
}

/// A label photograph, base64 encoded as received from the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelImage {
    pub base64: String,
}

impl LabelImage {
    pub fn new(base64: impl Into<String>) -> Self {
        Self {
            base64: base64.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.base64.trim().is_empty()
    }
}

/// Something that turns an image into text fragments
///
/// Implementations are called synchronously and may block.
pub trait RecognitionEngine: Send + Sync {
    fn recognize(&self, image: &LabelImage) -> Result<Recognition, EngineError>;
}
