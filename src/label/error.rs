//! Pipeline failure causes
//!
//! Kept distinct internally so tests and logs can tell them apart; the public
//! entry points flatten all of them into the fallback record.

use thiserror::Error;

use crate::engine::EngineError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Recognition failed: {0}")]
    Recognition(#[from] EngineError),

    #[error("Nutrient extraction failed: {0}")]
    Extraction(String),

    #[error("Pipeline panicked: {0}")]
    Panicked(String),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
