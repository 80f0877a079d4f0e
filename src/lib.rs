//! nutrilabel Library
//!
//! Reads nutrition-facts labels: OCR fragments in, per-100 and per-serving
//! nutrient values out, plus Nutri-Score and warning-seal evaluation.

pub mod build_info;
pub mod config;
pub mod engine;
pub mod label;
pub mod mcp;
pub mod models;
pub mod scoring;
pub mod tools;
