//! Utility to run the label pipeline over saved OCR output
//!
//! Usage: analyze_fragments <recognition.json> [--lines] [--evaluate]
//!
//! The file holds the engine's `texts`/`scores`/`boxes` (or PaddleOCR
//! `rec_*`) arrays. The label record is printed as JSON on stdout.

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use nutrilabel::config::PipelineConfig;
use nutrilabel::engine::StaticRecognitionEngine;
use nutrilabel::label::LabelPipeline;
use nutrilabel::models::ProductMetadata;
use nutrilabel::scoring;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("nutrilabel=warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let mut path: Option<PathBuf> = None;
    let mut show_lines = false;
    let mut evaluate = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--lines" => show_lines = true,
            "--evaluate" => evaluate = true,
            _ => path = Some(PathBuf::from(arg)),
        }
    }
    let path = path.ok_or("usage: analyze_fragments <recognition.json> [--lines] [--evaluate]")?;

    let raw = std::fs::read_to_string(&path)?;
    let engine = StaticRecognitionEngine::from_json(&raw)?;
    let pipeline = LabelPipeline::new(PipelineConfig::from_env());

    let fragments = engine.recognition().fragments();
    let (record, lines) = pipeline.process_fragments_with_lines(&fragments, ProductMetadata::default());

    if show_lines {
        for line in &lines {
            eprintln!("| {}", line);
        }
    }

    println!("{}", serde_json::to_string_pretty(&record)?);

    if evaluate {
        let nutrients = scoring::from_nutrient_map(&record.nutrients);
        let unit = record.base_unit.map(|u| u.canonical_unit());
        let evaluation = scoring::evaluate(&nutrients, 0.0, false, unit);
        println!("{}", serde_json::to_string_pretty(&evaluation)?);
    }

    Ok(())
}
