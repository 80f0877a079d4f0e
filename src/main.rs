//! nutrilabel
//!
//! An MCP server that reads nutrition-facts labels.

use std::sync::Arc;

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use nutrilabel::build_info;
use nutrilabel::config::{EngineConfig, PipelineConfig};
use nutrilabel::engine::{HttpRecognitionEngine, RecognitionEngine};
use nutrilabel::label::LabelPipeline;
use nutrilabel::mcp::NutrilabelService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging goes to stderr so it does not interfere with MCP stdio
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("nutrilabel=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();

    let config = PipelineConfig::from_env();
    eprintln!(
        "Pipeline: score_min={} vertical_tolerance={}px trans_fat_recovery={:?}",
        config.score_min, config.vertical_tolerance, config.trans_fat_recovery
    );

    let (engine, engine_url): (Option<Arc<dyn RecognitionEngine>>, Option<String>) =
        match EngineConfig::from_env() {
            Some(engine_config) => match HttpRecognitionEngine::new(&engine_config) {
                Ok(engine) => {
                    let url = engine.url().to_string();
                    eprintln!("OCR engine: {}", url);
                    let engine: Arc<dyn RecognitionEngine> = Arc::new(engine);
                    (Some(engine), Some(url))
                }
                Err(e) => {
                    tracing::warn!("OCR engine disabled: {}", e);
                    (None, None)
                }
            },
            None => {
                eprintln!("OCR engine: none (set NUTRILABEL_OCR_URL to enable image analysis)");
                (None, None)
            }
        };

    let service = NutrilabelService::new(LabelPipeline::new(config), engine, engine_url);

    eprintln!("Starting MCP server on stdio...");
    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;
    server.waiting().await?;

    Ok(())
}
