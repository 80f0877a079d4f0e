//! nutrilabel MCP Server Implementation
//!
//! Exposes label analysis and evaluation as MCP tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::engine::RecognitionEngine;
use crate::label::LabelPipeline;
use crate::models::{ProductMetadata, RawBox, Recognition};
use crate::scoring::NutrientInputs;
use crate::tools::analyze;
use crate::tools::evaluation;
use crate::tools::status::StatusTracker;

/// nutrilabel MCP Service
#[derive(Clone)]
pub struct NutrilabelService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    pipeline: Arc<LabelPipeline>,
    engine: Option<Arc<dyn RecognitionEngine>>,
    engine_url: Option<String>,
    tool_router: ToolRouter<NutrilabelService>,
}

impl NutrilabelService {
    pub fn new(
        pipeline: LabelPipeline,
        engine: Option<Arc<dyn RecognitionEngine>>,
        engine_url: Option<String>,
    ) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(engine_url.clone()))),
            pipeline: Arc::new(pipeline),
            engine,
            engine_url,
            tool_router: Self::tool_router(),
        }
    }
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AnalyzeLabelFragmentsParams {
    /// Recognized texts, parallel to scores and boxes
    #[serde(alias = "rec_texts")]
    pub texts: Vec<String>,
    /// Recognition confidence per text, 0..1 (null drops that text)
    #[serde(alias = "rec_scores")]
    pub scores: Vec<Option<f64>>,
    /// Bounding box per text: four [x, y] corners or a flat [x0, y0, x1, y1];
    /// any other shape drops that text
    #[serde(alias = "rec_boxes")]
    pub boxes: Vec<RawBox>,
    /// Product name (echoed back)
    pub nombre: Option<String>,
    /// Brand (echoed back)
    pub marca: Option<String>,
    /// Category (echoed back)
    pub categoria: Option<String>,
    /// Also return the reconstructed label lines
    #[serde(default)]
    pub include_lines: bool,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AnalyzeLabelImageParams {
    /// Base64 encoded photo of the nutrition label
    #[serde(default)]
    pub image_b64: String,
    pub nombre: Option<String>,
    pub marca: Option<String>,
    pub categoria: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NutriscoreParams {
    /// Nutrients per 100 g/ml: `{key: number}` or `{key: {por_base, por_porcion}}`
    #[serde(default)]
    pub nutrientes: NutrientInputs,
    /// Fruit, vegetable and nut content in percent
    #[serde(default)]
    pub fvnl_pct: f64,
    /// Whether the product is a cheese
    #[serde(default)]
    pub es_queso: bool,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ChileSealsParams {
    #[serde(default)]
    pub nutrientes: NutrientInputs,
    /// Reference unit of the values ("g" or "ml")
    pub unidad_base: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct EvaluateLabelParams {
    #[serde(default)]
    pub nutrientes: NutrientInputs,
    #[serde(default)]
    pub fvnl_pct: f64,
    #[serde(default)]
    pub es_queso: bool,
    pub unidad_base: Option<String>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    ok: bool,
    ocr_engine: bool,
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl NutrilabelService {
    // --- Status ---

    #[tool(description = "Get the current status of the nutrilabel service including build info, pipeline settings, and process information")]
    async fn nutrilabel_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status(self.pipeline.config());
        to_json(&status)
    }

    #[tool(description = "Liveness check; reports whether an OCR engine is configured")]
    fn health(&self) -> Result<CallToolResult, McpError> {
        to_json(&HealthResponse { ok: true, ocr_engine: self.engine.is_some() })
    }

    #[tool(description = "Get instructions for reading nutrition labels and interpreting the results. Call this before the first analysis in a session.")]
    fn label_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::LABEL_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(LABEL_INSTRUCTIONS)]))
    }

    // --- Label analysis ---

    #[tool(description = "Rebuild a nutrition-facts table from OCR fragments (parallel texts/scores/boxes) and return per-100 and per-serving values")]
    fn analyze_label_fragments(&self, Parameters(p): Parameters<AnalyzeLabelFragmentsParams>) -> Result<CallToolResult, McpError> {
        let recognition = Recognition { texts: p.texts, scores: p.scores, boxes: p.boxes };
        let product = ProductMetadata { name: p.nombre, brand: p.marca, category: p.categoria };
        let result = analyze::analyze_fragments(&self.pipeline, &recognition, product, p.include_lines);
        to_json(&result)
    }

    #[tool(description = "Read a nutrition label from a base64 photo using the configured OCR engine")]
    async fn analyze_label_image(&self, Parameters(p): Parameters<AnalyzeLabelImageParams>) -> Result<CallToolResult, McpError> {
        if p.image_b64.trim().is_empty() {
            return Err(McpError::invalid_params("Missing 'image_b64'", None));
        }
        let engine = self.engine.clone().ok_or_else(|| {
            McpError::invalid_request(
                "No OCR engine configured; start the server with NUTRILABEL_OCR_URL or use analyze_label_fragments",
                None,
            )
        })?;
        let pipeline = Arc::clone(&self.pipeline);
        let product = ProductMetadata { name: p.nombre, brand: p.marca, category: p.categoria };

        let result = tokio::task::spawn_blocking(move || {
            analyze::analyze_image(&pipeline, engine.as_ref(), &p.image_b64, product)
        })
        .await
        .map_err(|e| McpError::internal_error(format!("Analysis task failed: {}", e), None))?
        .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    // --- Evaluation ---

    #[tool(description = "Compute the Nutri-Score (classic general-food algorithm) from per-100 nutrient values")]
    fn nutriscore(&self, Parameters(p): Parameters<NutriscoreParams>) -> Result<CallToolResult, McpError> {
        to_json(&evaluation::nutriscore(&p.nutrientes, p.fvnl_pct, p.es_queso))
    }

    #[tool(description = "Evaluate the Chilean 'ALTO EN' warning seals from per-100 nutrient values")]
    fn chile_seals(&self, Parameters(p): Parameters<ChileSealsParams>) -> Result<CallToolResult, McpError> {
        to_json(&evaluation::chile_seals(&p.nutrientes, p.unidad_base.as_deref()))
    }

    #[tool(description = "Compute both the Nutri-Score and the Chilean warning seals for one product")]
    fn evaluate_label(&self, Parameters(p): Parameters<EvaluateLabelParams>) -> Result<CallToolResult, McpError> {
        to_json(&evaluation::evaluate_label(&p.nutrientes, p.fvnl_pct, p.es_queso, p.unidad_base.as_deref()))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for NutrilabelService {
    fn get_info(&self) -> ServerInfo {
        let engine_note = match &self.engine_url {
            Some(url) => format!("OCR engine: {}.", url),
            None => "No OCR engine configured; analyze_label_image is unavailable.".to_string(),
        };
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "nutrilabel".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Nutrition Label Reader".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(format!(
                "nutrilabel - reads nutrition-facts tables from label photos or OCR output. \
                 Call label_instructions first. \
                 Labels: analyze_label_image, analyze_label_fragments. \
                 Evaluation: nutriscore, chile_seals, evaluate_label. \
                 Service: nutrilabel_status, health. {}",
                engine_note
            )),
        }
    }
}
