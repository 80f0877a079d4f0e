//! nutrilabel status tool
//!
//! Runtime status information about the service.

use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::config::{PipelineConfig, TransFatRecovery};

/// Label reading instructions for AI assistants
pub const LABEL_INSTRUCTIONS: &str = r#"
# nutrilabel Instructions

nutrilabel reads Chilean-style nutrition-facts tables ("INFORMACIÓN
NUTRICIONAL") from OCR output and returns per-100 and per-serving values.

## Reading a label

1. **From a photo:** call `analyze_label_image` with `image_b64` (base64 JPEG
   or PNG). Requires the server to be started with `NUTRILABEL_OCR_URL`.
2. **From OCR output you already have:** call `analyze_label_fragments` with
   the parallel `texts`, `scores` and `boxes` arrays (PaddleOCR `rec_texts`,
   `rec_scores`, `rec_boxes` are accepted as-is). Set `include_lines: true` to
   see the reconstructed rows.

Optionally pass `nombre`, `marca` and `categoria`; they are echoed back.

## Reading the result

| Field | Meaning |
|-------|---------|
| `unidad_base` | `g` or `ml`; defaults to `ml` when the label does not say |
| `base_qty` | Always 100, the first value column is per 100 g/ml |
| `porcion` | Declared serving size; defaults to 100 when not found |
| `nutrientes` | `{key: {por_base, por_porcion}}` for every row recognized |

A missing column is computed from the other one using `porcion`. Keys that
were not found on the label are simply absent. An empty `nutrientes` with
null `unidad_base` and `porcion` means the label could not be processed.

## Evaluating a product

Pass `nutrientes` (from a label result, or plain per-100 numbers) to:
- `nutriscore` - Nutri-Score letter A-E. Add `fvnl_pct` (fruit/vegetable/nut
  percentage) and `es_queso` for cheese when known.
- `chile_seals` - "ALTO EN" warning seals; pass `unidad_base` so liquids use
  the liquid limits.
- `evaluate_label` - both at once.
"#;

/// Status response
#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Pipeline configuration
    pub score_min: f64,
    pub vertical_tolerance: f64,
    pub trans_fat_recovery: &'static str,
    pub replacement_rules: usize,

    /// Recognition engine, if one is configured
    pub ocr_engine_url: Option<String>,

    /// Process information
    pub started_at: String,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    started_at: String,
    ocr_engine_url: Option<String>,
}

impl StatusTracker {
    pub fn new(ocr_engine_url: Option<String>) -> Self {
        Self {
            start_time: Instant::now(),
            started_at: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            ocr_engine_url,
        }
    }

    pub fn get_status(&self, config: &PipelineConfig) -> ServiceStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        ServiceStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            score_min: config.score_min,
            vertical_tolerance: config.vertical_tolerance,
            trans_fat_recovery: match config.trans_fat_recovery {
                TransFatRecovery::LiteralValue => "literal",
                TransFatRecovery::Positional => "positional",
                TransFatRecovery::Off => "off",
            },
            replacement_rules: config.replacements.len(),
            ocr_engine_url: self.ocr_engine_url.clone(),
            started_at: self.started_at.clone(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
