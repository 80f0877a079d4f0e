//! Runtime configuration
//!
//! Pipeline tunables and service settings, read from the environment once at
//! startup.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::label::normalize::{Replacement, DEFAULT_REPLACEMENTS};

/// Reference quantity of the label's first value column (per 100 g/ml)
pub const BASE_QTY: f64 = 100.0;

pub const DEFAULT_SCORE_MIN: f64 = 0.6;
pub const DEFAULT_VERTICAL_TOLERANCE: f64 = 15.0;
pub const DEFAULT_OCR_TIMEOUT_SECS: u64 = 30;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid replacement list in {path}: {source}")]
    Replacements {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// How an unmatched trans-fat row is recovered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransFatRecovery {
    /// Unmatched `(g)` row carrying the literal `0,13` / `0.13`
    #[default]
    LiteralValue,
    /// Unmatched `(g)` row right after the polyunsaturated-fat row
    Positional,
    Off,
}

impl TransFatRecovery {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "literal" => Some(TransFatRecovery::LiteralValue),
            "positional" => Some(TransFatRecovery::Positional),
            "off" | "none" => Some(TransFatRecovery::Off),
            _ => None,
        }
    }
}

/// Tunables of the label pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Fragments scoring below this are dropped
    pub score_min: f64,
    /// Max vertical distance (px) between consecutive fragment centers on one line
    pub vertical_tolerance: f64,
    pub trans_fat_recovery: TransFatRecovery,
    /// OCR repair rules, applied in order
    pub replacements: Vec<Replacement>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            score_min: DEFAULT_SCORE_MIN,
            vertical_tolerance: DEFAULT_VERTICAL_TOLERANCE,
            trans_fat_recovery: TransFatRecovery::default(),
            replacements: DEFAULT_REPLACEMENTS
                .iter()
                .map(|(from, to)| Replacement::new(*from, *to))
                .collect(),
        }
    }
}

impl PipelineConfig {
    /// Build from `NUTRILABEL_*` environment variables over the defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(v) = env_parsed::<f64>("NUTRILABEL_SCORE_MIN") {
            config.score_min = v;
        }
        if let Some(v) = env_parsed::<f64>("NUTRILABEL_VERTICAL_TOLERANCE") {
            config.vertical_tolerance = v;
        }
        if let Ok(raw) = std::env::var("NUTRILABEL_TRANS_FAT_RECOVERY") {
            match TransFatRecovery::from_str(&raw) {
                Some(mode) => config.trans_fat_recovery = mode,
                None => tracing::warn!(
                    "Ignoring NUTRILABEL_TRANS_FAT_RECOVERY='{}', expected literal|positional|off",
                    raw
                ),
            }
        }
        if let Ok(path) = std::env::var("NUTRILABEL_REPLACEMENTS_PATH") {
            match load_replacements(&path) {
                Ok(rules) => config.replacements = rules,
                Err(e) => tracing::warn!("Keeping built-in replacement list: {}", e),
            }
        }

        config
    }
}

/// Settings for the remote OCR service
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub url: String,
    pub timeout: Duration,
}

impl EngineConfig {
    /// None when `NUTRILABEL_OCR_URL` is unset or blank
    pub fn from_env() -> Option<Self> {
        let url = std::env::var("NUTRILABEL_OCR_URL").ok()?;
        if url.trim().is_empty() {
            return None;
        }
        let secs = env_parsed::<u64>("NUTRILABEL_OCR_TIMEOUT_SECS").unwrap_or(DEFAULT_OCR_TIMEOUT_SECS);
        Some(Self {
            url: url.trim().to_string(),
            timeout: Duration::from_secs(secs),
        })
    }
}

/// Load a replacement list from a JSON file of `[from, to]` pairs
pub fn load_replacements<P: AsRef<Path>>(path: P) -> Result<Vec<Replacement>, ConfigError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_replacements(&raw).map_err(|source| ConfigError::Replacements {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_replacements(raw: &str) -> Result<Vec<Replacement>, serde_json::Error> {
    let pairs: Vec<(String, String)> = serde_json::from_str(raw)?;
    Ok(pairs.into_iter().map(|(from, to)| Replacement::new(from, to)).collect())
}

fn env_parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!("Ignoring {}='{}': not a valid value", name, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.score_min, 0.6);
        assert_eq!(config.vertical_tolerance, 15.0);
        assert_eq!(config.trans_fat_recovery, TransFatRecovery::LiteralValue);
        assert_eq!(config.replacements.len(), DEFAULT_REPLACEMENTS.len());
        assert_eq!(config.replacements[0], Replacement::new(" mi)", " ml)"));
    }

    #[test]
    fn test_trans_fat_recovery_parsing() {
        assert_eq!(TransFatRecovery::from_str("Positional"), Some(TransFatRecovery::Positional));
        assert_eq!(TransFatRecovery::from_str("off"), Some(TransFatRecovery::Off));
        assert_eq!(TransFatRecovery::from_str("sometimes"), None);
    }

    #[test]
    fn test_parse_replacements_keeps_order() {
        let rules = parse_replacements(r#"[["Kcal", "kcal"], ["(6)", "(g)"]]"#).unwrap();
        assert_eq!(rules, vec![Replacement::new("Kcal", "kcal"), Replacement::new("(6)", "(g)")]);
        assert!(parse_replacements(r#"{"Kcal": "kcal"}"#).is_err());
    }

    #[test]
    fn test_load_replacements_missing_file() {
        let err = load_replacements("/nonexistent/replacements.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
