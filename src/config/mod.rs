//! Application Configuration
//!
//! Extraction tuning and output preferences stored in TOML format.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::analysis::alignment::UNKNOWN_LABEL;
use crate::analysis::outliers::{DEFAULT_OFFSET, IQR_FENCE};

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Extraction algorithm settings
    pub extraction: ExtractionSettings,
    /// Detector output settings
    pub detection: DetectionSettings,
    /// Label crop preprocessing before OCR
    pub preprocessing: OcrPreprocessing,
    /// Output settings
    pub output: OutputSettings,
}

/// Tuning for outlier rejection and alignment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionSettings {
    /// Fence width in IQR units
    pub iqr_fence: f64,
    /// Extra tolerance (px) when filtering bars by their bottom edge
    pub bar_baseline_offset: f64,
    /// Extra tolerance (px) when filtering x labels by their center row
    pub label_band_offset: f64,
    /// Placeholder text for bars without a category label
    pub unknown_label: String,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            iqr_fence: IQR_FENCE,
            bar_baseline_offset: 10.0,
            label_band_offset: DEFAULT_OFFSET,
            unknown_label: UNKNOWN_LABEL.to_string(),
        }
    }
}

/// Detector output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionSettings {
    /// Detector class names, indexed by class id
    pub class_names: Vec<String>,
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self {
            class_names: vec!["bar".to_string(), "x".to_string(), "y".to_string()],
        }
    }
}

/// OCR preprocessing settings for label crops
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrPreprocessing {
    /// Preprocessing enabled
    pub enabled: bool,
    /// Integer upscale factor (1 = none)
    pub scale: u32,
    /// Upscale small crops automatically (2x - 4x)
    pub auto_upscale: bool,
    /// Contrast factor (1.0 = unchanged)
    pub contrast: f32,
    /// Sharpen strength (0.0 = none)
    pub sharpen: f32,
    /// Invert grey levels
    pub invert: bool,
}

impl Default for OcrPreprocessing {
    fn default() -> Self {
        Self {
            enabled: true,
            scale: 1,
            auto_upscale: true,
            contrast: 1.0,
            sharpen: 0.0,
            invert: false,
        }
    }
}

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Spoken-style sentences
    #[default]
    Text,
    /// Extraction result as JSON
    Json,
}

/// Output settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Invalid config file: {:?}", path))?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
