// src/config.rs - render parameters

use crate::constants::*;
use crate::error::{HexMapError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Which cell supplies the label when several specs cover the same grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelPrecedence {
    /// The earliest spec in input order wins.
    #[default]
    FirstDefined,
    /// The latest spec in input order wins.
    LastDefined,
}

/// Immutable parameters shared by the geometry, shape and label stages.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub hex_size: f64,
    pub hex_gutter: f64,
    pub hex_slit: f64,
    pub label_padding: f64,
    pub label_corner_radius: i32,
    pub label_font_size: f32,
    pub coordinate_font_size: f32,
    pub checker_block: u32,
    /// Gaussian sigma in pixels; 0 disables the blur pass.
    pub blur_sigma: f32,
    /// Largest canvas side in pixels; bigger maps are rejected before drawing.
    pub max_canvas_px: u32,
    pub jpeg_quality: u8,
    pub font_path: PathBuf,
    pub background_primary: String,
    pub background_secondary: String,
    pub outline_color: String,
    pub accent_color: String,
    pub plate_color: String,
    pub coordinate_color: String,
    pub label_color: String,
    pub label_precedence: LabelPrecedence,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            hex_size: HEX_SIZE,
            hex_gutter: HEX_GUTTER,
            hex_slit: HEX_SLIT,
            label_padding: LABEL_PADDING,
            label_corner_radius: LABEL_CORNER_RADIUS,
            label_font_size: LABEL_FONT_SIZE,
            coordinate_font_size: COORDINATE_FONT_SIZE,
            checker_block: CHECKER_BLOCK_PX,
            blur_sigma: BLUR_SIGMA,
            max_canvas_px: MAX_CANVAS_PX,
            jpeg_quality: JPEG_QUALITY,
            font_path: PathBuf::from(DEFAULT_FONT_PATH),
            background_primary: CANVAS_BACKGROUND_1.to_string(),
            background_secondary: CANVAS_BACKGROUND_2.to_string(),
            outline_color: OUTLINE_COLOR.to_string(),
            accent_color: ACCENT_COLOR.to_string(),
            plate_color: PLATE_COLOR.to_string(),
            coordinate_color: COORDINATE_COLOR.to_string(),
            label_color: LABEL_COLOR.to_string(),
            label_precedence: LabelPrecedence::default(),
        }
    }
}

impl RenderConfig {
    /// Same defaults at a different hex size.
    pub fn with_hex_size(hex_size: f64) -> Self {
        Self {
            hex_size,
            ..Self::default()
        }
    }

    pub fn hex_width(&self) -> f64 {
        self.hex_size * 3f64.sqrt()
    }

    pub fn hex_height(&self) -> f64 {
        self.hex_size * 2.0
    }

    /// Load a JSON config file; missing fields keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text).map_err(|message| HexMapError::Input {
            path: path.to_path_buf(),
            message,
        })
    }

    pub fn from_json_str(text: &str) -> std::result::Result<Self, String> {
        serde_json::from_str(text).map_err(|e| format!("Failed to parse config: {}", e))
    }
}
