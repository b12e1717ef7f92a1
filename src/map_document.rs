// src/map_document.rs - serde model of the JSON map description

use crate::constants::DEFAULT_CELL_COLOR;
use crate::error::{HexMapError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

fn default_color() -> String {
    DEFAULT_CELL_COLOR.to_string()
}

/// One `hex` entry: a rectangular range of cells sharing color, decorations and label.
///
/// `h1`/`h2` are real column numbers; expansion doubles them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CellRangeSpec {
    pub h1: i32,
    pub h2: i32,
    pub v1: i32,
    pub v2: i32,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub decorates: Vec<String>,
    #[serde(default)]
    pub label: Option<String>,
}

impl CellRangeSpec {
    pub fn new(h1: i32, h2: i32, v1: i32, v2: i32) -> Self {
        Self {
            h1,
            h2,
            v1,
            v2,
            color: default_color(),
            decorates: Vec::new(),
            label: None,
        }
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = color.to_string();
        self
    }

    pub fn with_decorations(mut self, tokens: &[&str]) -> Self {
        self.decorates = tokens.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HexMapDocument {
    #[serde(default)]
    pub hex: Vec<CellRangeSpec>,
}

pub fn parse_map_document(json_str: &str) -> std::result::Result<HexMapDocument, String> {
    serde_json::from_str(json_str).map_err(|e| format!("Failed to parse JSON: {}", e))
}

pub fn load_map_document<P: AsRef<Path>>(file_path: P) -> Result<HexMapDocument> {
    let path = file_path.as_ref();
    let json_str = fs::read_to_string(path).map_err(|e| HexMapError::Input {
        path: path.to_path_buf(),
        message: format!("Failed to read file: {}", e),
    })?;
    parse_map_document(&json_str).map_err(|message| HexMapError::Input {
        path: path.to_path_buf(),
        message,
    })
}
