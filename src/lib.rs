pub mod constants;
pub mod error;
pub mod config;
pub mod color;
pub mod map_document;
pub mod geometry;
pub mod shape_renderer;
pub mod label_renderer;
pub mod canvas;
pub mod output;

use ab_glyph::FontArc;
use std::path::Path;

pub use canvas::CanvasComposer;
pub use config::{LabelPrecedence, RenderConfig};
pub use error::{ColorFormatError, HexMapError, LayoutError};
pub use map_document::{CellRangeSpec, HexMapDocument};

/// Load the TrueType/OpenType font used for labels.
pub fn load_font<P: AsRef<Path>>(path: P) -> error::Result<FontArc> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|e| HexMapError::Font(format!("cannot read {}: {}", path.display(), e)))?;
    FontArc::try_from_vec(bytes)
        .map_err(|e| HexMapError::Font(format!("cannot parse {}: {}", path.display(), e)))
}
