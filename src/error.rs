use derive_more::{Display, Error, From};
use std::path::PathBuf;

/// Raised when the cell list produces no usable canvas.
#[derive(Debug, Clone, PartialEq, Display, Error)]
pub enum LayoutError {
    /// No cell was produced, so the bounding box is undefined.
    #[display(fmt = "map has no cells to draw")]
    Empty,
    /// A cell center lies left of or above the canvas origin.
    #[display(fmt = "try to draw hex into out-bound (x_min={:.2}, y_min={:.2})", x_min, y_min)]
    OutOfBounds { x_min: f64, y_min: f64 },
    /// A column number too large to double.
    #[display(fmt = "column {} is out of range", column)]
    ColumnOverflow { column: i32 },
    /// The canvas would exceed `limit` pixels on a side.
    #[display(fmt = "canvas {:.0}x{:.0} exceeds the {}px limit", width, height, limit)]
    TooLarge { width: f64, height: f64, limit: u32 },
}

/// A color token that is neither a known name nor a hex triple.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display(fmt = "unrecognized color '{}'", token)]
pub struct ColorFormatError {
    pub token: String,
}

#[derive(Debug, Display, Error, From)]
pub enum HexMapError {
    #[display(fmt = "layout error: {}", _0)]
    Layout(#[error(source)] LayoutError),
    #[display(fmt = "color error: {}", _0)]
    Color(#[error(source)] ColorFormatError),
    #[from(ignore)]
    #[display(fmt = "invalid input {}: {}", "path.display()", message)]
    Input { path: PathBuf, message: String },
    #[display(fmt = "io error: {}", _0)]
    Io(#[error(source)] std::io::Error),
    #[display(fmt = "image error: {}", _0)]
    Image(#[error(source)] image::ImageError),
    #[from(ignore)]
    #[display(fmt = "font error: {}", _0)]
    Font(#[error(not(source))] String),
}

pub type Result<T> = std::result::Result<T, HexMapError>;
