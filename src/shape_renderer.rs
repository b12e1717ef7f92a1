// src/shape_renderer.rs - hexagon fill, outline and decoration overlays

use crate::color::Palette;
use crate::config::RenderConfig;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_polygon_mut, draw_line_segment_mut, draw_polygon_mut};
use imageproc::point::Point;

/// Overlay markers a cell may carry. Tokens outside this set are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decoration {
    /// `"||"`: two nested accent-colored rings.
    DoubleRing,
    /// `"*"`: three lines joining opposite vertices.
    Asterisk,
}

impl Decoration {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decoration::DoubleRing => "||",
            Decoration::Asterisk => "*",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "||" => Some(Decoration::DoubleRing),
            "*" => Some(Decoration::Asterisk),
            _ => None,
        }
    }

    /// Known decorations in `tokens`, each at most once, in canonical order.
    pub fn parse_all<S: AsRef<str>>(tokens: &[S]) -> Vec<Decoration> {
        [Decoration::DoubleRing, Decoration::Asterisk]
            .into_iter()
            .filter(|d| tokens.iter().any(|t| Decoration::from_token(t.as_ref()) == Some(*d)))
            .collect()
    }
}

/// Vertices of a regular hexagon with one vertex pointing straight down
/// (angles 90° + k·60° in image coordinates, y growing downward).
pub fn hexagon_vertices(x: f64, y: f64, radius: f64) -> [(f32, f32); 6] {
    let mut vertices = [(0.0f32, 0.0f32); 6];
    for (k, vertex) in vertices.iter_mut().enumerate() {
        let angle = (90.0 + 60.0 * k as f64).to_radians();
        *vertex = (
            (x + radius * angle.cos()) as f32,
            (y + radius * angle.sin()) as f32,
        );
    }
    vertices
}

#[derive(Debug, Clone)]
pub struct ShapeRenderer {
    hex_size: f64,
    gutter: f64,
    slit: f64,
    outline: Rgb<u8>,
    accent: Rgb<u8>,
}

impl ShapeRenderer {
    pub fn new(config: &RenderConfig, palette: &Palette) -> Self {
        Self {
            hex_size: config.hex_size,
            gutter: config.hex_gutter,
            slit: config.hex_slit,
            outline: palette.outline,
            accent: palette.accent,
        }
    }

    /// Draw one cell: the inset base hexagon, then any decorations on top.
    pub fn draw_cell<S: AsRef<str>>(
        &self,
        canvas: &mut RgbImage,
        x: f64,
        y: f64,
        color: Rgb<u8>,
        decorations: &[S],
    ) {
        self.draw_hexagon(canvas, x, y, self.hex_size - self.slit, color, self.outline);

        for decoration in Decoration::parse_all(decorations) {
            match decoration {
                Decoration::DoubleRing => {
                    for ring in 1..=2 {
                        let radius = self.hex_size - self.gutter * ring as f64;
                        self.draw_hexagon(canvas, x, y, radius, color, self.accent);
                    }
                }
                Decoration::Asterisk => self.draw_asterisk(canvas, x, y),
            }
        }
    }

    fn draw_hexagon(
        &self,
        canvas: &mut RgbImage,
        x: f64,
        y: f64,
        radius: f64,
        fill: Rgb<u8>,
        outline: Rgb<u8>,
    ) {
        if radius <= 0.0 {
            return;
        }
        let vertices = hexagon_vertices(x, y, radius);

        let mut filled: Vec<Point<i32>> = vertices
            .iter()
            .map(|&(vx, vy)| Point::new(vx.round() as i32, vy.round() as i32))
            .collect();
        // draw_polygon_mut rejects a closed ring; tiny radii can collapse vertices
        filled.dedup();
        if filled.len() > 2 && filled.first() != filled.last() {
            draw_polygon_mut(canvas, &filled, fill);
        }

        let ring: Vec<Point<f32>> = vertices.iter().map(|&(vx, vy)| Point::new(vx, vy)).collect();
        draw_hollow_polygon_mut(canvas, &ring, outline);
    }

    fn draw_asterisk(&self, canvas: &mut RgbImage, x: f64, y: f64) {
        let vertices = hexagon_vertices(x, y, self.hex_size);
        for k in 0..3 {
            draw_line_segment_mut(canvas, vertices[k], vertices[k + 3], self.outline);
        }
    }
}
