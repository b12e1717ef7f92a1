//! Canvas composition
//!
//! Runs one render pass: layout, checkerboard background, cell shapes, blur,
//! then labels on top so text stays sharp.

use crate::color::{ColorResolver, Palette};
use crate::config::RenderConfig;
use crate::error::Result;
use crate::geometry::{GeometryEngine, Layout};
use crate::label_renderer::{LabelFont, LabelRenderer};
use crate::map_document::{CellRangeSpec, HexMapDocument};
use crate::shape_renderer::ShapeRenderer;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::filter::gaussian_blur_f32;
use imageproc::rect::Rect;

pub struct CanvasComposer {
    config: RenderConfig,
    colors: ColorResolver,
    font: Box<dyn LabelFont>,
}

impl CanvasComposer {
    pub fn new(config: RenderConfig, font: Box<dyn LabelFont>) -> Self {
        Self {
            config,
            colors: ColorResolver::new(),
            font,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn render_document(&self, document: &HexMapDocument) -> Result<RgbImage> {
        self.render(&document.hex)
    }

    /// Render the specs into a fresh image sized from the cell bounding box.
    pub fn render(&self, specs: &[CellRangeSpec]) -> Result<RgbImage> {
        let palette = Palette::from_config(&self.config, &self.colors)?;
        let layout = GeometryEngine::new(self.config.clone()).expand(specs, &self.colors)?;
        Ok(self.compose(&layout, &palette))
    }

    /// Draw an already computed layout.
    pub fn compose(&self, layout: &Layout, palette: &Palette) -> RgbImage {
        let (width, height) = layout.canvas_size(&self.config);
        let mut canvas = RgbImage::from_pixel(width, height, palette.background_primary);

        draw_checkerboard(&mut canvas, self.config.checker_block, palette.background_secondary);

        let shapes = ShapeRenderer::new(&self.config, palette);
        for cell in &layout.cells {
            shapes.draw_cell(&mut canvas, cell.x, cell.y, cell.color, cell.decorations.as_slice());
        }

        if self.config.blur_sigma > 0.0 {
            canvas = gaussian_blur_f32(&canvas, self.config.blur_sigma);
        }

        LabelRenderer::new(&self.config, palette).draw_labels(
            &mut canvas,
            &layout.cells,
            self.font.as_ref(),
        );

        canvas
    }
}

/// Paint every block whose `(column + row)` is odd; edge blocks are clipped.
pub fn draw_checkerboard(canvas: &mut RgbImage, block: u32, color: Rgb<u8>) {
    if block == 0 {
        return;
    }
    let (width, height) = canvas.dimensions();
    for (i, x) in (0..width).step_by(block as usize).enumerate() {
        for (j, y) in (0..height).step_by(block as usize).enumerate() {
            if (i + j) % 2 == 1 {
                let w = block.min(width - x);
                let h = block.min(height - y);
                draw_filled_rect_mut(canvas, Rect::at(x as i32, y as i32).of_size(w, h), color);
            }
        }
    }
}
