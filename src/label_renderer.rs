// src/label_renderer.rs - coordinate tags and custom labels drawn over cells

use crate::color::Palette;
use crate::config::{LabelPrecedence, RenderConfig};
use crate::geometry::Cell;
use ab_glyph::{FontArc, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Text measuring and rasterizing used by the label stage.
pub trait LabelFont {
    /// Width and height in pixels of `text` at pixel size `scale`.
    fn text_size(&self, scale: f32, text: &str) -> (u32, u32);

    /// Draw `text` with its top-left corner at `(x, y)`.
    fn draw_text(&self, canvas: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, scale: f32, text: &str);
}

impl LabelFont for FontArc {
    fn text_size(&self, scale: f32, text: &str) -> (u32, u32) {
        text_size(PxScale::from(scale), self, text)
    }

    fn draw_text(&self, canvas: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, scale: f32, text: &str) {
        draw_text_mut(canvas, color, x, y, PxScale::from(scale), self, text);
    }
}

/// Pick one cell per grid position.
///
/// Positions come back in the order they first appear in `cells`; the cell chosen
/// for each depends on `precedence`.
pub fn resolve_label_slots(cells: &[Cell], precedence: LabelPrecedence) -> Vec<&Cell> {
    let mut order: Vec<String> = Vec::new();
    let mut slots: HashMap<String, &Cell> = HashMap::new();

    for cell in cells {
        match slots.entry(cell.slot_key()) {
            Entry::Vacant(slot) => {
                order.push(slot.key().clone());
                slot.insert(cell);
            }
            Entry::Occupied(mut slot) => {
                if precedence == LabelPrecedence::LastDefined {
                    slot.insert(cell);
                }
            }
        }
    }

    order.iter().filter_map(|key| slots.get(key).copied()).collect()
}

/// Axis-aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlateRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlateRect {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn contains(&self, other: &PlateRect) -> bool {
        self.left <= other.left
            && self.top <= other.top
            && self.right >= other.right
            && self.bottom >= other.bottom
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextPlacement {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub scale: f32,
}

impl TextPlacement {
    pub fn bounds(&self) -> PlateRect {
        PlateRect {
            left: self.x as f64,
            top: self.y as f64,
            right: (self.x + self.width as i32) as f64,
            bottom: (self.y + self.height as i32) as f64,
        }
    }
}

/// Where the plate and each text line go for one cell.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelLayout {
    pub plate: PlateRect,
    pub coordinate: TextPlacement,
    pub label: Option<TextPlacement>,
}

#[derive(Debug, Clone)]
pub struct LabelRenderer {
    padding: f64,
    corner_radius: i32,
    label_scale: f32,
    coordinate_scale: f32,
    precedence: LabelPrecedence,
    plate_color: Rgb<u8>,
    coordinate_color: Rgb<u8>,
    label_color: Rgb<u8>,
}

impl LabelRenderer {
    pub fn new(config: &RenderConfig, palette: &Palette) -> Self {
        Self {
            padding: config.label_padding,
            corner_radius: config.label_corner_radius,
            label_scale: config.label_font_size,
            coordinate_scale: config.coordinate_font_size,
            precedence: config.label_precedence,
            plate_color: palette.plate,
            coordinate_color: palette.coordinate,
            label_color: palette.label,
        }
    }

    /// Place the coordinate tag (and optional label above it) around `(x, y)`.
    ///
    /// Without a label the tag is centered on the point. With one, the tag's top
    /// edge sits on the point and the label sits `2 * padding` above the tag.
    /// The plate is the union of both text boxes grown by `padding`.
    pub fn layout_label(
        &self,
        x: f64,
        y: f64,
        coordinate_tag: &str,
        label: Option<&str>,
        font: &dyn LabelFont,
    ) -> LabelLayout {
        let (tag_width, tag_height) = font.text_size(self.coordinate_scale, coordinate_tag);
        let label = label.filter(|text| !text.is_empty());

        let tag_top = match label {
            Some(_) => y,
            None => y - tag_height as f64 / 2.0,
        };
        let coordinate = TextPlacement {
            text: coordinate_tag.to_string(),
            x: (x - tag_width as f64 / 2.0) as i32,
            y: tag_top as i32,
            width: tag_width,
            height: tag_height,
            scale: self.coordinate_scale,
        };

        let label = label.map(|text| {
            let (width, height) = font.text_size(self.label_scale, text);
            TextPlacement {
                text: text.to_string(),
                x: (x - width as f64 / 2.0) as i32,
                y: (y - 2.0 * self.padding - height as f64) as i32,
                width,
                height,
                scale: self.label_scale,
            }
        });

        let mut content = coordinate.bounds();
        if let Some(placed) = &label {
            let b = placed.bounds();
            content = PlateRect {
                left: content.left.min(b.left),
                top: content.top.min(b.top),
                right: content.right.max(b.right),
                bottom: content.bottom.max(b.bottom),
            };
        }

        // keep the plate centered on the cell even when truncation shifted a line
        let half_width = (x - content.left).max(content.right - x) + self.padding;
        let plate = PlateRect {
            left: x - half_width,
            top: content.top - self.padding,
            right: x + half_width,
            bottom: content.bottom + self.padding,
        };

        LabelLayout {
            plate,
            coordinate,
            label,
        }
    }

    /// Draw one plate + text block per grid position.
    pub fn draw_labels(&self, canvas: &mut RgbImage, cells: &[Cell], font: &dyn LabelFont) {
        for cell in resolve_label_slots(cells, self.precedence) {
            let layout = self.layout_label(
                cell.x,
                cell.y,
                &cell.coordinate_tag(),
                cell.label.as_deref(),
                font,
            );
            self.draw_layout(canvas, &layout, font);
        }
    }

    pub fn draw_layout(&self, canvas: &mut RgbImage, layout: &LabelLayout, font: &dyn LabelFont) {
        draw_rounded_rect_mut(canvas, &layout.plate, self.corner_radius, self.plate_color);

        let tag = &layout.coordinate;
        font.draw_text(canvas, self.coordinate_color, tag.x, tag.y, tag.scale, &tag.text);

        if let Some(label) = &layout.label {
            font.draw_text(canvas, self.label_color, label.x, label.y, label.scale, &label.text);
        }
    }
}

/// Filled rectangle with circular corners of `radius` pixels.
pub fn draw_rounded_rect_mut(canvas: &mut RgbImage, rect: &PlateRect, radius: i32, color: Rgb<u8>) {
    let left = rect.left.round() as i32;
    let top = rect.top.round() as i32;
    let right = rect.right.round() as i32;
    let bottom = rect.bottom.round() as i32;
    let width = right - left;
    let height = bottom - top;
    if width <= 0 || height <= 0 {
        return;
    }

    let radius = radius.clamp(0, width.min(height) / 2);
    if radius == 0 {
        draw_filled_rect_mut(canvas, Rect::at(left, top).of_size(width as u32, height as u32), color);
        return;
    }

    let inner_width = width - 2 * radius;
    let inner_height = height - 2 * radius;
    if inner_width > 0 {
        draw_filled_rect_mut(
            canvas,
            Rect::at(left + radius, top).of_size(inner_width as u32, height as u32),
            color,
        );
    }
    if inner_height > 0 {
        draw_filled_rect_mut(
            canvas,
            Rect::at(left, top + radius).of_size(width as u32, inner_height as u32),
            color,
        );
    }
    for (cx, cy) in [
        (left + radius, top + radius),
        (right - radius - 1, top + radius),
        (left + radius, bottom - radius - 1),
        (right - radius - 1, bottom - radius - 1),
    ] {
        draw_filled_circle_mut(canvas, (cx, cy), radius, color);
    }
}
