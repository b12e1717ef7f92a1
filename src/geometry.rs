//! Hex grid geometry
//!
//! Expands cell range specs into individual cells and places each one on the
//! pixel plane. Rows alternate horizontally: odd rows sit half a hex width
//! further right than even rows so neighbouring rows interlock.
//!
//! Columns are carried in doubled units (`h = 2 * column`) so a step to the next
//! column is 2 while a step to the next row is 1.

use crate::color::ColorResolver;
use crate::config::RenderConfig;
use crate::error::{LayoutError, Result};
use crate::map_document::CellRangeSpec;
use image::Rgb;

/// A single drawable cell produced by expansion.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Doubled column index, always even.
    pub h: i32,
    pub v: i32,
    pub x: f64,
    pub y: f64,
    pub color: Rgb<u8>,
    pub decorations: Vec<String>,
    pub label: Option<String>,
}

impl Cell {
    /// Column number as written in the input.
    pub fn column(&self) -> i32 {
        self.h / 2
    }

    pub fn slot_key(&self) -> String {
        format!("{}_{}", self.h, self.v)
    }

    /// The "(column,row)" tag drawn under every cell.
    pub fn coordinate_tag(&self) -> String {
        format!("({},{})", self.column(), self.v)
    }

    pub fn has_decoration(&self, token: &str) -> bool {
        self.decorations.iter().any(|d| d == token)
    }
}

/// Extent of cell centers (not edges).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl BoundingBox {
    pub fn from_point(x: f64, y: f64) -> Self {
        Self {
            x_min: x,
            y_min: y,
            x_max: x,
            y_max: y,
        }
    }

    /// Fold step: `None` is the empty box.
    pub fn including(bounds: Option<BoundingBox>, x: f64, y: f64) -> BoundingBox {
        match bounds {
            None => BoundingBox::from_point(x, y),
            Some(b) => BoundingBox {
                x_min: b.x_min.min(x),
                y_min: b.y_min.min(y),
                x_max: b.x_max.max(x),
                y_max: b.y_max.max(y),
            },
        }
    }
}

/// Result of one expansion pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub cells: Vec<Cell>,
    pub bounds: BoundingBox,
}

impl Layout {
    /// Canvas dimensions: one full hex of padding past the farthest center.
    pub fn canvas_size(&self, config: &RenderConfig) -> (u32, u32) {
        let width = (self.bounds.x_max + config.hex_width()).ceil();
        let height = (self.bounds.y_max + config.hex_height()).ceil();
        (width as u32, height as u32)
    }
}

#[derive(Debug, Clone)]
pub struct GeometryEngine {
    config: RenderConfig,
}

impl GeometryEngine {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Pixel center of the cell at doubled column `h`, row `v`.
    pub fn cell_center(&self, h: i32, v: i32) -> (f64, f64) {
        let hex_width = self.config.hex_width();
        let hex_height = self.config.hex_height();

        let x_offset = (if is_odd(v) { 1.0 } else { 0.5 }) * hex_width;
        let x_spacing = 0.5 * h as f64 * hex_width;

        let y_offset = 0.5 * hex_height;
        let y_spacing = 0.75 * v as f64 * hex_height;

        (x_offset + x_spacing, y_offset + y_spacing)
    }

    /// Expand every spec into cells and compute the center bounding box.
    ///
    /// Bounds are folded from each range's extreme centers and checked before
    /// any cell is produced. Fails with `LayoutError::Empty` when nothing would
    /// be produced, `LayoutError::OutOfBounds` when any center lies at negative
    /// x or y, and `LayoutError::TooLarge` when the canvas would exceed
    /// `max_canvas_px`. A minimum of exactly zero is accepted.
    pub fn expand(&self, specs: &[CellRangeSpec], colors: &ColorResolver) -> Result<Layout> {
        let mut ranges = Vec::with_capacity(specs.len());
        let mut bounds: Option<BoundingBox> = None;

        for spec in specs {
            let color = colors.resolve(&spec.color)?;
            let (h1, h2) = (doubled(spec.h1)?, doubled(spec.h2)?);
            if h1 <= h2 && spec.v1 <= spec.v2 {
                bounds = Some(self.include_range(bounds, (h1, h2), (spec.v1, spec.v2)));
            }
            ranges.push((spec, color, h1, h2));
        }

        let bounds = bounds.ok_or(LayoutError::Empty)?;
        self.check_bounds(&bounds)?;

        let mut cells = Vec::new();
        for (spec, color, h1, h2) in ranges {
            for h in (h1..=h2).step_by(2) {
                for v in spec.v1..=spec.v2 {
                    let (x, y) = self.cell_center(h, v);
                    cells.push(Cell {
                        h,
                        v,
                        x,
                        y,
                        color,
                        decorations: spec.decorates.clone(),
                        label: spec.label.clone(),
                    });
                }
            }
        }

        Ok(Layout { cells, bounds })
    }

    /// Fold the extreme centers of a non-empty range. The first two rows cover
    /// both parity offsets, the last row holds the largest y.
    fn include_range(
        &self,
        bounds: Option<BoundingBox>,
        (h1, h2): (i32, i32),
        (v1, v2): (i32, i32),
    ) -> BoundingBox {
        let (x, y) = self.cell_center(h1, v2);
        let last_row = BoundingBox::including(bounds, x, y);
        let second_row = v1.saturating_add(1).min(v2);
        [(h1, v1), (h2, v1), (h1, second_row), (h2, second_row)]
            .into_iter()
            .fold(last_row, |acc, (h, v)| {
                let (x, y) = self.cell_center(h, v);
                BoundingBox::including(Some(acc), x, y)
            })
    }

    fn check_bounds(&self, bounds: &BoundingBox) -> Result<()> {
        if bounds.x_min < 0.0 || bounds.y_min < 0.0 {
            return Err(LayoutError::OutOfBounds {
                x_min: bounds.x_min,
                y_min: bounds.y_min,
            }
            .into());
        }

        let width = bounds.x_max + self.config.hex_width();
        let height = bounds.y_max + self.config.hex_height();
        let limit = self.config.max_canvas_px;
        if width > limit as f64 || height > limit as f64 {
            return Err(LayoutError::TooLarge {
                width,
                height,
                limit,
            }
            .into());
        }

        Ok(())
    }
}

/// Column number in doubled units.
fn doubled(column: i32) -> Result<i32> {
    column
        .checked_mul(2)
        .ok_or_else(|| LayoutError::ColumnOverflow { column }.into())
}

fn is_odd(n: i32) -> bool {
    n.rem_euclid(2) == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HexMapError;
    use approx::assert_abs_diff_eq;
    use more_asserts::assert_gt;

    fn engine() -> GeometryEngine {
        GeometryEngine::new(RenderConfig::default())
    }

    fn positions(layout: &Layout) -> Vec<(i32, i32)> {
        layout.cells.iter().map(|c| (c.h, c.v)).collect()
    }

    #[test]
    fn test_expansion_doubles_columns() {
        let layout = engine()
            .expand(&[CellRangeSpec::new(0, 1, 0, 1)], &ColorResolver::new())
            .unwrap();
        assert_eq!(positions(&layout), vec![(0, 0), (0, 1), (2, 0), (2, 1)]);
        assert!(layout.cells.iter().all(|c| c.h % 2 == 0));
    }

    #[test]
    fn test_expansion_order_follows_specs() {
        let specs = [CellRangeSpec::new(2, 3, 4, 4), CellRangeSpec::new(0, 0, 0, 2)];
        let layout = engine().expand(&specs, &ColorResolver::new()).unwrap();
        assert_eq!(
            positions(&layout),
            vec![(4, 4), (6, 4), (0, 0), (0, 1), (0, 2)]
        );
    }

    #[test]
    fn test_inverted_range_yields_nothing() {
        let specs = [CellRangeSpec::new(3, 1, 0, 0), CellRangeSpec::new(0, 0, 0, 0)];
        let layout = engine().expand(&specs, &ColorResolver::new()).unwrap();
        assert_eq!(positions(&layout), vec![(0, 0)]);
    }

    #[test]
    fn test_origin_cell_center() {
        let engine = engine();
        let (x, y) = engine.cell_center(0, 0);
        assert_abs_diff_eq!(x, 0.5 * engine.config().hex_width(), epsilon = 1e-9);
        assert_abs_diff_eq!(y, 80.0, epsilon = 1e-9);
    }

    #[test]
    fn test_row_parity_offset() {
        let engine = engine();
        let config = engine.config().clone();
        for h in [0, 2, 8] {
            for v in [0, 2, 6] {
                let (x_even, y_even) = engine.cell_center(h, v);
                let (x_odd, y_odd) = engine.cell_center(h, v + 1);
                assert_abs_diff_eq!(x_odd - x_even, 0.5 * config.hex_width(), epsilon = 1e-9);
                assert_abs_diff_eq!(y_odd - y_even, 0.75 * config.hex_height(), epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_negative_rows_keep_parity_rule() {
        let engine = engine();
        let (x_odd, _) = engine.cell_center(4, -1);
        let (x_even, _) = engine.cell_center(4, 0);
        assert_abs_diff_eq!(x_odd - x_even, 0.5 * engine.config().hex_width(), epsilon = 1e-9);
    }

    #[test]
    fn test_column_step_is_one_hex_width() {
        let engine = engine();
        let (x0, _) = engine.cell_center(0, 3);
        let (x1, _) = engine.cell_center(2, 3);
        assert_abs_diff_eq!(x1 - x0, engine.config().hex_width(), epsilon = 1e-9);
    }

    #[test]
    fn test_bounding_box_tracks_centers() {
        let engine = engine();
        let layout = engine
            .expand(&[CellRangeSpec::new(0, 2, 0, 3)], &ColorResolver::new())
            .unwrap();
        let (x_min, y_min) = engine.cell_center(0, 0);
        let (x_max, _) = engine.cell_center(4, 3);
        let (_, y_max) = engine.cell_center(0, 3);
        assert_abs_diff_eq!(layout.bounds.x_min, x_min, epsilon = 1e-9);
        assert_abs_diff_eq!(layout.bounds.y_min, y_min, epsilon = 1e-9);
        assert_abs_diff_eq!(layout.bounds.x_max, x_max, epsilon = 1e-9);
        assert_abs_diff_eq!(layout.bounds.y_max, y_max, epsilon = 1e-9);
    }

    #[test]
    fn test_canvas_size_pads_one_hex() {
        let engine = engine();
        let layout = engine
            .expand(&[CellRangeSpec::new(0, 0, 0, 0)], &ColorResolver::new())
            .unwrap();
        let (width, height) = layout.canvas_size(engine.config());
        // 0.5 * 138.56 + 138.56 = 207.85 -> 208; 80 + 160 = 240
        assert_eq!((width, height), (208, 240));
    }

    #[test]
    fn test_negative_minimum_is_rejected() {
        let engine = engine();
        let result = engine.expand(&[CellRangeSpec::new(-2, 0, 0, 0)], &ColorResolver::new());
        assert!(matches!(
            result,
            Err(HexMapError::Layout(LayoutError::OutOfBounds { .. }))
        ));

        let result = engine.expand(&[CellRangeSpec::new(0, 0, -2, 0)], &ColorResolver::new());
        assert!(matches!(
            result,
            Err(HexMapError::Layout(LayoutError::OutOfBounds { .. }))
        ));
    }

    #[test]
    fn test_zero_minimum_is_accepted() {
        // column -1 on an odd row puts the center exactly on x = 0
        let layout = engine()
            .expand(&[CellRangeSpec::new(-1, 0, 1, 1)], &ColorResolver::new())
            .unwrap();
        assert_abs_diff_eq!(layout.bounds.x_min, 0.0, epsilon = 1e-9);
        assert_gt!(layout.bounds.y_min, 0.0);
    }

    #[test]
    fn test_column_overflow_is_rejected() {
        let document = crate::map_document::parse_map_document(
            r#"{"hex":[{"h1":-1200000000,"h2":-1200000000,"v1":0,"v2":0}]}"#,
        )
        .unwrap();
        let result = engine().expand(&document.hex, &ColorResolver::new());
        assert!(matches!(
            result,
            Err(HexMapError::Layout(LayoutError::ColumnOverflow { column: -1_200_000_000 }))
        ));

        let result = engine().expand(&[CellRangeSpec::new(0, i32::MAX, 0, 0)], &ColorResolver::new());
        assert!(matches!(
            result,
            Err(HexMapError::Layout(LayoutError::ColumnOverflow { column: i32::MAX }))
        ));
    }

    #[test]
    fn test_far_negative_range_fails_before_expanding() {
        // half a billion cells if it were expanded first
        let result = engine().expand(
            &[CellRangeSpec::new(-500_000_000, 0, 0, 0)],
            &ColorResolver::new(),
        );
        match result {
            Err(HexMapError::Layout(LayoutError::OutOfBounds { x_min, .. })) => {
                let (expected, _) = engine().cell_center(-1_000_000_000, 0);
                assert_abs_diff_eq!(x_min, expected, epsilon = 1e-3);
            }
            other => panic!("expected out-of-bounds, got {:?}", other.map(|l| l.cells.len())),
        }
    }

    #[test]
    fn test_oversized_canvas_is_rejected() {
        let result = engine().expand(
            &[CellRangeSpec::new(1_000_000, 1_000_000, 0, 0)],
            &ColorResolver::new(),
        );
        match result {
            Err(HexMapError::Layout(LayoutError::TooLarge { width, height, limit })) => {
                assert_eq!(limit, crate::constants::MAX_CANVAS_PX);
                assert_gt!(width, limit as f64);
                assert_abs_diff_eq!(height, 240.0, epsilon = 1e-9);
            }
            other => panic!("expected too-large, got {:?}", other.map(|l| l.cells.len())),
        }

        let tall = engine().expand(&[CellRangeSpec::new(0, 0, 0, i32::MAX)], &ColorResolver::new());
        assert!(matches!(tall, Err(HexMapError::Layout(LayoutError::TooLarge { .. }))));
    }

    #[test]
    fn test_canvas_limit_follows_config() {
        let single = [CellRangeSpec::new(0, 0, 0, 0)];

        // one cell needs 208x240
        let tight = GeometryEngine::new(RenderConfig {
            max_canvas_px: 239,
            ..RenderConfig::default()
        });
        assert!(matches!(
            tight.expand(&single, &ColorResolver::new()),
            Err(HexMapError::Layout(LayoutError::TooLarge { limit: 239, .. }))
        ));

        let exact = GeometryEngine::new(RenderConfig {
            max_canvas_px: 240,
            ..RenderConfig::default()
        });
        let layout = exact.expand(&single, &ColorResolver::new()).unwrap();
        assert_eq!(layout.canvas_size(exact.config()), (208, 240));
    }

    #[test]
    fn test_bounds_match_every_cell() {
        let engine = engine();
        let specs = [CellRangeSpec::new(1, 3, 1, 4), CellRangeSpec::new(0, 0, 2, 2)];
        let layout = engine.expand(&specs, &ColorResolver::new()).unwrap();
        let folded = layout
            .cells
            .iter()
            .fold(None, |acc, c| Some(BoundingBox::including(acc, c.x, c.y)))
            .unwrap();
        assert_eq!(layout.bounds, folded);
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let result = engine().expand(&[], &ColorResolver::new());
        assert!(matches!(result, Err(HexMapError::Layout(LayoutError::Empty))));
    }

    #[test]
    fn test_color_resolved_per_spec() {
        let specs = [CellRangeSpec::new(0, 1, 0, 1).with_color("ff0000")];
        let layout = engine().expand(&specs, &ColorResolver::new()).unwrap();
        assert!(layout.cells.iter().all(|c| c.color == Rgb([255, 0, 0])));

        let bad = [CellRangeSpec::new(0, 0, 0, 0).with_color("nope")];
        let result = engine().expand(&bad, &ColorResolver::new());
        assert!(matches!(result, Err(HexMapError::Color(_))));
    }

    #[test]
    fn test_cell_metadata() {
        let specs = [CellRangeSpec::new(3, 3, 2, 2)
            .with_decorations(&["*"])
            .with_label("Ford")];
        let layout = engine().expand(&specs, &ColorResolver::new()).unwrap();
        let cell = &layout.cells[0];
        assert_eq!(cell.column(), 3);
        assert_eq!(cell.slot_key(), "6_2");
        assert_eq!(cell.coordinate_tag(), "(3,2)");
        assert!(cell.has_decoration("*"));
        assert!(!cell.has_decoration("||"));
        assert_eq!(cell.label.as_deref(), Some("Ford"));
    }
}
