// Hex geometry (pixels)
pub const HEX_SIZE: f64 = 80.0; // circumradius: side length of the six equilateral triangles
pub const HEX_GUTTER: f64 = 10.0; // inset between nested "||" rings
pub const HEX_SLIT: f64 = 2.0; // inset of the base hexagon, leaves a seam between neighbours

// Labels
pub const LABEL_PADDING: f64 = 4.0;
pub const LABEL_CORNER_RADIUS: i32 = 3;
pub const LABEL_FONT_SIZE: f32 = 15.0;
pub const COORDINATE_FONT_SIZE: f32 = 14.0;

// Canvas
pub const CHECKER_BLOCK_PX: u32 = 20;
pub const BLUR_SIGMA: f32 = 0.5;
pub const MAX_CANVAS_PX: u32 = 16_384; // per side
pub const CANVAS_BACKGROUND_1: &str = "000000";
pub const CANVAS_BACKGROUND_2: &str = "111111";

// Palette tokens, resolved through the color table
pub const OUTLINE_COLOR: &str = "black";
pub const ACCENT_COLOR: &str = "blue";
pub const PLATE_COLOR: &str = "whitesmoke";
pub const COORDINATE_COLOR: &str = "gray";
pub const LABEL_COLOR: &str = "dimgray";
pub const DEFAULT_CELL_COLOR: &str = "white";

// I/O
pub const JPEG_QUALITY: u8 = 95;
pub const IN_DIR: &str = "HEXMAP_IN";
pub const OUT_DIR: &str = "HEXMAP_OUT";
pub const DEFAULT_INPUT: &str = "input.json";
pub const INPUT_EXTENSION: &str = "json";
pub const DEFAULT_FONT_PATH: &str = "./fonts/CascadiaPL.ttf";
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
