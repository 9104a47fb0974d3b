use serde::{Deserialize, Serialize};

/// Vertical gain applied to wick endpoints (absolute high/low)
pub const WICK_GAIN: f64 = 3.0;
/// Vertical gain applied to the body origin and height
pub const BODY_GAIN: f64 = 2.0;
/// Startup scale
pub const DEFAULT_SCALE: f64 = 3.0;
/// Zoom-out floor
pub const MIN_SCALE: f64 = 0.05;

/// Value Object - drawable area in device pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(1920.0, 1080.0)
    }
}

/// Value Object - a point in device pixels, origin top-left
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Value Object - 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// CSS color string for 2D canvas fill/stroke styles
    pub fn to_css(&self) -> String {
        format!("rgba({},{},{},{:.3})", self.r, self.g, self.b, self.a as f64 / 255.0)
    }

    pub const BACKGROUND: Color = Color::rgb(20, 20, 20);
    pub const GRID: Color = Color::rgb(100, 100, 100);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const LIGHT_GRAY: Color = Color::rgb(200, 200, 200);
}

/// Fixed colors of one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandlePalette {
    pub background: Color,
    pub grid: Color,
    pub bullish: Color,
    pub bearish: Color,
    /// Used when open == close
    pub doji: Color,
}

impl Default for CandlePalette {
    fn default() -> Self {
        Self {
            background: Color::BACKGROUND,
            grid: Color::GRID,
            bullish: Color::GREEN,
            bearish: Color::RED,
            doji: Color::LIGHT_GRAY,
        }
    }
}

/// Value Object - camera state mapping price/index space to the canvas.
///
/// Candles are drawn with the surface scale set to `scale`, so a logical
/// coordinate `c` lands on device pixel `c * scale`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub scale: f64,
    pub pan_x: f64,
    pub pan_y: f64,
    canvas: CanvasSize,
    min_scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(CanvasSize::default(), DEFAULT_SCALE)
    }
}

impl Viewport {
    pub fn new(canvas: CanvasSize, scale: f64) -> Self {
        Self { scale, pan_x: 0.0, pan_y: 0.0, canvas, min_scale: MIN_SCALE }
    }

    pub fn with_min_scale(mut self, min_scale: f64) -> Self {
        self.min_scale = min_scale;
        self
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    /// Horizontal distance between consecutive records
    pub fn slot_width(&self, series_len: usize) -> f64 {
        if series_len == 0 {
            return 0.0;
        }
        self.canvas.width / series_len as f64
    }

    /// `index * (canvas_width / series_len) + pan_x`
    pub fn project_x(&self, index: usize, series_len: usize) -> f64 {
        index as f64 * self.slot_width(series_len) + self.pan_x
    }

    /// `canvas_height - price * scale * gain + pan_y`
    pub fn project_y(&self, price: f64, gain: f64) -> f64 {
        self.canvas.height - price * self.scale * gain + self.pan_y
    }

    /// Device pixel of a logical coordinate drawn in scaled mode
    pub fn to_device(&self, logical: f64) -> f64 {
        logical * self.scale
    }

    /// Step the scale and move the pan so that the index/price under `pivot`
    /// (device pixels) stays under it. Zooming out stops at the floor, and a
    /// scale that already starts below the floor is never raised by it.
    pub fn apply_zoom_delta(&mut self, delta: f64, pivot: ScreenPoint) {
        let old = self.scale;
        let new = if delta < 0.0 { (old + delta).max(self.min_scale.min(old)) } else { old + delta };
        if new == old {
            return;
        }
        self.scale = new;
        if old <= 0.0 || !old.is_finite() {
            return;
        }

        // offset from the first slot and price under the pointer before the step
        let slot_offset = pivot.x / old - self.pan_x;
        let price = (self.canvas.height + self.pan_y - pivot.y / old) / (old * WICK_GAIN);

        self.pan_x = pivot.x / new - slot_offset;
        self.pan_y = pivot.y / new - self.canvas.height + price * new * WICK_GAIN;
    }

    pub fn apply_pan(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Horizontal scroll used when the zoom modifier is not held
    pub fn apply_coarse_pan(&mut self, dx: f64) {
        self.pan_x += dx;
    }
}
