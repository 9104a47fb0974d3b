use super::value_objects::{BODY_GAIN, CandlePalette, CanvasSize, Color, Viewport, WICK_GAIN};
use crate::domain::market_data::OhlcRecord;
use serde::Serialize;

/// Body width in logical units before scaling
pub const CANDLE_WIDTH: f64 = 2.0;
/// Grid spacing in device pixels per unit of scale
pub const GRID_SPACING: f64 = 10.0;
/// Smallest grid step so a tiny scale still terminates
pub const MIN_GRID_STEP: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl LineSegment {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

/// Rectangle with a signed height: negative heights extend upwards
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
}

/// Screen-space primitives of one candle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CandleProjection {
    pub color: Color,
    pub wick: LineSegment,
    pub body: Rect,
}

/// Stateless record-to-primitives mapping. Safe to share across threads as
/// long as the viewport it reads is not being written.
#[derive(Debug, Clone, Copy, Default)]
pub struct CandleProjector {
    palette: CandlePalette,
}

impl CandleProjector {
    pub fn new(palette: CandlePalette) -> Self {
        Self { palette }
    }

    pub fn color_for(&self, record: &OhlcRecord) -> Color {
        if record.is_doji() {
            self.palette.doji
        } else if record.is_bullish() {
            self.palette.bullish
        } else {
            self.palette.bearish
        }
    }

    pub fn project(
        &self,
        record: &OhlcRecord,
        index: usize,
        series_len: usize,
        viewport: &Viewport,
    ) -> CandleProjection {
        let x = viewport.project_x(index, series_len);
        let wick = LineSegment::new(
            x,
            viewport.project_y(record.high, WICK_GAIN),
            x,
            viewport.project_y(record.low, WICK_GAIN),
        );

        let width = CANDLE_WIDTH * viewport.scale;
        let body = Rect::new(
            x - width / 2.0,
            viewport.project_y(record.open, BODY_GAIN),
            width,
            (record.open - record.close) * viewport.scale * BODY_GAIN,
        );

        CandleProjection { color: self.color_for(record), wick, body }
    }
}

/// Unscaled overlay lines: verticals every `scale * 10` px across the width,
/// then horizontals down the height.
pub fn grid_lines(canvas: CanvasSize, scale: f64) -> Vec<LineSegment> {
    let step = (scale * GRID_SPACING).max(MIN_GRID_STEP);
    if !step.is_finite() {
        return Vec::new();
    }

    let mut lines = Vec::new();
    let mut x = 0.0;
    while x < canvas.width {
        lines.push(LineSegment::new(x, 0.0, x, canvas.height));
        x += step;
    }
    let mut y = 0.0;
    while y < canvas.height {
        lines.push(LineSegment::new(0.0, y, canvas.width, y));
        y += step;
    }
    lines
}
