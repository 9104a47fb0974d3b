use crate::domain::{
    chart::{CandlePalette, CandleProjection, CandleProjector, CanvasSize, Color, LineSegment, Rect, Viewport, grid_lines},
    errors::RenderingResult,
    market_data::PriceSeries,
};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Push side of the display collaborator
pub trait DisplaySurface {
    fn open(&mut self, title: &str, size: CanvasSize) -> RenderingResult<()>;
    fn set_draw_color(&mut self, color: Color) -> RenderingResult<()>;
    fn clear(&mut self) -> RenderingResult<()>;
    fn draw_line(&mut self, line: &LineSegment) -> RenderingResult<()>;
    fn fill_rect(&mut self, rect: &Rect) -> RenderingResult<()>;
    /// Uniform scale applied to every following draw call
    fn set_scale(&mut self, sx: f64, sy: f64) -> RenderingResult<()>;
    fn present(&mut self) -> RenderingResult<()>;
    fn close(&mut self);
}

/// Counters of one finished frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub grid_lines: usize,
    pub candles: usize,
}

/// One frame: clear, optional unscaled grid, scaled candles, present.
/// This is the only place the surface scale mode is switched.
#[derive(Debug, Clone)]
pub struct RenderPass {
    projector: CandleProjector,
    palette: CandlePalette,
    show_grid: bool,
    parallel_threshold: usize,
}

impl RenderPass {
    pub fn new(palette: CandlePalette, show_grid: bool) -> Self {
        Self {
            projector: CandleProjector::new(palette),
            palette,
            show_grid,
            parallel_threshold: 1_000,
        }
    }

    /// Series at least this long are projected on the rayon pool when the
    /// `parallel` feature is on
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    pub fn projector(&self) -> &CandleProjector {
        &self.projector
    }

    pub fn execute(
        &self,
        surface: &mut dyn DisplaySurface,
        viewport: &Viewport,
        series: Option<&PriceSeries>,
    ) -> RenderingResult<FrameStats> {
        let mut stats = FrameStats::default();

        surface.set_draw_color(self.palette.background)?;
        surface.clear()?;

        if self.show_grid {
            surface.set_draw_color(self.palette.grid)?;
            surface.set_scale(1.0, 1.0)?;
            for line in grid_lines(viewport.canvas(), viewport.scale) {
                surface.draw_line(&line)?;
                stats.grid_lines += 1;
            }
        }

        surface.set_scale(viewport.scale, viewport.scale)?;

        if let Some(series) = series {
            for projection in self.project_series(series, viewport) {
                surface.set_draw_color(projection.color)?;
                surface.draw_line(&projection.wick)?;
                surface.fill_rect(&projection.body)?;
                stats.candles += 1;
            }
        }

        surface.present()?;
        Ok(stats)
    }

    /// Project every record in order
    pub fn project_series(&self, series: &PriceSeries, viewport: &Viewport) -> Vec<CandleProjection> {
        let len = series.len();

        #[cfg(feature = "parallel")]
        {
            if len >= self.parallel_threshold {
                return series
                    .records()
                    .par_iter()
                    .enumerate()
                    .map(|(i, record)| self.projector.project(record, i, len, viewport))
                    .collect();
            }
        }

        series
            .iter()
            .enumerate()
            .map(|(i, record)| self.projector.project(record, i, len, viewport))
            .collect()
    }
}
