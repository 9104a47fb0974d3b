use crate::application::use_cases::DisplaySurface;
use crate::domain::{
    chart::{CanvasSize, Color, LineSegment, Rect},
    errors::{AppError, RenderingResult},
    logging::{LogComponent, get_logger},
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

fn js_error(context: &str, err: JsValue) -> AppError {
    AppError::Rendering(format!("{}: {:?}", context, err))
}

/// Canvas 2D implementation of the display surface
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    size: CanvasSize,
    scale: (f64, f64),
}

impl CanvasSurface {
    pub fn from_canvas(canvas: HtmlCanvasElement) -> RenderingResult<Self> {
        let context = canvas
            .get_context("2d")
            .map_err(|e| js_error("Failed to get 2D context", e))?
            .ok_or_else(|| AppError::Rendering("2D context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| AppError::Rendering("Failed to cast to 2D context".to_string()))?;

        let size = CanvasSize::new(canvas.width() as f64, canvas.height() as f64);
        Ok(Self { canvas, context, size, scale: (1.0, 1.0) })
    }

    fn apply_transform(&self) -> RenderingResult<()> {
        let (sx, sy) = self.scale;
        self.context
            .set_transform(sx, 0.0, 0.0, sy, 0.0, 0.0)
            .map_err(|e| js_error("set_transform failed", e))
    }
}

impl DisplaySurface for CanvasSurface {
    fn open(&mut self, title: &str, size: CanvasSize) -> RenderingResult<()> {
        self.canvas.set_width(size.width as u32);
        self.canvas.set_height(size.height as u32);
        self.size = size;
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            document.set_title(title);
        }
        get_logger().info(
            LogComponent::Infrastructure("CanvasSurface"),
            &format!("Canvas ready {}x{} for '{}'", size.width, size.height, title),
        );
        Ok(())
    }

    fn set_draw_color(&mut self, color: Color) -> RenderingResult<()> {
        let css = color.to_css();
        self.context.set_fill_style_str(&css);
        self.context.set_stroke_style_str(&css);
        Ok(())
    }

    fn clear(&mut self) -> RenderingResult<()> {
        // clear covers the whole canvas whatever the current scale
        self.context
            .set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
            .map_err(|e| js_error("set_transform failed", e))?;
        self.context.fill_rect(0.0, 0.0, self.size.width, self.size.height);
        self.apply_transform()
    }

    fn draw_line(&mut self, line: &LineSegment) -> RenderingResult<()> {
        self.context.begin_path();
        self.context.move_to(line.x1, line.y1);
        self.context.line_to(line.x2, line.y2);
        self.context.stroke();
        Ok(())
    }

    fn fill_rect(&mut self, rect: &Rect) -> RenderingResult<()> {
        self.context.fill_rect(rect.x, rect.y, rect.width, rect.height);
        Ok(())
    }

    fn set_scale(&mut self, sx: f64, sy: f64) -> RenderingResult<()> {
        self.scale = (sx, sy);
        self.apply_transform()
    }

    fn present(&mut self) -> RenderingResult<()> {
        // the browser composites the canvas after the animation frame callback
        Ok(())
    }

    fn close(&mut self) {
        self.context.set_fill_style_str(&Color::BACKGROUND.to_css());
        let _ = self.context.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        self.context.fill_rect(0.0, 0.0, self.size.width, self.size.height);
        get_logger().info(LogComponent::Infrastructure("CanvasSurface"), "Canvas released");
    }
}
