use crate::application::use_cases::DisplaySurface;
use crate::domain::{
    chart::{CanvasSize, Color, LineSegment, Rect},
    errors::RenderingResult,
};
use serde::Serialize;
use std::fmt::Write;

/// One call received by a [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    Open { title: String, size: CanvasSize },
    SetDrawColor(Color),
    Clear,
    SetScale { sx: f64, sy: f64 },
    Line(LineSegment),
    FillRect(Rect),
    Present,
    Close,
}

/// Headless display surface that remembers every call in order
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    frames: usize,
    open: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn frames_presented(&self) -> usize {
        self.frames
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Commands since the last `Present`, exclusive
    pub fn last_frame(&self) -> &[DrawCommand] {
        let end = self.commands.iter().rposition(|c| *c == DrawCommand::Present).unwrap_or(0);
        let start = self.commands[..end]
            .iter()
            .rposition(|c| *c == DrawCommand::Present)
            .map(|i| i + 1)
            .unwrap_or(0);
        &self.commands[start..end]
    }

    pub fn lines(&self) -> impl Iterator<Item = &LineSegment> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line(line) => Some(line),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &Rect> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillRect(rect) => Some(rect),
            _ => None,
        })
    }

    /// One command per line, numbers printed with `{}`
    pub fn transcript(&self) -> String {
        let mut out = String::new();
        for command in &self.commands {
            let _ = match command {
                DrawCommand::Open { title, size } => writeln!(out, "open {:?} {}x{}", title, size.width, size.height),
                DrawCommand::SetDrawColor(c) => writeln!(out, "color {} {} {} {}", c.r, c.g, c.b, c.a),
                DrawCommand::Clear => writeln!(out, "clear"),
                DrawCommand::SetScale { sx, sy } => writeln!(out, "scale {} {}", sx, sy),
                DrawCommand::Line(l) => writeln!(out, "line {} {} {} {}", l.x1, l.y1, l.x2, l.y2),
                DrawCommand::FillRect(r) => writeln!(out, "rect {} {} {} {}", r.x, r.y, r.width, r.height),
                DrawCommand::Present => writeln!(out, "present"),
                DrawCommand::Close => writeln!(out, "close"),
            };
        }
        out
    }
}

impl DisplaySurface for RecordingSurface {
    fn open(&mut self, title: &str, size: CanvasSize) -> RenderingResult<()> {
        self.open = true;
        self.commands.push(DrawCommand::Open { title: title.to_string(), size });
        Ok(())
    }

    fn set_draw_color(&mut self, color: Color) -> RenderingResult<()> {
        self.commands.push(DrawCommand::SetDrawColor(color));
        Ok(())
    }

    fn clear(&mut self) -> RenderingResult<()> {
        self.commands.push(DrawCommand::Clear);
        Ok(())
    }

    fn draw_line(&mut self, line: &LineSegment) -> RenderingResult<()> {
        self.commands.push(DrawCommand::Line(*line));
        Ok(())
    }

    fn fill_rect(&mut self, rect: &Rect) -> RenderingResult<()> {
        self.commands.push(DrawCommand::FillRect(*rect));
        Ok(())
    }

    fn set_scale(&mut self, sx: f64, sy: f64) -> RenderingResult<()> {
        self.commands.push(DrawCommand::SetScale { sx, sy });
        Ok(())
    }

    fn present(&mut self) -> RenderingResult<()> {
        self.frames += 1;
        self.commands.push(DrawCommand::Present);
        Ok(())
    }

    fn close(&mut self) {
        self.open = false;
        self.commands.push(DrawCommand::Close);
    }
}
