//! Recording surface. Captures every draw call in order so a frame can be
//! inspected without a browser.

use crate::domain::Rgba;

use super::surface::{GradientStop, LineCap, LineJoin, Paint, Surface, TextAlign};

#[derive(Clone, Debug, PartialEq)]
pub enum RecordedPaint {
    Solid(Rgba),
    Linear(Vec<GradientStop>),
    Radial(Vec<GradientStop>),
}

impl From<Paint<'_>> for RecordedPaint {
    fn from(paint: Paint<'_>) -> Self {
        match paint {
            Paint::Solid(c) => RecordedPaint::Solid(c),
            Paint::Linear { stops, .. } => RecordedPaint::Linear(stops.to_vec()),
            Paint::Radial { stops, .. } => RecordedPaint::Radial(stops.to_vec()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    Translate(f64, f64),
    Rotate(f64),
    SetFill(RecordedPaint),
    SetStroke(RecordedPaint),
    SetLineWidth(f64),
    SetLineCap(LineCap),
    SetLineJoin(LineJoin),
    SetGlobalAlpha(f64),
    SetShadow(Rgba, f64),
    SetFont(String),
    SetTextAlign(TextAlign),
    ClearRect(f64, f64, f64, f64),
    FillRect(f64, f64, f64, f64),
    StrokeRect(f64, f64, f64, f64),
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    QuadraticCurveTo(f64, f64, f64, f64),
    Arc { x: f64, y: f64, radius: f64 },
    ArcTo(f64, f64, f64, f64, f64),
    ClosePath,
    Fill,
    Stroke,
    FillText { text: String, x: f64, y: f64 },
}

#[derive(Default)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// All text drawn, in order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Index of the first text command equal to `text`
    pub fn position_of_text(&self, text: &str) -> Option<usize> {
        self.commands
            .iter()
            .position(|c| matches!(c, DrawCommand::FillText { text: t, .. } if t == text))
    }

    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }

    fn push(&mut self, cmd: DrawCommand) {
        self.commands.push(cmd);
    }
}

impl Surface for DisplayList {
    fn save(&mut self) {
        self.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.push(DrawCommand::Restore);
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.push(DrawCommand::Translate(x, y));
    }

    fn rotate(&mut self, angle: f64) {
        self.push(DrawCommand::Rotate(angle));
    }

    fn set_fill(&mut self, paint: Paint<'_>) {
        self.push(DrawCommand::SetFill(paint.into()));
    }

    fn set_stroke(&mut self, paint: Paint<'_>) {
        self.push(DrawCommand::SetStroke(paint.into()));
    }

    fn set_line_width(&mut self, width: f64) {
        self.push(DrawCommand::SetLineWidth(width));
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.push(DrawCommand::SetLineCap(cap));
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.push(DrawCommand::SetLineJoin(join));
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.push(DrawCommand::SetGlobalAlpha(alpha));
    }

    fn set_shadow(&mut self, color: Rgba, blur: f64) {
        self.push(DrawCommand::SetShadow(color, blur));
    }

    fn set_font(&mut self, font: &str) {
        self.push(DrawCommand::SetFont(font.to_string()));
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.push(DrawCommand::SetTextAlign(align));
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.push(DrawCommand::ClearRect(x, y, w, h));
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.push(DrawCommand::FillRect(x, y, w, h));
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.push(DrawCommand::StrokeRect(x, y, w, h));
    }

    fn begin_path(&mut self) {
        self.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.push(DrawCommand::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.push(DrawCommand::LineTo(x, y));
    }

    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
        self.push(DrawCommand::QuadraticCurveTo(cpx, cpy, x, y));
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, _start: f64, _end: f64) {
        self.push(DrawCommand::Arc { x, y, radius });
    }

    fn arc_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, radius: f64) {
        self.push(DrawCommand::ArcTo(x1, y1, x2, y2, radius));
    }

    fn close_path(&mut self) {
        self.push(DrawCommand::ClosePath);
    }

    fn fill(&mut self) {
        self.push(DrawCommand::Fill);
    }

    fn stroke(&mut self) {
        self.push(DrawCommand::Stroke);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.push(DrawCommand::FillText { text: text.to_string(), x, y });
    }
}
