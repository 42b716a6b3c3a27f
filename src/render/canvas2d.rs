//! `Surface` over the browser's 2D canvas context.
//!
//! Canvas calls that return `Result` only fail on invalid arguments (negative
//! radii, non-finite angles); those are dropped rather than aborting a frame.

use web_sys::{CanvasGradient, CanvasRenderingContext2d};

use crate::domain::Rgba;

use super::surface::{GradientStop, LineCap, LineJoin, Paint, Surface, TextAlign};

fn add_stops(gradient: &CanvasGradient, stops: &[GradientStop]) {
    for (offset, color) in stops {
        let _ = gradient.add_color_stop(*offset as f32, &color.css());
    }
}

enum Style {
    Css(String),
    Gradient(CanvasGradient),
}

fn resolve(ctx: &CanvasRenderingContext2d, paint: Paint<'_>) -> Option<Style> {
    match paint {
        Paint::Solid(color) => Some(Style::Css(color.css())),
        Paint::Linear { x0, y0, x1, y1, stops } => {
            let gradient = ctx.create_linear_gradient(x0, y0, x1, y1);
            add_stops(&gradient, stops);
            Some(Style::Gradient(gradient))
        }
        Paint::Radial { x0, y0, r0, x1, y1, r1, stops } => {
            let gradient = ctx.create_radial_gradient(x0, y0, r0, x1, y1, r1).ok()?;
            add_stops(&gradient, stops);
            Some(Style::Gradient(gradient))
        }
    }
}

impl Surface for CanvasRenderingContext2d {
    fn save(&mut self) {
        CanvasRenderingContext2d::save(self);
    }

    fn restore(&mut self) {
        CanvasRenderingContext2d::restore(self);
    }

    fn translate(&mut self, x: f64, y: f64) {
        let _ = CanvasRenderingContext2d::translate(self, x, y);
    }

    fn rotate(&mut self, angle: f64) {
        let _ = CanvasRenderingContext2d::rotate(self, angle);
    }

    fn set_fill(&mut self, paint: Paint<'_>) {
        match resolve(self, paint) {
            Some(Style::Css(css)) => self.set_fill_style_str(&css),
            Some(Style::Gradient(g)) => self.set_fill_style_canvas_gradient(&g),
            None => {}
        }
    }

    fn set_stroke(&mut self, paint: Paint<'_>) {
        match resolve(self, paint) {
            Some(Style::Css(css)) => self.set_stroke_style_str(&css),
            Some(Style::Gradient(g)) => self.set_stroke_style_canvas_gradient(&g),
            None => {}
        }
    }

    fn set_line_width(&mut self, width: f64) {
        CanvasRenderingContext2d::set_line_width(self, width);
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        CanvasRenderingContext2d::set_line_cap(self, cap.as_str());
    }

    fn set_line_join(&mut self, join: LineJoin) {
        CanvasRenderingContext2d::set_line_join(self, join.as_str());
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        CanvasRenderingContext2d::set_global_alpha(self, alpha);
    }

    fn set_shadow(&mut self, color: Rgba, blur: f64) {
        self.set_shadow_color(&color.css());
        self.set_shadow_blur(blur);
    }

    fn set_font(&mut self, font: &str) {
        CanvasRenderingContext2d::set_font(self, font);
    }

    fn set_text_align(&mut self, align: TextAlign) {
        CanvasRenderingContext2d::set_text_align(self, align.as_str());
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        CanvasRenderingContext2d::clear_rect(self, x, y, w, h);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        CanvasRenderingContext2d::fill_rect(self, x, y, w, h);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        CanvasRenderingContext2d::stroke_rect(self, x, y, w, h);
    }

    fn begin_path(&mut self) {
        CanvasRenderingContext2d::begin_path(self);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        CanvasRenderingContext2d::move_to(self, x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        CanvasRenderingContext2d::line_to(self, x, y);
    }

    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
        CanvasRenderingContext2d::quadratic_curve_to(self, cpx, cpy, x, y);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) {
        let _ = CanvasRenderingContext2d::arc(self, x, y, radius.max(0.0), start, end);
    }

    fn arc_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, radius: f64) {
        let _ = CanvasRenderingContext2d::arc_to(self, x1, y1, x2, y2, radius.max(0.0));
    }

    fn close_path(&mut self) {
        CanvasRenderingContext2d::close_path(self);
    }

    fn fill(&mut self) {
        CanvasRenderingContext2d::fill(self);
    }

    fn stroke(&mut self) {
        CanvasRenderingContext2d::stroke(self);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let _ = CanvasRenderingContext2d::fill_text(self, text, x, y);
    }
}
