//! Canvas 2D surface

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Streak, Surface};
use crate::error::EngineError;

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Acquire the 2D context of `canvas`
    ///
    /// Fails with [`EngineError::NoSurface`] when the browser has no 2D
    /// context for it (or the canvas already has a different context type).
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, EngineError> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(EngineError::NoSurface)?;
        Ok(Self { canvas, ctx })
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn stroke_streak(&mut self, streak: &Streak) {
        let color = streak.color.to_css();
        let ctx = &self.ctx;

        ctx.save();
        ctx.set_global_alpha(streak.opacity as f64);
        ctx.set_stroke_style_str(&color);
        ctx.set_line_width(streak.width as f64);
        ctx.begin_path();
        ctx.move_to(streak.head.x as f64, streak.head.y as f64);
        ctx.line_to(streak.tail.x as f64, streak.tail.y as f64);
        ctx.set_shadow_color(&color);
        ctx.set_shadow_blur(streak.glow_blur as f64);
        ctx.stroke();
        ctx.restore();
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }
}
