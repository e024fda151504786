//! Drawing surface abstraction. The browser implementation wraps a 2d canvas;
//! tests substitute a recording surface.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::ShapePrimitive;

/// 2-D raster area the particle field paints onto each frame.
pub trait DrawSurface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    fn resize(&mut self, width: f64, height: f64);
    fn clear(&mut self);
    /// Paint a filled primitive centred at (x, y).
    fn fill_shape(&mut self, x: f64, y: f64, shape: ShapePrimitive, color: &str, opacity: f64);
}

/// Canvas-backed surface.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl DrawSurface for CanvasSurface {
    fn width(&self) -> f64 {
        self.canvas.width() as f64
    }

    fn height(&self) -> f64 {
        self.canvas.height() as f64
    }

    fn resize(&mut self, width: f64, height: f64) {
        self.canvas.set_width(width.max(0.0) as u32);
        self.canvas.set_height(height.max(0.0) as u32);
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width(), self.height());
    }

    fn fill_shape(&mut self, x: f64, y: f64, shape: ShapePrimitive, color: &str, opacity: f64) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_global_alpha(opacity);
        #[allow(deprecated)]
        ctx.set_fill_style(&JsValue::from_str(color));
        ctx.begin_path();
        // arc/ellipse only fail on negative radii, which sampling never produces
        match shape {
            ShapePrimitive::Circle { radius } => {
                ctx.arc(x, y, radius, 0.0, std::f64::consts::TAU).ok();
            }
            ShapePrimitive::Ellipse { radius_x, radius_y, rotation } => {
                ctx.ellipse(x, y, radius_x, radius_y, rotation, 0.0, std::f64::consts::TAU).ok();
            }
        }
        ctx.fill();
        ctx.restore();
    }
}
