// Drawing seam between the particle field and the canvas. The field only knows
// about `Painter`; the 2d canvas context is the real implementation.

use crate::field::Viewport;
use vecmath::Vector2;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub trait Painter {
    fn clear(&mut self, viewport: Viewport);
    fn fill_circle(&mut self, center: Vector2<f64>, radius: f64, style: &str);
    fn stroke_line(&mut self, from: Vector2<f64>, to: Vector2<f64>, width: f64, style: &str);
}

pub struct Renderer {
    pub context: CanvasRenderingContext2d,
}

impl Renderer {
    // Grabs the 2d context from the canvas, None when the browser won't give one
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Option<Self>, JsValue> {
        let context = match canvas.get_context("2d")? {
            Some(ctx) => ctx.dyn_into::<CanvasRenderingContext2d>()?,
            None => return Ok(None),
        };
        Ok(Some(Renderer { context }))
    }
}

impl Painter for Renderer {
    fn clear(&mut self, viewport: Viewport) {
        self.context.clear_rect(0.0, 0.0, viewport.width, viewport.height);
    }

    fn fill_circle(&mut self, center: Vector2<f64>, radius: f64, style: &str) {
        self.context.begin_path();
        if self
            .context
            .arc(center[0], center[1], radius, 0.0, std::f64::consts::PI * 2.0)
            .is_err()
        {
            // only throws for a negative radius
            return;
        }
        #[allow(deprecated)]
        self.context.set_fill_style(&JsValue::from_str(style));
        self.context.fill();
    }

    fn stroke_line(&mut self, from: Vector2<f64>, to: Vector2<f64>, width: f64, style: &str) {
        self.context.begin_path();
        #[allow(deprecated)]
        self.context.set_stroke_style(&JsValue::from_str(style));
        self.context.set_line_width(width);
        self.context.move_to(from[0], from[1]);
        self.context.line_to(to[0], to[1]);
        self.context.stroke();
    }
}
