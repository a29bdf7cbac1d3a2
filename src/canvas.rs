// 2D canvas backed `Surface`. Keeps the backing store at device resolution while
// drawing in CSS pixels

use std::f64::consts::PI;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::color::Rgba;
use crate::surface::Surface;

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasSurface {
    // None when the canvas refuses to hand out a 2d context
    pub fn new(canvas: HtmlCanvasElement) -> Option<CanvasSurface> {
        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(CanvasSurface {
            canvas,
            context,
            width: 0.0,
            height: 0.0,
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Sizes the backing store to `width * ratio` by `height * ratio` device
    /// pixels, keeps the CSS size at `width` x `height` and scales drawing so
    /// callers keep working in CSS pixels.
    pub fn resize(&mut self, width: f64, height: f64, ratio: f64) -> Result<(), JsValue> {
        let ratio = if ratio > 0.0 { ratio } else { 1.0 };
        self.width = width.max(0.0);
        self.height = height.max(0.0);

        self.canvas.set_width((self.width * ratio) as u32);
        self.canvas.set_height((self.height * ratio) as u32);
        let style = self.canvas.style();
        style.set_property("width", &format!("{}px", self.width))?;
        style.set_property("height", &format!("{}px", self.height))?;

        // Changing the backing size resets the transform, so set it outright
        self.context.set_transform(ratio, 0.0, 0.0, ratio, 0.0, 0.0)
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        self.context.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn radial_glow(&mut self, x: f64, y: f64, radius: f64, inner: Rgba, outer: Rgba) {
        let gradient = match self
            .context
            .create_radial_gradient(x, y, 0.0, x, y, radius)
        {
            Ok(gradient) => gradient,
            Err(err) => {
                log::debug!("skipping glow: {:?}", err);
                return;
            }
        };
        if gradient.add_color_stop(0.0, &inner.to_string()).is_err()
            || gradient.add_color_stop(1.0, &outer.to_string()).is_err()
        {
            return;
        }
        #[allow(deprecated)]
        self.context.set_fill_style(&gradient);
        self.context.fill_rect(0.0, 0.0, self.width, self.height);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, fill: Rgba) {
        self.context.begin_path();
        if self.context.arc(x, y, radius, 0.0, PI * 2.0).is_err() {
            return;
        }
        #[allow(deprecated)]
        self.context
            .set_fill_style(&JsValue::from_str(&fill.to_string()));
        self.context.fill();
    }
}
