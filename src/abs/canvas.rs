//! Browser canvas and WebGL2 context.

use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, WebGl2RenderingContext};

use crate::abs::{Extent, Surface};
use crate::error::Error;

/// A `<canvas>` element in the current document.
pub struct Canvas {
    element: HtmlCanvasElement,
}

impl Canvas {
    /// Finds the first element matching `selector`, which must be a canvas.
    pub fn query(selector: &str) -> Result<Self, Error> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| Error::NoContext("no document to draw in".to_string()))?;
        let element = document
            .query_selector(selector)
            .map_err(|e| Error::NoContext(format!("invalid selector `{selector}`: {e:?}")))?
            .ok_or_else(|| Error::NoContext(format!("no element matches `{selector}`")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| Error::NoContext(format!("`{selector}` is not a canvas")))?;
        Ok(Self { element })
    }

    /// Returns `None` when the browser cannot provide a `webgl2` context.
    pub fn webgl2_context(&self) -> Option<glow::Context> {
        let context = self
            .element
            .get_context("webgl2")
            .ok()??
            .dyn_into::<WebGl2RenderingContext>()
            .ok()?;
        Some(glow::Context::from_webgl2_context(context))
    }

    pub fn device_pixel_ratio(&self) -> f64 {
        web_sys::window().map_or(1.0, |window| window.device_pixel_ratio())
    }
}

impl Surface for Canvas {
    fn display_size(&self) -> Extent {
        Extent::new(
            self.element.client_width().max(0) as u32,
            self.element.client_height().max(0) as u32,
        )
    }

    fn drawing_size(&self) -> Extent {
        Extent::new(self.element.width(), self.element.height())
    }

    fn set_drawing_size(&mut self, extent: Extent) {
        self.element.set_width(extent.width);
        self.element.set_height(extent.height);
    }
}
