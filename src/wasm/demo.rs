//! Demo sketch: a WebGL2 clear color drifting between two palette colors.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlCanvasElement, WebGl2RenderingContext as GL};

use super::frame::RafScheduler;
use super::resize::WebResizer;
use crate::color::{self, Rgba};
use crate::config::ResizerOptions;
use crate::error::{Error, Result};
use crate::sketch::{Frame, Renderer, Sketch};

pub type DemoSketch = Sketch<ClearColor, WebResizer, RafScheduler>;

const PALETTE: [&str; 3] = ["#4a0d33", "#0d2b4a", "#12001a"];
const PERIOD_MS: f64 = 6000.0;

pub struct ClearColor {
    canvas: HtmlCanvasElement,
    gl: GL,
    palette: Vec<Rgba>,
}

impl ClearColor {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let gl: GL = canvas
            .get_context("webgl2")?
            .ok_or_else(|| Error::Dom("WebGL2 not supported".into()))?
            .dyn_into()
            .map_err(|_| Error::Dom("context is not WebGL2".into()))?;
        let palette = PALETTE
            .iter()
            .map(|hex| Rgba::from_hex(hex))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            canvas,
            gl,
            palette,
        })
    }
}

impl Renderer for ClearColor {
    fn resize(&mut self, pixel_width: u32, pixel_height: u32) {
        self.canvas.set_width(pixel_width);
        self.canvas.set_height(pixel_height);
        self.gl.viewport(0, 0, pixel_width as i32, pixel_height as i32);
    }

    fn draw(&mut self, frame: &Frame) {
        let phase = (frame.tick.elapsed_ms / PERIOD_MS * std::f64::consts::TAU).sin() * 0.5 + 0.5;
        let Some(c) = color::sample(&self.palette, phase) else {
            return;
        };
        self.gl.clear_color(c.r as f32, c.g as f32, c.b as f32, c.a as f32);
        self.gl.clear(GL::COLOR_BUFFER_BIT);
    }
}

/// Builds and starts the demo on `canvas`.
pub fn start(canvas: HtmlCanvasElement) -> std::result::Result<DemoSketch, JsValue> {
    let scale_factor = web_sys::window()
        .map(|window| window.device_pixel_ratio())
        .unwrap_or(1.0);
    let options = ResizerOptions::default().with_scale_factor(scale_factor);
    let resizer = WebResizer::new(Some(canvas.clone()), options)?;
    let mut sketch = Sketch::new(ClearColor::new(canvas)?, resizer, RafScheduler);
    sketch.start()?;
    Ok(sketch)
}
