//! JavaScript-facing classes for sketches written in JS.

use js_sys::{Function, Reflect, JSON};
use log::error;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use super::frame::RafScheduler;
use super::resize::WebResizer;
use crate::animator::Animator;
use crate::config::ResizerOptions;
use crate::error::Result;

fn parse_options(options: &JsValue) -> Result<ResizerOptions> {
    if options.is_undefined() || options.is_null() {
        return Ok(ResizerOptions::default());
    }
    let json = JSON::stringify(options)?;
    ResizerOptions::from_json(&String::from(json))
}

/// `onResize` does not survive JSON, so it is read off the object directly.
fn on_resize_option(options: &JsValue) -> Option<Function> {
    if !options.is_object() {
        return None;
    }
    Reflect::get(options, &JsValue::from_str("onResize"))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}

/// `new CanvasResizer(canvas?, { dimension, dimensionScaleFactor, throttleMs, paddingPx, onResize }, onResize?)`
///
/// An `onResize` in the options object wins over the third argument.
#[wasm_bindgen(js_name = CanvasResizer)]
pub struct JsCanvasResizer {
    inner: WebResizer,
}

#[wasm_bindgen(js_class = CanvasResizer)]
impl JsCanvasResizer {
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: Option<HtmlCanvasElement>,
        options: JsValue,
        on_resize: Option<Function>,
    ) -> std::result::Result<JsCanvasResizer, JsValue> {
        let mut inner = WebResizer::new(canvas, parse_options(&options)?)?;
        if let Some(on_resize) = on_resize_option(&options).or(on_resize) {
            inner.set_on_resize(Box::new(move |width, height| {
                let result = on_resize.call2(&JsValue::NULL, &width.into(), &height.into());
                if let Err(err) = result {
                    error!("onResize threw: {err:?}");
                }
            }));
        }
        Ok(Self { inner })
    }

    pub fn attach(&mut self, canvas: HtmlCanvasElement) -> std::result::Result<(), JsValue> {
        Ok(self.inner.attach(canvas)?)
    }

    pub fn init(&mut self) -> std::result::Result<(), JsValue> {
        Ok(self.inner.init()?)
    }

    #[wasm_bindgen(js_name = calculateDimensions)]
    pub fn calculate_dimensions(&mut self) -> std::result::Result<(), JsValue> {
        self.inner.calculate_dimensions()?;
        Ok(())
    }

    pub fn destroy(&mut self) {
        self.inner.destroy();
    }

    #[wasm_bindgen(getter, js_name = pixelWidth)]
    pub fn pixel_width(&self) -> u32 {
        self.inner.state().pixel_width
    }

    #[wasm_bindgen(getter, js_name = pixelHeight)]
    pub fn pixel_height(&self) -> u32 {
        self.inner.state().pixel_height
    }

    #[wasm_bindgen(getter, js_name = cssWidth)]
    pub fn css_width(&self) -> f64 {
        self.inner.state().css_width
    }

    #[wasm_bindgen(getter, js_name = cssHeight)]
    pub fn css_height(&self) -> f64 {
        self.inner.state().css_height
    }
}

/// `new Animator(onFrame)`. An exception thrown by `onFrame` ends the loop.
#[wasm_bindgen(js_name = Animator)]
pub struct JsAnimator {
    inner: Animator<RafScheduler>,
}

#[wasm_bindgen(js_class = Animator)]
impl JsAnimator {
    #[wasm_bindgen(constructor)]
    pub fn new(on_frame: Function) -> JsAnimator {
        let inner = Animator::new(RafScheduler, move |timestamp| {
            if let Err(err) = on_frame.call1(&JsValue::NULL, &timestamp.into()) {
                wasm_bindgen::throw_val(err);
            }
        });
        Self { inner }
    }

    pub fn start(&self) {
        self.inner.start();
    }

    pub fn stop(&self) {
        self.inner.stop();
    }

    pub fn dispose(&self) {
        self.inner.dispose();
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.inner.is_running()
    }
}
