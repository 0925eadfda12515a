//! Canvas sizing and frame-loop runtime for browser sketches.
//!
//! Everything outside [`wasm`] is target independent and runs in host tests;
//! the `wasm` module binds it to the DOM.

pub mod animator;
pub mod clock;
pub mod color;
pub mod config;
pub mod dimension;
pub mod error;
pub mod resizer;
pub mod sketch;
pub mod throttle;
pub mod tween;

pub use animator::{Animator, FrameScheduler, ManualScheduler};
pub use clock::{Clock, Tick};
pub use color::Rgba;
pub use config::{Dimension, ResizerOptions};
pub use dimension::{ResizerState, SizingPolicy, Viewport};
pub use error::{Error, Result};
pub use resizer::{CanvasResizer, CanvasTarget, ResizeOutcome, WindowHost};
pub use sketch::{Frame, Renderer, Resize, Sketch};
pub use throttle::Throttle;
pub use tween::{Easing, Repeat, Tween, TweenPhase, Tweens};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use std::cell::RefCell;

    use log::info;
    use wasm_bindgen::prelude::*;

    pub mod bindings;
    pub mod demo;
    pub mod dom;
    pub mod frame;
    pub mod resize;

    pub use dom::{DomCanvas, DomWindow};
    pub use frame::RafScheduler;
    pub use resize::WebResizer;

    thread_local! {
        static DEMO: RefCell<Option<demo::DemoSketch>> = RefCell::new(None);
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        wasm_logger::init(wasm_logger::Config::default());

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        // Pages that only use the JS bindings have no demo canvas.
        let Some(canvas) = document.get_element_by_id("c") else {
            info!("no #c canvas, demo not started");
            return Ok(());
        };
        let canvas = canvas.dyn_into::<web_sys::HtmlCanvasElement>()?;

        let sketch = demo::start(canvas)?;
        DEMO.with(|slot| *slot.borrow_mut() = Some(sketch));
        Ok(())
    }

    /// Disposes the demo started by `main`, restoring the page layout.
    #[wasm_bindgen(js_name = stopDemo)]
    pub fn stop_demo() {
        let sketch = DEMO.with(|slot| slot.borrow_mut().take());
        if let Some(mut sketch) = sketch {
            sketch.dispose();
        }
    }
}
