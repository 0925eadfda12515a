use wasm_bindgen::JsCast;
use web_sys::{window, CssStyleDeclaration, HtmlCanvasElement, HtmlElement, Window};

use crate::dimension::Viewport;
use crate::error::{Error, Result};
use crate::resizer::{CanvasTarget, WindowHost};

const CANVAS_SHADOW: &str = "0 0 24px rgba(0, 0, 0, 0.35)";
const FRAME_PROPERTIES: [(&str, &str); 4] = [
    ("display", "flex"),
    ("justify-content", "center"),
    ("align-items", "center"),
    ("height", "100%"),
];

pub(crate) fn browser_window() -> Result<Window> {
    window().ok_or_else(|| Error::Dom("no window".into()))
}

pub struct DomWindow {
    window: Window,
    saved_overflow: Option<String>,
}

impl DomWindow {
    pub fn new() -> Result<Self> {
        Ok(Self {
            window: browser_window()?,
            saved_overflow: None,
        })
    }

    fn body_style(&self) -> Result<CssStyleDeclaration> {
        let body = self
            .window
            .document()
            .and_then(|document| document.body())
            .ok_or_else(|| Error::Dom("no document body".into()))?;
        Ok(body.style())
    }
}

impl WindowHost for DomWindow {
    fn viewport(&self) -> Viewport {
        let read = |value: std::result::Result<wasm_bindgen::JsValue, _>| {
            value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
        };
        Viewport::new(read(self.window.inner_width()), read(self.window.inner_height()))
    }

    fn lock_scroll(&mut self) -> Result<()> {
        let style = self.body_style()?;
        if self.saved_overflow.is_none() {
            self.saved_overflow = Some(style.get_property_value("overflow")?);
        }
        style.set_property("overflow", "hidden")?;
        Ok(())
    }

    fn unlock_scroll(&mut self) -> Result<()> {
        let Some(previous) = self.saved_overflow.take() else {
            return Ok(());
        };
        let style = self.body_style()?;
        if previous.is_empty() {
            style.remove_property("overflow")?;
        } else {
            style.set_property("overflow", &previous)?;
        }
        Ok(())
    }
}

pub struct DomCanvas {
    canvas: HtmlCanvasElement,
    framed_parent: Option<HtmlElement>,
}

impl DomCanvas {
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self {
            canvas,
            framed_parent: None,
        }
    }

    pub fn element(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl CanvasTarget for DomCanvas {
    fn set_css_size(&mut self, width: f64, height: f64) -> Result<()> {
        let style = self.canvas.style();
        style.set_property("width", &format!("{width}px"))?;
        style.set_property("height", &format!("{height}px"))?;
        Ok(())
    }

    fn frame(&mut self) -> Result<()> {
        let parent = self
            .canvas
            .parent_element()
            .and_then(|parent| parent.dyn_into::<HtmlElement>().ok());
        if let Some(parent) = parent {
            let style = parent.style();
            for (name, value) in FRAME_PROPERTIES {
                style.set_property(name, value)?;
            }
            self.framed_parent = Some(parent);
        }
        self.canvas.style().set_property("box-shadow", CANVAS_SHADOW)?;
        Ok(())
    }

    fn unframe(&mut self) -> Result<()> {
        if let Some(parent) = self.framed_parent.take() {
            let style = parent.style();
            for (name, _) in FRAME_PROPERTIES {
                style.remove_property(name)?;
            }
        }
        self.canvas.style().remove_property("box-shadow")?;
        Ok(())
    }
}
