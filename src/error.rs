use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// `dimension` was neither `"fullscreen"` nor a `[width, height]` pair.
    #[error("unrecognized dimension `{0}`, expected \"fullscreen\" or [width, height]")]
    UnknownDimension(String),

    #[error("fixed dimension must be positive and finite, got {width}x{height}")]
    InvalidFixedSize { width: f64, height: f64 },

    #[error("dimension scale factor must be positive and finite, got {0}")]
    InvalidScaleFactor(f64),

    #[error("invalid resizer options: {0}")]
    Options(#[from] serde_json::Error),

    #[error("invalid color `{0}`")]
    InvalidColor(String),

    /// A DOM call failed; carries the stringified JS error.
    #[error("dom: {0}")]
    Dom(String),
}

impl From<wasm_bindgen::JsValue> for Error {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Error::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<Error> for wasm_bindgen::JsValue {
    fn from(err: Error) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
