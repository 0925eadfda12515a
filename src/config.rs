//! Resizer configuration surface.
//!
//! Options arrive either from Rust (builder methods) or from a JS object
//! serialized to JSON. Every key is optional and falls back to its default
//! individually; keys that are not recognized are ignored.

use serde::{Deserialize, Serialize};

use crate::dimension::SizingPolicy;
use crate::error::Result;

pub const FULLSCREEN: &str = "fullscreen";

pub const DEFAULT_SCALE_FACTOR: f64 = 1.0;
pub const DEFAULT_THROTTLE_MS: u32 = 500;
pub const DEFAULT_PADDING_PX: f64 = 50.0;

/// Raw `dimension` value as written by the caller.
///
/// Strings are kept verbatim so that an unknown name is reported when the
/// dimensions are calculated rather than silently defaulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    Named(String),
    Size([f64; 2]),
}

impl Dimension {
    pub fn fullscreen() -> Self {
        Dimension::Named(FULLSCREEN.to_owned())
    }

    pub fn fixed(width: f64, height: f64) -> Self {
        Dimension::Size([width, height])
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Dimension::fullscreen()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResizerOptions {
    pub dimension: Dimension,
    /// Multiplier for pixel dimensions only, usually `devicePixelRatio`.
    pub dimension_scale_factor: f64,
    /// Minimum interval between recalculations; `0` disables throttling.
    pub throttle_ms: u32,
    /// Margin kept around a fixed-size canvas. Ignored in fullscreen mode.
    pub padding_px: f64,
}

impl Default for ResizerOptions {
    fn default() -> Self {
        Self {
            dimension: Dimension::default(),
            dimension_scale_factor: DEFAULT_SCALE_FACTOR,
            throttle_ms: DEFAULT_THROTTLE_MS,
            padding_px: DEFAULT_PADDING_PX,
        }
    }
}

impl ResizerOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_dimension(mut self, dimension: Dimension) -> Self {
        self.dimension = dimension;
        self
    }

    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.dimension_scale_factor = scale_factor;
        self
    }

    pub fn with_throttle_ms(mut self, throttle_ms: u32) -> Self {
        self.throttle_ms = throttle_ms;
        self
    }

    pub fn with_padding_px(mut self, padding_px: f64) -> Self {
        self.padding_px = padding_px;
        self
    }

    pub fn policy(&self) -> Result<SizingPolicy> {
        SizingPolicy::try_from(&self.dimension)
    }
}
