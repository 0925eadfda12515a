//! Pixel and CSS dimensions derived from a sizing policy.

use crate::config::{Dimension, FULLSCREEN};
use crate::error::{Error, Result};

/// Smallest container edge used when the padding eats the whole viewport.
const MIN_CONTAINER_PX: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizingPolicy {
    /// Track the viewport.
    Fullscreen,
    /// Fixed backing size, letterboxed into the padded viewport.
    Fixed { width: f64, height: f64 },
}

impl SizingPolicy {
    pub fn is_fullscreen(&self) -> bool {
        matches!(self, SizingPolicy::Fullscreen)
    }
}

impl TryFrom<&Dimension> for SizingPolicy {
    type Error = Error;

    fn try_from(dimension: &Dimension) -> Result<Self> {
        match dimension {
            Dimension::Named(name) if name == FULLSCREEN => Ok(SizingPolicy::Fullscreen),
            Dimension::Named(name) => Err(Error::UnknownDimension(name.clone())),
            &Dimension::Size([width, height]) => {
                let valid = |v: f64| v.is_finite() && v > 0.0;
                if valid(width) && valid(height) {
                    Ok(SizingPolicy::Fixed { width, height })
                } else {
                    Err(Error::InvalidFixedSize { width, height })
                }
            }
        }
    }
}

/// Inner size of the browser window in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResizerState {
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub css_width: f64,
    pub css_height: f64,
}

impl ResizerState {
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.pixel_width, self.pixel_height)
    }

    pub fn css_size(&self) -> (f64, f64) {
        (self.css_width, self.css_height)
    }
}

fn to_pixels(css: f64, scale_factor: f64) -> u32 {
    (css * scale_factor).round().max(0.0) as u32
}

/// Computes the full state for `policy` in `viewport`.
///
/// Pure: identical inputs give bit-identical output.
pub fn calculate(
    policy: SizingPolicy,
    viewport: Viewport,
    scale_factor: f64,
    padding_px: f64,
) -> ResizerState {
    match policy {
        SizingPolicy::Fullscreen => {
            let css_width = viewport.width.max(0.0);
            let css_height = viewport.height.max(0.0);
            ResizerState {
                pixel_width: to_pixels(css_width, scale_factor),
                pixel_height: to_pixels(css_height, scale_factor),
                css_width,
                css_height,
            }
        }
        SizingPolicy::Fixed { width, height } => {
            let container_width = (viewport.width - 2.0 * padding_px).max(MIN_CONTAINER_PX);
            let container_height = (viewport.height - 2.0 * padding_px).max(MIN_CONTAINER_PX);
            let canvas_aspect = width / height;
            let container_aspect = container_width / container_height;

            let (css_width, css_height) = if canvas_aspect > container_aspect {
                (container_width, container_width / canvas_aspect)
            } else {
                (container_height * canvas_aspect, container_height)
            };

            ResizerState {
                pixel_width: to_pixels(width, scale_factor),
                pixel_height: to_pixels(height, scale_factor),
                css_width,
                css_height,
            }
        }
    }
}
