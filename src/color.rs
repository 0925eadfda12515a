//! RGBA colors and interpolation between them.

use crate::error::{Error, Result};

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Straight-alpha color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Parses `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let invalid = || Error::InvalidColor(hex.to_owned());
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |s: &str| -> Result<f64> {
            let value = match s.len() {
                1 => u8::from_str_radix(&s.repeat(2), 16),
                _ => u8::from_str_radix(s, 16),
            };
            value.map(|v| f64::from(v) / 255.0).map_err(|_| invalid())
        };

        let width = match digits.len() {
            3 | 4 => 1,
            6 | 8 => 2,
            _ => return Err(invalid()),
        };
        let mut channels = [1.0; 4];
        for (i, slot) in channels.iter_mut().enumerate().take(digits.len() / width) {
            *slot = channel(&digits[i * width..(i + 1) * width])?;
        }
        let [r, g, b, a] = channels;
        Ok(Self::new(r, g, b, a))
    }

    /// CSS `rgba()` notation with 8-bit color channels.
    pub fn to_css(&self) -> String {
        let byte = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "rgba({}, {}, {}, {})",
            byte(self.r),
            byte(self.g),
            byte(self.b),
            self.a.clamp(0.0, 1.0)
        )
    }

    /// Channel-wise interpolation; `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::new(
            lerp(self.r, other.r, t),
            lerp(self.g, other.g, t),
            lerp(self.b, other.b, t),
            lerp(self.a, other.a, t),
        )
    }
}

/// Samples evenly spaced `stops` at `t` in `[0, 1]`.
pub fn sample(stops: &[Rgba], t: f64) -> Option<Rgba> {
    match stops {
        [] => None,
        [only] => Some(*only),
        _ => {
            let scaled = t.clamp(0.0, 1.0) * (stops.len() - 1) as f64;
            let index = (scaled.floor() as usize).min(stops.len() - 2);
            Some(stops[index].lerp(stops[index + 1], scaled - index as f64))
        }
    }
}
