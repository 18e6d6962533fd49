//! Colors and compositing constants for trail rendering.

use flowfield_core::FlowError;
use serde::{Deserialize, Serialize};

/// An 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `"#rrggbb"` or `"rrggbb"` (case insensitive).
    ///
    /// Returns `FlowError::InvalidParam` if the input is not 6 hex digits.
    pub fn from_hex(hex: &str) -> Result<Self, FlowError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(FlowError::invalid_param(
                "color",
                format!("expected 6 hex digits, got '{hex}'"),
            ));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| {
                FlowError::invalid_param("color", format!("invalid hex digits in '{hex}'"))
            })
        };
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// Linear interpolation toward `other` by `t` in [0, 1], per channel.
    pub fn lerp(self, other: Rgb8, t: f64) -> Rgb8 {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb8 {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }
}

/// How trails fade and what colors they map to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailStyle {
    /// Fraction of every pixel pulled back toward the background per tick.
    pub fade: f64,
    /// Opacity of a freshly drawn streak segment.
    pub stroke_alpha: f64,
    /// Color every fade pulls toward.
    pub background: Rgb8,
    pub stroke: Rgb8,
    /// Top, middle and bottom stops of the vertical gradient a fresh canvas
    /// shows. Fading replaces it with `background` over time.
    pub backdrop: [Rgb8; 3],
}

impl TrailStyle {
    /// Backdrop color at fraction `t` of the canvas height (0 is the top).
    pub fn backdrop_at(&self, t: f64) -> Rgb8 {
        let t = t.clamp(0.0, 1.0);
        let [top, middle, bottom] = self.backdrop;
        if t <= 0.5 {
            top.lerp(middle, t * 2.0)
        } else {
            middle.lerp(bottom, (t - 0.5) * 2.0)
        }
    }

    /// Same style with the backdrop collapsed to the background color.
    pub fn flat(self) -> Self {
        Self {
            backdrop: [self.background; 3],
            ..self
        }
    }
}

impl Default for TrailStyle {
    fn default() -> Self {
        Self {
            fade: 0.08,
            stroke_alpha: 0.6,
            background: Rgb8::new(18, 11, 8),
            stroke: Rgb8::new(255, 210, 180),
            backdrop: [
                Rgb8::new(0x2b, 0x1a, 0x16),
                Rgb8::new(0x3b, 0x22, 0x1b),
                Rgb8::new(0x24, 0x14, 0x0f),
            ],
        }
    }
}
