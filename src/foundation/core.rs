use crate::foundation::error::{ScrollworkError, ScrollworkResult};
use std::fmt;
use std::str::FromStr;

pub use kurbo::{Point, Rect, Vec2};

/// Layout viewport size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in CSS pixels.
    pub width: f64,
    /// Height in CSS pixels.
    pub height: f64,
}

impl Viewport {
    /// Create a validated viewport (finite, strictly positive dimensions).
    pub fn new(width: f64, height: f64) -> ScrollworkResult<Self> {
        let vp = Self { width, height };
        if !vp.is_valid() {
            return Err(ScrollworkError::validation(format!(
                "viewport must be finite and > 0, got {width}x{height}"
            )));
        }
        Ok(vp)
    }

    /// Return `true` when both dimensions are finite and positive.
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Pixel offset of a vertical fraction (`0.0` = top, `1.0` = bottom).
    pub fn y_at(self, fraction: f64) -> f64 {
        self.height * fraction
    }

    /// The viewport as a rect anchored at the origin.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1440.0,
            height: 900.0,
        }
    }
}

/// Straight-alpha color as written in CSS `rgba()`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha in `[0, 1]`.
    pub a: f64,
}

impl Rgba {
    /// Construct a color; alpha is clamped into `[0, 1]`.
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        let a = if a < 0.0 {
            0.0
        } else if a > 1.0 {
            1.0
        } else {
            a
        };
        Self { r, g, b, a }
    }

    /// Fully transparent black.
    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0.0)
    }

    /// Return `true` when alpha is zero.
    pub fn is_transparent(self) -> bool {
        self.a <= 0.0
    }

    /// Same color with alpha multiplied by `factor`.
    pub fn with_alpha_scaled(self, factor: f64) -> Self {
        Self::new(self.r, self.g, self.b, self.a * factor.clamp(0.0, 1.0))
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl FromStr for Rgba {
    type Err = ScrollworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("transparent") {
            return Ok(Self::transparent());
        }
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex)
                .ok_or_else(|| ScrollworkError::parse(format!("bad hex color '{s}'")));
        }

        let (body, has_alpha) = if let Some(rest) = s.strip_prefix("rgba(") {
            (rest, true)
        } else if let Some(rest) = s.strip_prefix("rgb(") {
            (rest, false)
        } else {
            return Err(ScrollworkError::parse(format!("unsupported color '{s}'")));
        };
        let body = body
            .strip_suffix(')')
            .ok_or_else(|| ScrollworkError::parse(format!("unterminated color '{s}'")))?;

        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        let expected = if has_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return Err(ScrollworkError::parse(format!(
                "color '{s}' needs {expected} components"
            )));
        }

        let channel = |p: &str| -> ScrollworkResult<u8> {
            p.parse::<u8>()
                .map_err(|e| ScrollworkError::parse(format!("color channel '{p}': {e}")))
        };
        let a = if has_alpha {
            parts[3]
                .parse::<f64>()
                .map_err(|e| ScrollworkError::parse(format!("color alpha '{}': {e}", parts[3])))?
        } else {
            1.0
        };
        Ok(Self::new(
            channel(parts[0])?,
            channel(parts[1])?,
            channel(parts[2])?,
            a,
        ))
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    match hex.len() {
        6 => Some(Rgba::new(byte(0)?, byte(2)?, byte(4)?, 1.0)),
        8 => Some(Rgba::new(
            byte(0)?,
            byte(2)?,
            byte(4)?,
            f64::from(byte(6)?) / 255.0,
        )),
        _ => None,
    }
}

impl TryFrom<String> for Rgba {
    type Error = ScrollworkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgba> for String {
    fn from(value: Rgba) -> Self {
        value.to_string()
    }
}

/// Two color stops used as a section's accent (glow gradient colors).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AccentColor {
    /// First gradient stop.
    pub from: Rgba,
    /// Second gradient stop.
    pub to: Rgba,
}

impl AccentColor {
    /// Build an accent from two stops.
    pub const fn new(from: Rgba, to: Rgba) -> Self {
        Self { from, to }
    }

    /// The stops as a CSS color list: `rgba(..), rgba(..)`.
    pub fn css_stops(&self) -> String {
        format!("{}, {}", self.from, self.to)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
