use derive_more::{Deref, From, Into};
use palette::Srgba;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A colour written as `#RRGGBB` or `#RRGGBBAA` in config files.
#[derive(
    Debug, Clone, Copy, PartialEq, Deref, From, Into, DeserializeFromStr, SerializeDisplay,
)]
pub struct HexColor(Srgba<f64>);

impl HexColor {
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self(Srgba::new(r, g, b, a))
    }

    pub fn with_alpha_scaled(self, factor: f64) -> Self {
        let (r, g, b, a) = self.0.into_components();
        Self::rgba(r, g, b, a * factor)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid colour '{0}', expected #RRGGBB or #RRGGBBAA")]
pub struct ParseColorError(String);

impl FromStr for HexColor {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.is_ascii() {
            return Err(err());
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map(|v| v as f64 / 255.0)
                .map_err(|_| err())
        };
        let alpha = match hex.len() {
            6 => 1.0,
            8 => channel(6)?,
            _ => return Err(err()),
        };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, alpha))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let byte = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b, a) = self.0.into_components();
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", byte(r), byte(g), byte(b), byte(a))
    }
}

/// Start and end colour of a gradient sweep.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ColorPair {
    pub begin: HexColor,
    pub end: HexColor,
}

impl ColorPair {
    pub const fn new(begin: HexColor, end: HexColor) -> Self {
        Self { begin, end }
    }

    /// Component-wise blend; `t = 0` is `begin`, `t = 1` is `end`.
    pub fn lerp(&self, t: f64) -> Srgba<f64> {
        let t = t.clamp(0.0, 1.0);
        let (r0, g0, b0, a0) = self.begin.into_components();
        let (r1, g1, b1, a1) = self.end.into_components();
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Srgba::new(mix(r0, r1), mix(g0, g1), mix(b0, b1), mix(a0, a1))
    }
}
