//! Color type carried inside style tokens.
//!
//! The editing core never interprets colors — it only compares them when
//! deciding whether two runs share a style. [`Rgba`] therefore stays small:
//! construction, equality, and hex parsing for host convenience.

use crate::error::{Error, Result};

/// RGBA color with f32 components in `[0.0, 1.0]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create a color from RGBA components.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from RGB components.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create an opaque color from 8-bit components.
    #[must_use]
    pub fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
        )
    }

    /// Parse a `#RGB`, `#RRGGBB` or `#RRGGBBAA` hex string (leading `#`
    /// optional).
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let invalid = || Error::InvalidColor(hex.to_string());

        if !digits.is_ascii() {
            return Err(invalid());
        }

        let byte = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
        };

        match digits.len() {
            3 => {
                let r = byte(0..1)?;
                let g = byte(1..2)?;
                let b = byte(2..3)?;
                Ok(Self::from_rgb_u8(r * 17, g * 17, b * 17))
            }
            6 => Ok(Self::from_rgb_u8(byte(0..2)?, byte(2..4)?, byte(4..6)?)),
            8 => {
                let base = Self::from_rgb_u8(byte(0..2)?, byte(2..4)?, byte(4..6)?);
                Ok(Self {
                    a: f32::from(byte(6..8)?) / 255.0,
                    ..base
                })
            }
            _ => Err(invalid()),
        }
    }
}
