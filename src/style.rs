//! Style tokens attached to text runs.
//!
//! A [`Style`] is an opaque, equality-comparable token carrying a font
//! description and a color. The core compares styles when coalescing
//! adjacent runs and hands them to the host's [`StyleMetrics`] provider for
//! measurement; it never interprets them itself.
//!
//! # Examples
//!
//! ```
//! use textrun::{FontSpec, Rgba, Style};
//!
//! let body = Style::with_size(14.0);
//! let heading = Style::new(FontSpec::sized(24.0).with_bold(), Rgba::BLACK);
//! assert_ne!(body, heading);
//! ```
//!
//! [`StyleMetrics`]: crate::StyleMetrics

use crate::color::Rgba;
use bitflags::bitflags;

bitflags! {
    /// Font rendering attributes (bold, italic, underline, strikethrough).
    ///
    /// Attributes take part in style equality: two runs whose attributes
    /// differ never coalesce.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct FontAttributes: u32 {
        /// Bold/increased weight.
        const BOLD          = 0x01;
        /// Italic/oblique slant.
        const ITALIC        = 0x02;
        /// Underlined text.
        const UNDERLINE     = 0x04;
        /// Strikethrough text.
        const STRIKETHROUGH = 0x08;
    }
}

/// Font description inside a style token.
///
/// `family` is a host-assigned identifier (an index into whatever font table
/// the host keeps); the core only ever compares it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontSpec {
    /// Host-assigned font family identifier.
    pub family: u32,
    /// Point size, also the basis for the bundled metrics provider's
    /// line-height estimate.
    pub size: f32,
    /// Rendering attributes.
    pub attributes: FontAttributes,
}

impl FontSpec {
    /// Default font family at the given size.
    #[must_use]
    pub const fn sized(size: f32) -> Self {
        Self {
            family: 0,
            size,
            attributes: FontAttributes::empty(),
        }
    }

    /// Return this font with a different family.
    #[must_use]
    pub const fn with_family(mut self, family: u32) -> Self {
        self.family = family;
        self
    }

    /// Return this font with bold added.
    #[must_use]
    pub fn with_bold(mut self) -> Self {
        self.attributes |= FontAttributes::BOLD;
        self
    }

    /// Return this font with italic added.
    #[must_use]
    pub fn with_italic(mut self) -> Self {
        self.attributes |= FontAttributes::ITALIC;
        self
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::sized(14.0)
    }
}

/// Complete style token: font plus color.
///
/// Styles are immutable and cheap to copy. Adjacent runs with equal styles
/// are merged by document coalescing, so equality is the one operation the
/// core relies on.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Style {
    /// Font description.
    pub font: FontSpec,
    /// Text color.
    pub color: Rgba,
}

impl Style {
    /// Create a style token from a font and color.
    #[must_use]
    pub const fn new(font: FontSpec, color: Rgba) -> Self {
        Self { font, color }
    }

    /// Default font at the given size, black.
    #[must_use]
    pub const fn with_size(size: f32) -> Self {
        Self {
            font: FontSpec::sized(size),
            color: Rgba::BLACK,
        }
    }

    /// Return this style with a different color.
    #[must_use]
    pub const fn with_color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Return this style with a different font.
    #[must_use]
    pub const fn with_font(mut self, font: FontSpec) -> Self {
        self.font = font;
        self
    }
}
