//! Measurement capability injected by the host.
//!
//! The core stores text and computes wrap geometry, but it cannot know how
//! wide a string renders — that depends on the host's fonts. Hosts hand the
//! core an implementation of [`StyleMetrics`]; the core calls it when atoms
//! are created, re-measured, or cut at glyph level.
//!
//! [`MonoMetrics`] is a bundled provider for monospaced hosts (and for
//! tests): every display column is half the font size wide, with wide CJK
//! and emoji clusters counting two columns via `unicode-width`.

use crate::style::Style;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Cumulative extent of one glyph cluster inside a measured string.
///
/// `chars` counts chars consumed up to and including this cluster, so edge
/// lists line up with the document's character index space even when a
/// cluster spans several chars.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphEdge {
    /// Chars consumed through this cluster.
    pub chars: usize,
    /// Right edge of this cluster, relative to the string start.
    pub right: f32,
}

/// Width and vertical metrics for styled text.
///
/// Implementations must be deterministic: the same style and text always
/// measure the same. All units are whatever the host renders in (typically
/// pixels); the core only adds and compares them.
pub trait StyleMetrics {
    /// Display width of `text` rendered in `style`.
    fn text_width(&self, style: &Style, text: &str) -> f32;

    /// Height of a line of `style` text.
    fn line_height(&self, style: &Style) -> f32;

    /// Descent below the baseline for `style`.
    fn descent(&self, style: &Style) -> f32;

    /// Per-cluster cumulative extents of `text`, used for mid-atom cuts and
    /// sub-atom hit testing.
    ///
    /// The default accumulates cluster widths left to right, which is exact
    /// for any provider without cross-cluster kerning. Providers that kern
    /// should override this with real glyph positions.
    fn glyph_edges(&self, style: &Style, text: &str) -> Vec<GlyphEdge> {
        let mut edges = Vec::new();
        let mut chars = 0;
        let mut right = 0.0;

        for cluster in text.graphemes(true) {
            chars += cluster.chars().count();
            right += self.text_width(style, cluster);
            edges.push(GlyphEdge { chars, right });
        }

        edges
    }
}

/// Metrics for monospaced rendering.
///
/// One display column is `size * 0.5` wide; lines are `size * 1.5` tall with
/// a `size * 0.25` descent. Wide characters take two columns, zero-width
/// combining marks take none.
#[derive(Clone, Copy, Debug, Default)]
pub struct MonoMetrics;

impl StyleMetrics for MonoMetrics {
    fn text_width(&self, style: &Style, text: &str) -> f32 {
        text.width() as f32 * style.font.size * 0.5
    }

    fn line_height(&self, style: &Style) -> f32 {
        style.font.size * 1.5
    }

    fn descent(&self, style: &Style) -> f32 {
        style.font.size * 0.25
    }
}
