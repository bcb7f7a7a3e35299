//! Word-wrapped layout over a document snapshot.
//!
//! [`LayoutCursor`] is a stateful, forward-only cursor that places one atom
//! (or one chunk of an oversized atom) per [`LayoutCursor::next`] call. All
//! geometry queries — caret anchors, hit testing, total height, selection
//! rectangles — drive the same cursor to a target condition.
//!
//! The cursor cannot seek backward. Construction is cheap and traversal is
//! O(atoms), so every query builds a fresh cursor over the current document
//! snapshot; nothing is cached here.

use crate::error::{Error, Result};
use crate::metrics::StyleMetrics;
use crate::style::Style;
use crate::text::atom::{Atom, char_slice};
use crate::text::document::TextDocument;
use crate::text::run::StyledRun;
use std::ops::Range;

/// Wrap test slack carried over from float width accumulation.
const WRAP_EPSILON: f32 = 1e-4;

/// Horizontal line justification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Justification {
    /// Lines start at x = 0.
    #[default]
    Left,
    /// Lines center inside the viewport width.
    Centered,
    /// Lines end at the viewport's right edge.
    Right,
}

/// Vertical anchoring of content shorter than the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VerticalAnchor {
    /// Content starts at y = 0.
    #[default]
    Top,
    /// Content centers in the viewport height.
    Centered,
    /// Content hugs the viewport bottom.
    Bottom,
}

/// Parameters for one layout pass.
#[derive(Clone, Copy, Debug)]
pub struct LayoutOptions {
    /// Maximum line extent before a break is forced. [`f32::INFINITY`]
    /// disables wrapping.
    pub wrap_width: f32,
    /// Viewport width used for centered/right justification. Non-finite
    /// values pin all lines to x = 0.
    pub viewport_width: f32,
    /// Viewport height used for vertical anchoring.
    pub viewport_height: f32,
    /// Horizontal justification.
    pub justification: Justification,
    /// Vertical anchoring.
    pub vertical_anchor: VerticalAnchor,
    /// Line height multiplier applied when advancing to a new line.
    pub line_spacing: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            wrap_width: f32::INFINITY,
            viewport_width: f32::INFINITY,
            viewport_height: f32::INFINITY,
            justification: Justification::Left,
            vertical_anchor: VerticalAnchor::Top,
            line_spacing: 1.0,
        }
    }
}

impl LayoutOptions {
    /// Wrap at `width`, also using it as the justification reference.
    #[must_use]
    pub fn wrapped(width: f32) -> Self {
        Self {
            wrap_width: width,
            viewport_width: width,
            ..Self::default()
        }
    }

    /// Check that the options can produce geometry.
    pub fn validate(&self) -> Result<()> {
        if self.wrap_width <= 0.0 || self.wrap_width.is_nan() {
            return Err(Error::InvalidWrapWidth(self.wrap_width));
        }
        Ok(())
    }
}

/// Axis-aligned rectangle in layout units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Visual anchor of a character index: left edge, line top, line height.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CharPosition {
    pub x: f32,
    pub y: f32,
    pub line_height: f32,
}

/// Which atom the cursor currently exposes.
#[derive(Clone, Copy, Debug)]
enum Current {
    /// Nothing placed yet (or document empty).
    None,
    /// An atom inside a run.
    Run { section: usize, atom: usize },
    /// The staged chunk of an oversized atom; `section` is the run it came
    /// from.
    Long { section: usize },
}

/// Forward-only layout cursor. See the module docs.
pub struct LayoutCursor<'a> {
    runs: &'a [StyledRun],
    mask: Option<char>,
    metrics: &'a dyn StyleMetrics,
    options: LayoutOptions,
    base_style: Style,
    total_chars: usize,

    section_index: usize,
    atom_index: usize,
    current: Current,
    /// Staging atom for oversized chunking. Its `text` holds the not yet
    /// consumed tail of the original atom and its `num_chars`/`width`
    /// describe the chunk currently exposed (a prefix of that text).
    long_atom: Atom,

    index_in_text: usize,
    line_y: f32,
    line_height: f32,
    max_descent: f32,
    atom_x: f32,
    atom_right: f32,
}

impl<'a> LayoutCursor<'a> {
    /// Build a cursor over `document`.
    ///
    /// `base_style` supplies line metrics when the document is empty and
    /// for the resting position after the final atom — typically the
    /// style new text would be inserted with.
    pub fn new(
        document: &'a TextDocument,
        base_style: Style,
        metrics: &'a dyn StyleMetrics,
        options: LayoutOptions,
    ) -> Self {
        let mut cursor = Self {
            runs: document.runs(),
            mask: document.mask(),
            metrics,
            options,
            base_style,
            total_chars: document.total_len(),
            section_index: 0,
            atom_index: 0,
            current: Current::None,
            long_atom: Atom {
                text: String::new(),
                num_chars: 0,
                width: 0.0,
            },
            index_in_text: 0,
            line_y: 0.0,
            line_height: 0.0,
            max_descent: 0.0,
            atom_x: 0.0,
            atom_right: 0.0,
        };

        if cursor.runs.is_empty() {
            cursor.line_height = metrics.line_height(&base_style);
            cursor.max_descent = metrics.descent(&base_style);
            cursor.atom_x = cursor.justification_offset_x(0.0);
        } else {
            cursor.begin_new_line();
        }

        cursor
    }

    /// Advance to the next atom placement. Returns `false` once every atom
    /// (and every chunk of an oversized atom) has been placed.
    pub fn next(&mut self) -> bool {
        if matches!(self.current, Current::Long { .. }) && self.chunk_long_atom(true) {
            return true;
        }

        if self.section_index >= self.runs.len() {
            self.move_to_end_of_last_atom();
            return false;
        }

        let runs = self.runs;
        let mut force_new_line = false;

        if self.atom_index + 1 >= runs[self.section_index].atoms().len() {
            if self.atom_index >= runs[self.section_index].atoms().len() {
                self.section_index += 1;
                if self.section_index >= runs.len() {
                    self.move_to_end_of_last_atom();
                    return false;
                }
                self.atom_index = 0;
            } else {
                let last_atom = &runs[self.section_index].atoms()[self.atom_index];

                if !last_atom.is_whitespace() {
                    // The section's last atom may continue as the same word
                    // in the next sections; wrap the whole joined word at
                    // once, using the tallest contributing line metrics.
                    let mut right = self.atom_right + last_atom.width();
                    let mut line_height = self.line_height;
                    let mut max_descent = self.max_descent;

                    for section in &runs[self.section_index + 1..] {
                        let Some(next_atom) = section.atoms().first() else {
                            break;
                        };
                        if next_atom.is_whitespace() {
                            break;
                        }

                        right += next_atom.width();
                        line_height = line_height.max(self.metrics.line_height(section.style()));
                        max_descent = max_descent.max(self.metrics.descent(section.style()));

                        if self.should_wrap(right) {
                            self.line_height = line_height;
                            self.max_descent = max_descent;
                            force_new_line = true;
                            break;
                        }

                        if section.atoms().len() > 1 {
                            break;
                        }
                    }
                }
            }
        }

        let mut is_in_previous_atom = false;

        if let Some(atom) = self.current_atom() {
            let chars = atom.char_count();
            let was_newline = atom.is_newline();
            self.atom_x = self.atom_right;
            self.index_in_text += chars;

            if was_newline {
                self.begin_new_line();
            } else {
                is_in_previous_atom = true;
            }
        }

        self.current = Current::Run {
            section: self.section_index,
            atom: self.atom_index,
        };
        let atom = &runs[self.section_index].atoms()[self.atom_index];
        let atom_width = atom.width();
        let atom_is_whitespace = atom.is_whitespace();
        self.atom_right = self.atom_x + atom_width;
        self.atom_index += 1;

        if self.should_wrap(self.atom_right) || force_new_line {
            if atom_is_whitespace {
                // Trailing whitespace stays on the line but its visible
                // edge clamps to the wrap width to avoid phantom overflow.
                self.atom_right = self.atom_right.min(self.options.wrap_width);
            } else if self.should_wrap(atom_width) {
                // Wider than a whole line: emit glyph-level chunks, one
                // line each.
                self.long_atom = atom.clone();
                self.long_atom.num_chars = 0;
                self.current = Current::Long {
                    section: self.section_index,
                };
                self.chunk_long_atom(is_in_previous_atom);
            } else {
                self.begin_new_line();
                self.atom_right = self.atom_x + atom_width;
            }
        }

        true
    }

    /// Char index at the start of the current placement.
    #[must_use]
    pub fn index_in_text(&self) -> usize {
        self.index_in_text
    }

    /// Top of the current line.
    #[must_use]
    pub fn line_y(&self) -> f32 {
        self.line_y
    }

    /// Height of the current line.
    #[must_use]
    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Deepest descent on the current line.
    #[must_use]
    pub fn max_descent(&self) -> f32 {
        self.max_descent
    }

    /// Left edge of the current placement.
    #[must_use]
    pub fn atom_x(&self) -> f32 {
        self.atom_x
    }

    /// Right edge of the current placement.
    #[must_use]
    pub fn atom_right(&self) -> f32 {
        self.atom_right
    }

    /// The currently placed atom (the staged chunk for oversized atoms).
    #[must_use]
    pub fn atom(&self) -> Option<&Atom> {
        self.current_atom()
    }

    /// Style of the currently placed atom.
    #[must_use]
    pub fn current_style(&self) -> &Style {
        match self.current {
            Current::None => &self.base_style,
            Current::Run { section, .. } | Current::Long { section } => self.runs[section].style(),
        }
    }

    /// Horizontal justification offset for a line of `line_width`.
    #[must_use]
    pub fn justification_offset_x(&self, line_width: f32) -> f32 {
        let viewport = self.options.viewport_width;
        if !viewport.is_finite() {
            return 0.0;
        }

        match self.options.justification {
            Justification::Left => 0.0,
            Justification::Centered => ((viewport - line_width) * 0.5).max(0.0),
            Justification::Right => (viewport - line_width).max(0.0),
        }
    }

    /// X position of `index` inside the current placement, at glyph
    /// granularity. Indices outside the placement clamp to its edges.
    #[must_use]
    pub fn index_to_x(&self, index: usize) -> f32 {
        let Some(atom) = self.current_atom() else {
            return self.atom_x;
        };
        if index <= self.index_in_text {
            return self.atom_x;
        }
        if index >= self.index_in_text + atom.char_count() {
            return self.atom_right;
        }

        let target = index - self.index_in_text;
        let display = atom.display_text(self.mask);
        let edges = self.metrics.glyph_edges(self.current_style(), &display);

        let mut left = 0.0;
        for edge in &edges {
            if target < edge.chars {
                break;
            }
            left = edge.right;
        }

        self.atom_right.min(self.atom_x + left)
    }

    /// Char index for horizontal position `x` inside the current placement,
    /// choosing the glyph whose midpoint first exceeds `x`.
    #[must_use]
    pub fn x_to_index(&self, x: f32) -> usize {
        let Some(atom) = self.current_atom() else {
            return self.index_in_text;
        };
        if x <= self.atom_x || atom.is_newline() {
            return self.index_in_text;
        }
        if x >= self.atom_right {
            return self.index_in_text + atom.char_count();
        }

        let display = atom.display_text(self.mask);
        let edges = self.metrics.glyph_edges(self.current_style(), &display);
        let relative = x - self.atom_x;

        let mut chars = 0;
        let mut left = 0.0;
        for edge in &edges {
            if (left + edge.right) * 0.5 > relative {
                break;
            }
            chars = edge.chars;
            left = edge.right;
        }

        self.index_in_text + chars
    }

    /// Visual anchor of char `index`: drives the cursor until the
    /// placement containing `index` appears.
    pub fn char_position(&mut self, index: usize) -> CharPosition {
        while self.next() {
            let covered = self.current_atom().map_or(0, Atom::char_count);
            if self.index_in_text + covered > index {
                return CharPosition {
                    x: self.index_to_x(index),
                    y: self.line_y,
                    line_height: self.line_height,
                };
            }
        }

        CharPosition {
            x: self.atom_x,
            y: self.line_y,
            line_height: self.line_height,
        }
    }

    /// Char index nearest to visual position `(x, y)`.
    pub fn index_at(&mut self, x: f32, y: f32) -> usize {
        while self.next() {
            if y < self.line_y + self.line_height {
                if y < self.line_y {
                    return self.index_in_text.saturating_sub(1);
                }
                if x <= self.atom_x || self.current_atom().is_some_and(Atom::is_newline) {
                    return self.index_in_text;
                }
                if x < self.atom_right {
                    return self.x_to_index(x);
                }
            }
        }

        self.total_chars
    }

    /// Vertical offset anchoring content inside the viewport height.
    /// Zero for top anchoring or content taller than the viewport.
    pub fn y_offset(&mut self) -> f32 {
        let viewport = self.options.viewport_height;
        if matches!(self.options.vertical_anchor, VerticalAnchor::Top)
            || !viewport.is_finite()
            || self.line_y >= viewport
        {
            return 0.0;
        }

        while self.next() {
            if self.line_y >= viewport {
                return 0.0;
            }
        }

        let bottom = (viewport - self.line_y - self.line_height).max(0.0);
        match self.options.vertical_anchor {
            VerticalAnchor::Top => 0.0,
            VerticalAnchor::Bottom => bottom,
            VerticalAnchor::Centered => bottom * 0.5,
        }
    }

    /// Total laid-out height: drives the cursor to exhaustion.
    pub fn total_text_height(&mut self) -> f32 {
        while self.next() {}
        let anchor_offset = self.y_offset();
        self.line_y + self.line_height + anchor_offset
    }

    /// Rightmost extent of any placement.
    pub fn text_right(&mut self) -> f32 {
        let mut max_right = 0.0f32;
        while self.next() {
            max_right = max_right.max(self.atom_right);
        }
        max_right
    }

    /// Rectangles covering `range`, one per line fragment, merged along
    /// each line.
    pub fn text_bounds(&mut self, range: Range<usize>) -> Vec<Rect> {
        let mut rects: Vec<Rect> = Vec::new();

        while self.next() {
            let covered = self.current_atom().map_or(0, Atom::char_count);
            let atom_range = self.index_in_text..self.index_in_text + covered;

            if range.start < atom_range.end && atom_range.start < range.end {
                let x1 = self.index_to_x(range.start);
                let x2 = self.index_to_x(range.end);
                let rect = Rect::new(
                    x1,
                    self.line_y,
                    x2 - x1,
                    self.line_height * self.options.line_spacing,
                );

                match rects.last_mut() {
                    Some(last) if last.y == rect.y => {
                        let right = (last.x + last.width).max(rect.x + rect.width);
                        last.x = last.x.min(rect.x);
                        last.width = right - last.x;
                        last.height = last.height.max(rect.height);
                    }
                    _ => rects.push(rect),
                }
            }
        }

        rects
    }

    fn current_atom(&self) -> Option<&Atom> {
        match self.current {
            Current::None => None,
            Current::Run { section, atom } => Some(&self.runs[section].atoms()[atom]),
            Current::Long { .. } => Some(&self.long_atom),
        }
    }

    /// Start a new line: advance y, then look ahead (without consuming)
    /// to measure the upcoming line's width for justification and to pick
    /// its height/descent as the max over contributing runs.
    fn begin_new_line(&mut self) {
        self.line_y += self.line_height * self.options.line_spacing;

        let runs = self.runs;
        let mut line_width = 0.0f32;
        let mut section_index = self.section_index;
        let mut atom_index = self.atom_index;

        if let Some(section) = runs.get(section_index) {
            self.line_height = self.metrics.line_height(section.style());
            self.max_descent = self.metrics.descent(section.style());
        }

        let mut next_line_width = self.current_atom().map_or(0.0, Atom::width);

        while !self.should_wrap(next_line_width) {
            line_width = next_line_width;

            if section_index >= runs.len() {
                break;
            }

            let mut crossed_section = false;
            if atom_index >= runs[section_index].atoms().len() {
                section_index += 1;
                if section_index >= runs.len() {
                    break;
                }
                atom_index = 0;
                crossed_section = true;
            }

            let Some(next_atom) = runs[section_index].atoms().get(atom_index) else {
                break;
            };

            next_line_width += next_atom.width();
            if self.should_wrap(next_line_width) || next_atom.is_newline() {
                break;
            }

            if crossed_section {
                let style = runs[section_index].style();
                self.line_height = self.line_height.max(self.metrics.line_height(style));
                self.max_descent = self.max_descent.max(self.metrics.descent(style));
            }

            atom_index += 1;
        }

        self.atom_x = self.justification_offset_x(line_width);
    }

    /// Emit the next chunk of an oversized atom. Returns `false` once the
    /// atom is fully consumed.
    fn chunk_long_atom(&mut self, should_start_new_line: bool) -> bool {
        let total = self.long_atom.text.chars().count();
        let remaining = total - self.long_atom.num_chars;
        if remaining == 0 {
            return false;
        }

        // Drop the chunk emitted last time and account for its chars.
        self.long_atom.text = char_slice(&self.long_atom.text, self.long_atom.num_chars..total)
            .to_string();
        self.index_in_text += self.long_atom.num_chars;

        let display = self.long_atom.display_text(self.mask);
        let edges = self.metrics.glyph_edges(self.current_style(), &display);

        let mut fitting = 0;
        while fitting < edges.len() && !self.should_wrap(edges[fitting].right) {
            fitting += 1;
        }
        let cut = fitting.clamp(1, edges.len());
        let chunk_chars = edges[cut - 1].chars;
        let chunk_width = edges[cut - 1].right;

        self.long_atom.num_chars = chunk_chars;
        self.long_atom.width = chunk_width;
        self.atom_x = self.justification_offset_x(chunk_width);

        if should_start_new_line {
            if chunk_chars == remaining {
                // Final chunk: compute the real line from look-ahead so
                // anything following it justifies correctly.
                self.begin_new_line();
            } else {
                self.line_y += self.line_height * self.options.line_spacing;
            }
        }

        self.atom_right = self.atom_x + self.long_atom.width;
        true
    }

    fn move_to_end_of_last_atom(&mut self) {
        let Some(atom) = self.current_atom() else {
            return;
        };
        let was_newline = atom.is_newline();

        self.atom_x = self.atom_right;
        if was_newline {
            self.atom_x = self.justification_offset_x(0.0);
            self.line_y += self.line_height * self.options.line_spacing;
        }
    }

    fn should_wrap(&self, x: f32) -> bool {
        (x - WRAP_EPSILON) >= self.options.wrap_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MonoMetrics;

    // With MonoMetrics at size 10: each ASCII char is 5.0 wide, lines are
    // 15.0 tall.
    fn style() -> Style {
        Style::with_size(10.0)
    }

    fn doc(text: &str) -> TextDocument {
        let mut d = TextDocument::new();
        d.insert(text, 0, style(), &MonoMetrics);
        d
    }

    fn cursor<'a>(d: &'a TextDocument, options: LayoutOptions) -> LayoutCursor<'a> {
        LayoutCursor::new(d, style(), &MonoMetrics, options)
    }

    fn placements(d: &TextDocument, options: LayoutOptions) -> Vec<(String, f32, f32)> {
        let mut c = cursor(d, options);
        let mut out = Vec::new();
        while c.next() {
            let atom = c.atom().expect("placement has an atom");
            out.push((atom.text().to_string(), c.atom_x(), c.line_y()));
        }
        out
    }

    #[test]
    fn test_unbounded_single_line() {
        let d = doc("ab cd");
        let got = placements(&d, LayoutOptions::default());
        assert_eq!(
            got,
            vec![
                ("ab".to_string(), 0.0, 0.0),
                (" ".to_string(), 10.0, 0.0),
                ("cd".to_string(), 15.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_word_wrap_moves_word_to_next_line() {
        // "hello world": "hello" (25) + " " (5) fit in 30; "world" (25)
        // must wrap.
        let d = doc("hello world");
        let got = placements(&d, LayoutOptions::wrapped(30.0));
        assert_eq!(got[0], ("hello".to_string(), 0.0, 0.0));
        assert_eq!(got[1], (" ".to_string(), 25.0, 0.0));
        assert_eq!(got[2], ("world".to_string(), 0.0, 15.0));
    }

    #[test]
    fn test_trailing_whitespace_clamps_to_wrap_width() {
        let d = doc("abcd    x");
        let mut c = cursor(&d, LayoutOptions::wrapped(30.0));
        assert!(c.next()); // "abcd" → right edge 20
        assert!(c.next()); // whitespace run of 4 → would reach 40
        assert!(c.atom().unwrap().is_whitespace());
        assert_eq!(c.atom_right(), 30.0);
        assert!(c.next()); // "x" starts the next line
        assert_eq!(c.atom_x(), 0.0);
        assert_eq!(c.line_y(), 15.0);
    }

    #[test]
    fn test_newline_starts_new_line() {
        let d = doc("a\nb");
        let got = placements(&d, LayoutOptions::default());
        assert_eq!(
            got,
            vec![
                ("a".to_string(), 0.0, 0.0),
                ("\n".to_string(), 5.0, 0.0),
                ("b".to_string(), 0.0, 15.0),
            ]
        );
    }

    #[test]
    fn test_oversized_atom_chunks_line_by_line() {
        // 12 chars at width 5 = 60 wide; wrap at 20 → chunks of 4 chars.
        let d = doc("abcdefghijkl");
        let mut c = cursor(&d, LayoutOptions::wrapped(20.0));
        let mut chunks = Vec::new();
        while c.next() {
            let atom = c.atom().unwrap();
            chunks.push((atom.char_count(), c.line_y()));
        }
        assert_eq!(chunks, vec![(4, 0.0), (4, 15.0), (4, 30.0)]);
    }

    #[test]
    fn test_oversized_chunk_chars_sum_to_atom() {
        let d = doc("abcdefghijklmno");
        let mut c = cursor(&d, LayoutOptions::wrapped(17.0));
        let mut total = 0;
        while c.next() {
            total += c.atom().unwrap().char_count();
        }
        assert_eq!(total, 15);
    }

    #[test]
    fn test_word_split_across_runs_wraps_as_one() {
        // One word "abcdef" split over two styles. The current line holds
        // "xx " (15) and cannot take the joined 30-wide word, but a fresh
        // line can, so the look-ahead breaks before "abc" and keeps the
        // word whole.
        let mut d = TextDocument::new();
        d.insert("xx abc", 0, style(), &MonoMetrics);
        d.insert(
            "def",
            6,
            Style::with_size(10.0).with_color(crate::color::Rgba::RED),
            &MonoMetrics,
        );

        let mut c = cursor(&d, LayoutOptions::wrapped(35.0));
        assert!(c.next()); // "xx"
        assert!(c.next()); // " "
        assert!(c.next()); // "abc" — look-ahead sees "def", forces a break
        assert_eq!(c.atom().unwrap().text(), "abc");
        assert_eq!(c.atom_x(), 0.0);
        assert_eq!(c.line_y(), 15.0);
        assert!(c.next()); // "def" continues on the same line
        assert_eq!(c.atom_x(), 15.0);
        assert_eq!(c.line_y(), 15.0);
    }

    #[test]
    fn test_total_height_unbounded_counts_newlines() {
        let line_height = 15.0;
        for (text, newlines) in [("abc", 0), ("a\nb", 1), ("a\nb\nc", 2), ("a\n", 1)] {
            let d = doc(text);
            let mut c = cursor(&d, LayoutOptions::default());
            assert_eq!(
                c.total_text_height(),
                line_height * (newlines as f32 + 1.0),
                "height mismatch for {text:?}"
            );
        }
    }

    #[test]
    fn test_total_height_empty_document_is_one_line() {
        let d = TextDocument::new();
        let mut c = cursor(&d, LayoutOptions::default());
        assert_eq!(c.total_text_height(), 15.0);
    }

    #[test]
    fn test_char_position_on_wrapped_line() {
        let d = doc("hello world");
        let mut c = cursor(&d, LayoutOptions::wrapped(30.0));
        let pos = c.char_position(6); // 'w', first char of line 1
        assert_eq!(pos.x, 0.0);
        assert_eq!(pos.y, 15.0);
        assert_eq!(pos.line_height, 15.0);
    }

    #[test]
    fn test_char_position_mid_atom() {
        let d = doc("hello");
        let mut c = cursor(&d, LayoutOptions::default());
        let pos = c.char_position(2);
        assert_eq!(pos.x, 10.0);
        assert_eq!(pos.y, 0.0);
    }

    #[test]
    fn test_char_position_past_end_rests_after_last_atom() {
        let d = doc("ab");
        let mut c = cursor(&d, LayoutOptions::default());
        let pos = c.char_position(99);
        assert_eq!(pos.x, 10.0);
        assert_eq!(pos.y, 0.0);
    }

    #[test]
    fn test_char_position_empty_document() {
        let d = TextDocument::new();
        let mut c = cursor(&d, LayoutOptions::default());
        let pos = c.char_position(0);
        assert_eq!(pos.x, 0.0);
        assert_eq!(pos.y, 0.0);
        assert_eq!(pos.line_height, 15.0);
    }

    #[test]
    fn test_index_at_position_round_trip() {
        let d = doc("hello world again");
        for index in [0, 3, 6, 11, 14] {
            let mut c = cursor(&d, LayoutOptions::wrapped(30.0));
            let pos = c.char_position(index);
            let mut c2 = cursor(&d, LayoutOptions::wrapped(30.0));
            // Probe just right of the anchor, vertically mid-line.
            let got = c2.index_at(pos.x + 1.0, pos.y + 7.0);
            assert_eq!(got, index, "round trip failed for index {index}");
        }
    }

    #[test]
    fn test_index_at_position_below_text_is_end() {
        let d = doc("ab");
        let mut c = cursor(&d, LayoutOptions::default());
        assert_eq!(c.index_at(0.0, 500.0), 2);
    }

    #[test]
    fn test_index_at_glyph_midpoint() {
        let d = doc("abcd");
        // x = 12.0 is past the midpoint of 'c' (10..15, mid 12.5)? No:
        // midpoint of 'c' is 12.5, so 12.0 still maps to index 2.
        let mut c = cursor(&d, LayoutOptions::default());
        assert_eq!(c.index_at(12.0, 5.0), 2);
        let mut c = cursor(&d, LayoutOptions::default());
        assert_eq!(c.index_at(13.0, 5.0), 3);
    }

    #[test]
    fn test_centered_justification() {
        let d = doc("abcd"); // line width 20 in a 40-wide viewport → x = 10
        let mut options = LayoutOptions::wrapped(40.0);
        options.justification = Justification::Centered;
        let got = placements(&d, options);
        assert_eq!(got[0].1, 10.0);
    }

    #[test]
    fn test_right_justification() {
        let d = doc("abcd");
        let mut options = LayoutOptions::wrapped(40.0);
        options.justification = Justification::Right;
        let got = placements(&d, options);
        assert_eq!(got[0].1, 20.0);
    }

    #[test]
    fn test_line_spacing_multiplier() {
        let d = doc("a\nb");
        let mut options = LayoutOptions::default();
        options.line_spacing = 2.0;
        let got = placements(&d, options);
        assert_eq!(got[2].2, 30.0); // 15.0 * 2
    }

    #[test]
    fn test_text_right_extent() {
        let d = doc("abc de");
        let mut c = cursor(&d, LayoutOptions::default());
        assert_eq!(c.text_right(), 30.0);
    }

    #[test]
    fn test_text_bounds_single_line_merges() {
        let d = doc("ab cd");
        let mut c = cursor(&d, LayoutOptions::default());
        let rects = c.text_bounds(0..5);
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0], Rect::new(0.0, 0.0, 25.0, 15.0));
    }

    #[test]
    fn test_text_bounds_spans_wrapped_lines() {
        let d = doc("hello world");
        let mut c = cursor(&d, LayoutOptions::wrapped(30.0));
        let rects = c.text_bounds(3..9);
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0].y, 0.0);
        assert_eq!(rects[1].y, 15.0);
        assert_eq!(rects[1].x, 0.0);
        assert_eq!(rects[1].width, 15.0); // "wor"
    }

    #[test]
    fn test_y_offset_centered() {
        let d = doc("ab");
        let mut options = LayoutOptions::default();
        options.viewport_height = 45.0;
        options.vertical_anchor = VerticalAnchor::Centered;
        let mut c = cursor(&d, options);
        assert_eq!(c.y_offset(), 15.0); // (45 - 15) / 2
    }

    #[test]
    fn test_y_offset_bottom() {
        let d = doc("ab");
        let mut options = LayoutOptions::default();
        options.viewport_height = 45.0;
        options.vertical_anchor = VerticalAnchor::Bottom;
        let mut c = cursor(&d, options);
        assert_eq!(c.y_offset(), 30.0);
    }

    #[test]
    fn test_y_offset_zero_when_content_fills_viewport() {
        let d = doc("a\nb\nc\nd");
        let mut options = LayoutOptions::default();
        options.viewport_height = 45.0;
        options.vertical_anchor = VerticalAnchor::Centered;
        let mut c = cursor(&d, options);
        assert_eq!(c.y_offset(), 0.0);
    }

    #[test]
    fn test_mixed_sizes_use_tallest_line_metrics() {
        let mut d = TextDocument::new();
        d.insert("aa ", 0, style(), &MonoMetrics);
        d.insert("bb", 3, Style::with_size(20.0), &MonoMetrics);

        let mut c = cursor(&d, LayoutOptions::default());
        assert!(c.next());
        // Look-ahead across the section boundary picks the 20pt height.
        assert_eq!(c.line_height(), 30.0);
    }

    #[test]
    fn test_options_validate() {
        assert!(LayoutOptions::default().validate().is_ok());
        let mut bad = LayoutOptions::default();
        bad.wrap_width = 0.0;
        assert!(bad.validate().is_err());
    }
}
