#![allow(dead_code)] // Not every suite uses every helper

//! Shared helpers for integration tests.
//!
//! All suites measure with [`MonoMetrics`] at a 10pt style: every ASCII
//! char is 5.0 wide and lines are 15.0 tall, so expected geometry stays
//! mentally computable.

use textrun::{Editor, MonoMetrics, Rgba, Style, TextDocument};

pub const CHAR_W: f32 = 5.0;
pub const LINE_H: f32 = 15.0;

#[must_use]
pub fn style() -> Style {
    Style::with_size(10.0)
}

#[must_use]
pub fn red_style() -> Style {
    style().with_color(Rgba::RED)
}

#[must_use]
pub fn big_style() -> Style {
    Style::with_size(20.0)
}

/// A document built from `(text, style)` segments, appended in order.
#[must_use]
pub fn document(segments: &[(&str, Style)]) -> TextDocument {
    let mut doc = TextDocument::new();
    for (text, style) in segments {
        let at = doc.total_len();
        doc.insert(text, at, *style, &MonoMetrics);
    }
    doc
}

/// An editor seeded with `text` in the standard 10pt style.
#[must_use]
pub fn editor(text: &str) -> Editor {
    let mut e = Editor::new(MonoMetrics);
    e.set_current_style(style());
    e.set_text(text);
    e
}
