//! Snapshot tests pinning the exact placement stream of known layouts.

mod common;

use common::{document, style};
use textrun::{LayoutCursor, LayoutOptions, MonoMetrics};

/// Render every placement as one line: text, left edge, line top, width.
fn trace(doc: &textrun::TextDocument, options: LayoutOptions) -> String {
    let mut cursor = LayoutCursor::new(doc, style(), &MonoMetrics, options);
    let mut lines = Vec::new();

    while cursor.next() {
        let atom = cursor.atom().expect("placement has an atom");
        lines.push(format!(
            "{:?} x={} y={} w={}",
            atom.text(),
            cursor.atom_x(),
            cursor.line_y(),
            cursor.atom_right() - cursor.atom_x(),
        ));
    }

    lines.join("\n")
}

#[test]
fn test_wrapped_paragraph_trace() {
    let doc = document(&[("the quick fox\njumps", style())]);
    let rendered = trace(&doc, LayoutOptions::wrapped(40.0));

    insta::assert_snapshot!(rendered, @r#"
    "the" x=0 y=0 w=15
    " " x=15 y=0 w=5
    "quick" x=0 y=15 w=25
    " " x=25 y=15 w=5
    "fox" x=0 y=30 w=15
    "\n" x=15 y=30 w=0
    "jumps" x=0 y=45 w=25
    "#);
}

#[test]
fn test_unbounded_trace() {
    let doc = document(&[("one two", style())]);
    let rendered = trace(&doc, LayoutOptions::default());

    insta::assert_snapshot!(rendered, @r#"
    "one" x=0 y=0 w=15
    " " x=15 y=0 w=5
    "two" x=20 y=0 w=15
    "#);
}

#[test]
fn test_oversized_chunk_sizes_snapshot() {
    let doc = document(&[("abcdefghijklmnopqrstuvwxyz", style())]);
    let mut cursor = LayoutCursor::new(&doc, style(), &MonoMetrics, LayoutOptions::wrapped(35.0));

    let mut chunks = Vec::new();
    while cursor.next() {
        chunks.push(cursor.atom().expect("atom").char_count());
    }

    insta::assert_json_snapshot!(chunks, @r#"
    [
      7,
      7,
      7,
      5
    ]
    "#);
}
