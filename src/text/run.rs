//! Styled runs: maximal spans of text sharing one style.
//!
//! A [`StyledRun`] owns an ordered sequence of [`Atom`]s plus the style they
//! render in and the document's optional mask character. Runs are created on
//! insert, split at arbitrary character offsets, and merged back together by
//! document coalescing.

use crate::metrics::StyleMetrics;
use crate::style::Style;
use crate::text::atom::{Atom, char_slice, tokenize};
use std::ops::Range;

/// An ordered sequence of atoms sharing one style.
///
/// Invariant: the sum of atom char counts equals [`StyledRun::total_len`],
/// and no atom spans a newline or mixes whitespace with non-whitespace.
#[derive(Clone, Debug)]
pub struct StyledRun {
    style: Style,
    mask: Option<char>,
    atoms: Vec<Atom>,
}

impl StyledRun {
    /// Tokenize `text` into a new run.
    pub fn new(text: &str, style: Style, mask: Option<char>, metrics: &dyn StyleMetrics) -> Self {
        Self {
            atoms: tokenize(text, &style, mask, metrics),
            style,
            mask,
        }
    }

    /// An empty run carrying `style` and `mask`.
    #[must_use]
    pub fn empty(style: Style, mask: Option<char>) -> Self {
        Self {
            style,
            mask,
            atoms: Vec::new(),
        }
    }

    /// The run's style token.
    #[must_use]
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// The run's mask character, if concealed.
    #[must_use]
    pub fn mask(&self) -> Option<char> {
        self.mask
    }

    /// The run's atoms, in order.
    #[must_use]
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Total chars covered by this run.
    #[must_use]
    pub fn total_len(&self) -> usize {
        self.atoms.iter().map(Atom::char_count).sum()
    }

    /// True if the run holds no atoms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Merge `other`'s atoms onto the end of this run.
    ///
    /// If the boundary joins two word fragments (this run's last atom ends
    /// with non-whitespace and `other`'s first atom starts with it), they
    /// are concatenated into a single re-measured atom so a word split
    /// across runs becomes one atom again.
    pub fn append(&mut self, mut other: StyledRun, metrics: &dyn StyleMetrics) {
        if other.atoms.is_empty() {
            return;
        }

        let mut skip = 0;

        if let Some(last) = self.atoms.last_mut() {
            let ends_in_word = !last.text.chars().next_back().is_some_and(char::is_whitespace);
            let starts_with_word = !other.atoms[0]
                .text
                .chars()
                .next()
                .is_some_and(char::is_whitespace);

            if ends_in_word && starts_with_word {
                let first = &other.atoms[0];
                last.text.push_str(&first.text);
                last.num_chars += first.num_chars;
                last.remeasure(&self.style, self.mask, metrics);
                skip = 1;
            }
        }

        self.atoms.extend(other.atoms.drain(skip..));
    }

    /// Split this run at `char_offset`, returning the tail as a new run.
    ///
    /// An offset inside an atom splits that atom into two re-measured
    /// halves. An offset at or past the end returns an empty run with the
    /// same style and mask.
    pub fn split(&mut self, char_offset: usize, metrics: &dyn StyleMetrics) -> StyledRun {
        let mut tail = StyledRun::empty(self.style, self.mask);
        let mut index = 0;

        for i in 0..self.atoms.len() {
            let atom_len = self.atoms[i].char_count();
            let next_index = index + atom_len;

            if char_offset == index {
                tail.atoms = self.atoms.split_off(i);
                break;
            }

            if char_offset > index && char_offset < next_index {
                let cut = char_offset - index;
                let right_text = char_slice(&self.atoms[i].text, cut..atom_len).to_string();
                let right = Atom::measured(right_text, &self.style, self.mask, metrics);

                let left = &mut self.atoms[i];
                left.text = char_slice(&left.text, 0..cut).to_string();
                left.num_chars = cut;
                left.remeasure(&self.style, self.mask, metrics);

                tail.atoms = self.atoms.split_off(i + 1);
                tail.atoms.insert(0, right);
                break;
            }

            index = next_index;
        }

        tail
    }

    /// Change the run's style and/or mask, re-measuring every atom if
    /// anything changed.
    pub fn set_style(&mut self, style: Style, mask: Option<char>, metrics: &dyn StyleMetrics) {
        if self.style != style || self.mask != mask {
            self.style = style;
            self.mask = mask;
            for atom in &mut self.atoms {
                atom.remeasure(&self.style, self.mask, metrics);
            }
        }
    }

    /// Append this run's full display text to `out` (mask applied).
    pub fn append_all_text(&self, out: &mut String) {
        for atom in &self.atoms {
            Self::push_atom_text(out, atom, self.mask, 0..atom.char_count());
        }
    }

    /// Append the display text covering the run-local char `range` to `out`.
    pub fn append_text_in_range(&self, out: &mut String, range: Range<usize>) {
        let mut index = 0;

        for atom in &self.atoms {
            let next_index = index + atom.char_count();

            if range.start < next_index {
                if range.end <= index {
                    break;
                }

                let from = range.start.saturating_sub(index);
                let to = (range.end - index).min(atom.char_count());
                if from < to {
                    Self::push_atom_text(out, atom, self.mask, from..to);
                }
            }

            index = next_index;
        }
    }

    /// Write part of one atom, substituting the mask character for word and
    /// whitespace content. Newlines are structure, not content, and stay
    /// unmasked.
    fn push_atom_text(out: &mut String, atom: &Atom, mask: Option<char>, range: Range<usize>) {
        match mask {
            Some(c) if !atom.is_newline() => {
                out.extend(std::iter::repeat_n(c, range.len()));
            }
            _ => out.push_str(char_slice(&atom.text, range)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MonoMetrics;

    fn run(text: &str) -> StyledRun {
        StyledRun::new(text, Style::with_size(10.0), None, &MonoMetrics)
    }

    #[test]
    fn test_total_len_matches_atom_sum() {
        let r = run("hello world\n");
        assert_eq!(r.total_len(), 12);
        assert_eq!(r.atoms().len(), 4);
    }

    #[test]
    fn test_split_at_atom_boundary() {
        let mut r = run("ab cd");
        let tail = r.split(3, &MonoMetrics);
        let mut left = String::new();
        r.append_all_text(&mut left);
        let mut right = String::new();
        tail.append_all_text(&mut right);
        assert_eq!(left, "ab ");
        assert_eq!(right, "cd");
    }

    #[test]
    fn test_split_mid_atom_remeasures_both_halves() {
        let mut r = run("abcdef");
        let tail = r.split(2, &MonoMetrics);
        assert_eq!(r.atoms().len(), 1);
        assert_eq!(r.atoms()[0].text(), "ab");
        assert_eq!(r.atoms()[0].width(), 10.0);
        assert_eq!(tail.atoms()[0].text(), "cdef");
        assert_eq!(tail.atoms()[0].width(), 20.0);
    }

    #[test]
    fn test_split_at_end_yields_empty_run() {
        let mut r = run("abc");
        let tail = r.split(3, &MonoMetrics);
        assert!(tail.is_empty());
        assert_eq!(tail.style(), r.style());
        assert_eq!(r.total_len(), 3);
    }

    #[test]
    fn test_split_at_zero_moves_everything() {
        let mut r = run("abc def");
        let tail = r.split(0, &MonoMetrics);
        assert!(r.is_empty());
        assert_eq!(tail.total_len(), 7);
    }

    #[test]
    fn test_append_merges_word_fragments() {
        let mut left = run("hel");
        let right = run("lo there");
        left.append(right, &MonoMetrics);

        assert_eq!(left.atoms()[0].text(), "hello");
        assert_eq!(left.atoms()[0].width(), 25.0);
        let texts: Vec<&str> = left.atoms().iter().map(Atom::text).collect();
        assert_eq!(texts, vec!["hello", " ", "there"]);
    }

    #[test]
    fn test_append_keeps_whitespace_boundary() {
        let mut left = run("hi ");
        let right = run("there");
        left.append(right, &MonoMetrics);
        assert_eq!(left.atoms().len(), 3);
    }

    #[test]
    fn test_append_no_merge_after_newline() {
        let mut left = run("a\n");
        let right = run("b");
        left.append(right, &MonoMetrics);
        let texts: Vec<&str> = left.atoms().iter().map(Atom::text).collect();
        assert_eq!(texts, vec!["a", "\n", "b"]);
    }

    #[test]
    fn test_set_style_remeasures() {
        let mut r = run("abcd");
        assert_eq!(r.atoms()[0].width(), 20.0);
        r.set_style(Style::with_size(20.0), None, &MonoMetrics);
        assert_eq!(r.atoms()[0].width(), 40.0);
    }

    #[test]
    fn test_text_in_range_intersection() {
        let r = run("hello world");
        let mut out = String::new();
        r.append_text_in_range(&mut out, 3..8);
        assert_eq!(out, "lo wo");
    }

    #[test]
    fn test_masked_extraction_keeps_newlines() {
        let r = StyledRun::new("ab\ncd", Style::with_size(10.0), Some('*'), &MonoMetrics);
        let mut out = String::new();
        r.append_all_text(&mut out);
        assert_eq!(out, "**\n**");
    }
}
