//! Atoms: the indivisible units of layout.
//!
//! An [`Atom`] is a word, a run of non-breaking whitespace, or a single
//! newline. Atoms never span a newline and never mix whitespace with
//! non-whitespace, so the wrap algorithm can treat each one as an opaque
//! box with a cached display width.

use crate::metrics::StyleMetrics;
use crate::style::Style;
use std::borrow::Cow;

/// Category of an atom, derived from its first character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AtomKind {
    /// Maximal run of non-whitespace characters.
    Word,
    /// Maximal run of whitespace other than `\r`/`\n`.
    Whitespace,
    /// A single logical newline (`\n`, `\r`, or a collapsed `\r\n`).
    Newline,
}

/// A word, whitespace run, or newline with a cached display width.
#[derive(Clone, Debug, PartialEq)]
pub struct Atom {
    pub(crate) text: String,
    pub(crate) num_chars: usize,
    pub(crate) width: f32,
}

impl Atom {
    /// Build an atom from `text`, measuring it under `style` and `mask`.
    pub(crate) fn measured(
        text: String,
        style: &Style,
        mask: Option<char>,
        metrics: &dyn StyleMetrics,
    ) -> Self {
        let num_chars = text.chars().count();
        let mut atom = Self {
            text,
            num_chars,
            width: 0.0,
        };
        atom.remeasure(style, mask, metrics);
        atom
    }

    /// Recompute the cached width under `style` and `mask`.
    pub(crate) fn remeasure(
        &mut self,
        style: &Style,
        mask: Option<char>,
        metrics: &dyn StyleMetrics,
    ) {
        self.width = if self.is_newline() {
            0.0
        } else {
            metrics.text_width(style, &self.display_text(mask))
        };
    }

    /// The atom's stored text. A collapsed `\r\n` stores `"\n"`.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of chars this atom covers in the document index space.
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.num_chars
    }

    /// Cached display width (0 for newlines).
    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Category derived from content.
    #[must_use]
    pub fn kind(&self) -> AtomKind {
        if self.is_newline() {
            AtomKind::Newline
        } else if self.is_whitespace() {
            AtomKind::Whitespace
        } else {
            AtomKind::Word
        }
    }

    /// True for whitespace runs *and* newlines (a newline's first char is
    /// itself whitespace; wrap handling relies on that ordering).
    #[must_use]
    pub fn is_whitespace(&self) -> bool {
        self.text.chars().next().is_some_and(char::is_whitespace)
    }

    /// True for newline atoms.
    #[must_use]
    pub fn is_newline(&self) -> bool {
        matches!(self.text.chars().next(), Some('\r' | '\n'))
    }

    /// Text as it should render and measure: the real content, or the mask
    /// character repeated once per char for concealed input.
    #[must_use]
    pub fn display_text(&self, mask: Option<char>) -> Cow<'_, str> {
        match mask {
            None => Cow::Borrowed(&self.text),
            Some(c) => Cow::Owned(c.to_string().repeat(self.num_chars)),
        }
    }
}

/// Slice `s` by char offsets rather than byte offsets.
///
/// `range` is clamped to the string's char count.
pub(crate) fn char_slice(s: &str, range: std::ops::Range<usize>) -> &str {
    let mut indices = s.char_indices().map(|(i, _)| i);
    let from = indices.clone().nth(range.start).unwrap_or(s.len());
    let to = if range.end > range.start {
        indices.nth(range.end - 1).map_or(s.len(), |i| {
            i + s[i..].chars().next().map_or(0, char::len_utf8)
        })
    } else {
        from
    };
    &s[from..to.max(from)]
}

/// Split `text` into atoms measured under `style` and `mask`.
///
/// Scans left to right: runs of non-CR/LF whitespace become whitespace
/// atoms; `\r` optionally followed by `\n` collapses into a single one-char
/// newline atom storing `"\n"` (a lone `\r` keeps `"\r"`); anything else
/// forms maximal word atoms. The atoms cover the input exactly once, in
/// order, except that a `\r\n` pair contributes one char, not two.
pub(crate) fn tokenize(
    text: &str,
    style: &Style,
    mask: Option<char>,
    metrics: &dyn StyleMetrics,
) -> Vec<Atom> {
    let mut atoms = Vec::new();
    let mut rest = text;

    while let Some(first) = rest.chars().next() {
        let piece: String;

        if first.is_whitespace() && first != '\r' && first != '\n' {
            let end = rest
                .char_indices()
                .find(|&(_, c)| !c.is_whitespace() || c == '\r' || c == '\n')
                .map_or(rest.len(), |(i, _)| i);
            piece = rest[..end].to_string();
            rest = &rest[end..];
        } else if first == '\r' {
            rest = &rest[1..];
            if rest.starts_with('\n') {
                rest = &rest[1..];
                piece = "\n".to_string();
            } else {
                piece = "\r".to_string();
            }
        } else if first == '\n' {
            rest = &rest[1..];
            piece = "\n".to_string();
        } else {
            let end = rest
                .char_indices()
                .find(|&(_, c)| c.is_whitespace())
                .map_or(rest.len(), |(i, _)| i);
            piece = rest[..end].to_string();
            rest = &rest[end..];
        }

        atoms.push(Atom::measured(piece, style, mask, metrics));
    }

    atoms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MonoMetrics;

    fn atoms_of(text: &str) -> Vec<Atom> {
        tokenize(text, &Style::with_size(10.0), None, &MonoMetrics)
    }

    #[test]
    fn test_words_and_whitespace() {
        let atoms = atoms_of("ab cd");
        let texts: Vec<&str> = atoms.iter().map(Atom::text).collect();
        assert_eq!(texts, vec!["ab", " ", "cd"]);
        assert_eq!(atoms[0].kind(), AtomKind::Word);
        assert_eq!(atoms[1].kind(), AtomKind::Whitespace);
        assert_eq!(atoms.iter().map(Atom::char_count).sum::<usize>(), 5);
    }

    #[test]
    fn test_crlf_is_one_atom() {
        let atoms = atoms_of("a\r\nb");
        assert_eq!(atoms.len(), 3);
        assert_eq!(atoms[1].text(), "\n");
        assert_eq!(atoms[1].char_count(), 1);
        assert_eq!(atoms[1].kind(), AtomKind::Newline);
    }

    #[test]
    fn test_lone_cr_kept() {
        let atoms = atoms_of("\r");
        assert_eq!(atoms.len(), 1);
        assert_eq!(atoms[0].text(), "\r");
        assert!(atoms[0].is_newline());
    }

    #[test]
    fn test_newline_width_zero() {
        let atoms = atoms_of("word\n");
        assert_eq!(atoms[0].width(), 20.0);
        assert_eq!(atoms[1].width(), 0.0);
    }

    #[test]
    fn test_whitespace_run_groups_tabs_and_spaces() {
        let atoms = atoms_of("a \t b");
        let texts: Vec<&str> = atoms.iter().map(Atom::text).collect();
        assert_eq!(texts, vec!["a", " \t ", "b"]);
    }

    #[test]
    fn test_newline_is_also_whitespace() {
        let atoms = atoms_of("\n");
        assert!(atoms[0].is_whitespace());
        assert!(atoms[0].is_newline());
    }

    #[test]
    fn test_masked_display_text() {
        let atoms = atoms_of("secret");
        assert_eq!(atoms[0].display_text(Some('•')), "••••••");
        assert_eq!(atoms[0].display_text(None), "secret");
    }

    #[test]
    fn test_mask_affects_measurement() {
        let style = Style::with_size(10.0);
        // A bullet is one column; CJK source chars are two columns each.
        let masked = tokenize("你你", &style, Some('*'), &MonoMetrics);
        let plain = tokenize("你你", &style, None, &MonoMetrics);
        assert_eq!(masked[0].width(), 10.0);
        assert_eq!(plain[0].width(), 20.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(atoms_of("").is_empty());
    }

    #[test]
    fn test_char_slice_multibyte() {
        assert_eq!(char_slice("héllo", 1..3), "él");
        assert_eq!(char_slice("abc", 0..0), "");
        assert_eq!(char_slice("abc", 2..9), "c");
        assert_eq!(char_slice("abc", 5..9), "");
    }
}
