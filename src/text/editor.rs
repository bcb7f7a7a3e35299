//! Editing facade over the document, undo stack, and layout queries.
//!
//! [`Editor`] is what hosts talk to: it owns the [`TextDocument`], the
//! [`UndoStack`], the caret/selection, the current insertion style, and the
//! injected metrics provider, and it emits change notifications after every
//! committed mutation. Rendering, input handling, and scrolling live in the
//! host; the editor only answers geometry queries against fresh layout
//! cursors.

use crate::error::Result;
use crate::event::{LogLevel, emit_log};
use crate::metrics::StyleMetrics;
use crate::style::Style;
use crate::text::document::TextDocument;
use crate::text::layout::{CharPosition, LayoutCursor, LayoutOptions, Rect};
use crate::text::undo::UndoStack;
use std::ops::Range;

/// Width of the caret rectangle reported by [`Editor::caret_rectangle`].
const CARET_WIDTH: f32 = 2.0;

/// Probe window for word-break scans, in chars.
const WORD_BREAK_WINDOW: usize = 512;

/// A selection between an anchor (fixed end) and a head (the caret).
///
/// The head may sit on either side of the anchor depending on drag
/// direction; [`Selection::start`]/[`Selection::end`] normalize.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    /// Fixed end of the selection.
    pub anchor: usize,
    /// Moving end; always equals the caret.
    pub head: usize,
}

impl Selection {
    /// A collapsed selection (caret only) at `index`.
    #[must_use]
    pub const fn caret(index: usize) -> Self {
        Self {
            anchor: index,
            head: index,
        }
    }

    /// Lower endpoint.
    #[must_use]
    pub fn start(&self) -> usize {
        self.anchor.min(self.head)
    }

    /// Upper endpoint (exclusive).
    #[must_use]
    pub fn end(&self) -> usize {
        self.anchor.max(self.head)
    }

    /// The normalized half-open range.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start()..self.end()
    }

    /// True when nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }
}

/// Notification payload: the char range whose geometry may have changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangeEvent {
    pub range: Range<usize>,
}

/// Handle for a registered change observer; pass back to
/// [`Editor::unobserve`] for deterministic teardown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Subscription(u64);

type ChangeListener = Box<dyn FnMut(&ChangeEvent)>;

/// The editing core's host-facing surface.
pub struct Editor {
    document: TextDocument,
    metrics: Box<dyn StyleMetrics>,
    undo: UndoStack,
    undo_enabled: bool,
    selection: Selection,
    current_style: Style,
    layout: LayoutOptions,
    listeners: Vec<(u64, ChangeListener)>,
    next_subscription: u64,
}

impl Editor {
    /// Create an empty editor using `metrics` for measurement.
    pub fn new<M: StyleMetrics + 'static>(metrics: M) -> Self {
        Self {
            document: TextDocument::new(),
            metrics: Box::new(metrics),
            undo: UndoStack::new(),
            undo_enabled: true,
            selection: Selection::default(),
            current_style: Style::default(),
            layout: LayoutOptions::default(),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Create an editor holding `text` in the default style.
    pub fn with_text<M: StyleMetrics + 'static>(metrics: M, text: &str) -> Self {
        let mut editor = Self::new(metrics);
        editor.set_text(text);
        editor
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    /// The underlying document.
    #[must_use]
    pub fn document(&self) -> &TextDocument {
        &self.document
    }

    /// Style applied to newly inserted text.
    #[must_use]
    pub fn current_style(&self) -> Style {
        self.current_style
    }

    /// Set the style applied to newly inserted text.
    pub fn set_current_style(&mut self, style: Style) {
        self.current_style = style;
    }

    /// Current layout options.
    #[must_use]
    pub fn layout_options(&self) -> LayoutOptions {
        self.layout
    }

    /// Replace the layout options after validating them.
    pub fn set_layout_options(&mut self, options: LayoutOptions) -> Result<()> {
        options.validate()?;
        self.layout = options;
        Ok(())
    }

    /// Enable or disable undo recording. Mutations performed while
    /// disabled go straight to the document and are not undoable.
    pub fn set_undo_enabled(&mut self, enabled: bool) {
        self.undo_enabled = enabled;
    }

    /// The mask character concealing content, if set.
    #[must_use]
    pub fn mask_char(&self) -> Option<char> {
        self.document.mask()
    }

    /// Set or clear the mask character; re-measures the document.
    pub fn set_mask_char(&mut self, mask: Option<char>) {
        if self.document.mask() == mask {
            return;
        }
        self.document.set_mask(mask, self.metrics.as_ref());
        let len = self.document.total_len();
        self.notify(0..len);
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Insert `text` at `index` (clamped) with the current style, moving
    /// the caret to the end of the inserted text.
    pub fn insert_at(&mut self, text: &str, index: usize) {
        if text.is_empty() {
            return;
        }
        let index = index.min(self.document.total_len());
        let caret_after = index + text.chars().count();
        self.perform_insert(text, index, self.current_style, caret_after);
    }

    /// Replace the selection (if any) with `text`, inserting at the caret.
    pub fn insert_at_caret(&mut self, text: &str) {
        let insert_index = self.selection.start();

        if !self.selection.is_empty() {
            let range = self.selection.range();
            self.perform_remove(range, insert_index);
        }

        if !text.is_empty() {
            let caret_after = insert_index + text.chars().count();
            self.perform_insert(text, insert_index, self.current_style, caret_after);
        }
    }

    /// Remove `range` (normalized and clamped), moving the caret to its
    /// start.
    pub fn remove(&mut self, range: Range<usize>) {
        let start = range.start.min(range.end);
        self.perform_remove(range, start);
    }

    /// Delete the selected text, if any.
    pub fn delete_selection(&mut self) {
        if !self.selection.is_empty() {
            let range = self.selection.range();
            self.remove(range);
        }
    }

    /// Delete the char before the caret (or the selection).
    pub fn delete_backward(&mut self) {
        if self.selection.is_empty() {
            let caret = self.caret();
            if caret == 0 {
                return;
            }
            self.remove(caret - 1..caret);
        } else {
            self.delete_selection();
        }
    }

    /// Delete the char after the caret (or the selection).
    pub fn delete_forward(&mut self) {
        if self.selection.is_empty() {
            let caret = self.caret();
            if caret >= self.document.total_len() {
                return;
            }
            self.remove(caret..caret + 1);
        } else {
            self.delete_selection();
        }
    }

    /// Replace the whole content, clearing undo history. The caret stays
    /// at the end if it was at the end, otherwise clamps.
    pub fn set_text(&mut self, text: &str) {
        let old_len = self.document.total_len();
        let was_at_end = self.caret() >= old_len;

        let metrics = self.metrics.as_ref();
        self.document.remove(0..old_len, metrics);
        self.document.insert(text, 0, self.current_style, metrics);
        self.undo.clear();

        let new_len = self.document.total_len();
        let caret = if was_at_end {
            new_len
        } else {
            self.caret().min(new_len)
        };
        self.selection = Selection::caret(caret);
        emit_log(LogLevel::Debug, "document reset");
        self.notify(0..new_len);
    }

    /// Remove everything and drop undo history.
    pub fn clear(&mut self) {
        self.set_text("");
    }

    /// Restyle the entire document and adopt `style` for new text.
    pub fn apply_style_to_all(&mut self, style: Style) {
        self.current_style = style;
        self.document.apply_style_to_all(style, self.metrics.as_ref());
        let len = self.document.total_len();
        self.notify(0..len);
    }

    // ------------------------------------------------------------------
    // Undo surface
    // ------------------------------------------------------------------

    /// Undo the most recent transaction. Returns `false` when there is
    /// nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.undo.begin_transaction();
        let Some(caret) = self.undo.undo(&mut self.document, self.metrics.as_ref()) else {
            return false;
        };
        self.selection = Selection::caret(caret.min(self.document.total_len()));
        let len = self.document.total_len();
        self.notify(0..len);
        true
    }

    /// Redo the most recently undone transaction. Returns `false` when
    /// there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(caret) = self.undo.redo(&mut self.document, self.metrics.as_ref()) else {
            return false;
        };
        self.selection = Selection::caret(caret.min(self.document.total_len()));
        let len = self.document.total_len();
        self.notify(0..len);
        true
    }

    /// Close the current transaction so the next edit starts a new undo
    /// unit.
    pub fn new_transaction(&mut self) {
        self.undo.begin_transaction();
    }

    /// True when undo is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.undo.can_undo()
    }

    /// True when redo is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.undo.can_redo()
    }

    // ------------------------------------------------------------------
    // Caret and selection
    // ------------------------------------------------------------------

    /// The caret position.
    #[must_use]
    pub fn caret(&self) -> usize {
        self.selection.head
    }

    /// The selection (collapsed when nothing is selected).
    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Move the caret to `index` (clamped). With `selecting`, the anchor
    /// stays put and the selection extends; without, it collapses.
    pub fn move_caret_to(&mut self, index: usize, selecting: bool) {
        let index = index.min(self.document.total_len());
        if selecting {
            self.selection.head = index;
        } else {
            self.selection = Selection::caret(index);
        }
    }

    /// Select the whole document, caret at the end.
    pub fn select_all(&mut self) {
        self.selection = Selection {
            anchor: 0,
            head: self.document.total_len(),
        };
    }

    /// The selected display text.
    #[must_use]
    pub fn selected_text(&self) -> String {
        self.document.text_in_range(self.selection.range())
    }

    /// Move the caret one char left.
    pub fn move_caret_left(&mut self, selecting: bool) -> bool {
        self.undo.begin_transaction();
        let target = if selecting || self.selection.is_empty() {
            self.caret().saturating_sub(1)
        } else {
            self.selection.start()
        };
        self.move_caret_changed(target, selecting)
    }

    /// Move the caret one char right.
    pub fn move_caret_right(&mut self, selecting: bool) -> bool {
        self.undo.begin_transaction();
        let target = if selecting || self.selection.is_empty() {
            self.caret() + 1
        } else {
            self.selection.end()
        };
        self.move_caret_changed(target, selecting)
    }

    /// Move the caret to the previous word break.
    pub fn move_caret_word_left(&mut self, selecting: bool) -> bool {
        self.undo.begin_transaction();
        let target = self.find_word_break_before(self.caret());
        self.move_caret_changed(target, selecting)
    }

    /// Move the caret to the next word break.
    pub fn move_caret_word_right(&mut self, selecting: bool) -> bool {
        self.undo.begin_transaction();
        let target = self.find_word_break_after(self.caret());
        self.move_caret_changed(target, selecting)
    }

    /// Move the caret one visual line up.
    pub fn move_caret_up(&mut self, selecting: bool) -> bool {
        self.undo.begin_transaction();
        let position = self.char_position(self.caret());
        let target = self.index_at_position(position.x, position.y - 1.0);
        self.move_caret_changed(target, selecting)
    }

    /// Move the caret one visual line down.
    pub fn move_caret_down(&mut self, selecting: bool) -> bool {
        self.undo.begin_transaction();
        let position = self.char_position(self.caret());
        let target = self.index_at_position(position.x, position.y + position.line_height + 1.0);
        self.move_caret_changed(target, selecting)
    }

    /// Move the caret to the start of its visual line.
    pub fn move_caret_to_start_of_line(&mut self, selecting: bool) -> bool {
        self.undo.begin_transaction();
        let position = self.char_position(self.caret());
        let target = self.index_at_position(0.0, position.y + position.line_height * 0.5);
        self.move_caret_changed(target, selecting)
    }

    /// Move the caret to the end of its visual line.
    pub fn move_caret_to_end_of_line(&mut self, selecting: bool) -> bool {
        self.undo.begin_transaction();
        let position = self.char_position(self.caret());
        let target = self.index_at_position(f32::MAX, position.y + position.line_height * 0.5);
        self.move_caret_changed(target, selecting)
    }

    /// Move the caret to the start of the document.
    pub fn move_caret_to_top(&mut self, selecting: bool) -> bool {
        self.undo.begin_transaction();
        self.move_caret_changed(0, selecting)
    }

    /// Move the caret to the end of the document.
    pub fn move_caret_to_end(&mut self, selecting: bool) -> bool {
        self.undo.begin_transaction();
        let target = self.document.total_len();
        self.move_caret_changed(target, selecting)
    }

    /// Index of the word break after `position` (whitespace-skipping,
    /// three-way char category).
    #[must_use]
    pub fn find_word_break_after(&self, position: usize) -> usize {
        let probe = self
            .document
            .text_in_range(position..position.saturating_add(WORD_BREAK_WINDOW));
        let chars: Vec<char> = probe.chars().collect();
        let total = chars.len();
        let mut i = 0;

        while i < total && chars[i].is_whitespace() {
            i += 1;
        }
        if i < total {
            let kind = char_category(chars[i]);
            while i < total && char_category(chars[i]) == kind {
                i += 1;
            }
        }
        while i < total && chars[i].is_whitespace() {
            i += 1;
        }

        position + i
    }

    /// Index of the word break before `position`.
    #[must_use]
    pub fn find_word_break_before(&self, position: usize) -> usize {
        if position == 0 {
            return 0;
        }

        let start = position.saturating_sub(WORD_BREAK_WINDOW);
        let probe = self.document.text_in_range(start..position);
        let chars: Vec<char> = probe.chars().collect();
        let mut i = chars.len();

        while i > 0 && chars[i - 1].is_whitespace() {
            i -= 1;
        }
        if i > 0 {
            let kind = char_category(chars[i - 1]);
            while i > 0 && char_category(chars[i - 1]) == kind {
                i -= 1;
            }
        }

        start + i
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Full display text.
    #[must_use]
    pub fn full_text(&self) -> String {
        self.document.full_text()
    }

    /// Display text covering `range`.
    #[must_use]
    pub fn text_in_range(&self, range: Range<usize>) -> String {
        self.document.text_in_range(range)
    }

    /// Total chars in the document.
    #[must_use]
    pub fn total_length(&self) -> usize {
        self.document.total_len()
    }

    /// True when the document is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }

    /// Visual anchor of char `index`.
    #[must_use]
    pub fn char_position(&self, index: usize) -> CharPosition {
        self.layout_cursor().char_position(index)
    }

    /// Char index nearest the visual position `(x, y)`.
    #[must_use]
    pub fn index_at_position(&self, x: f32, y: f32) -> usize {
        self.layout_cursor().index_at(x, y)
    }

    /// Rectangles covering `range`, one per line fragment.
    #[must_use]
    pub fn text_bounds(&self, range: Range<usize>) -> Vec<Rect> {
        let start = range.start.min(range.end);
        let end = range.start.max(range.end);
        self.layout_cursor().text_bounds(start..end)
    }

    /// Height of the laid-out text.
    #[must_use]
    pub fn total_text_height(&self) -> f32 {
        self.layout_cursor().total_text_height()
    }

    /// Rightmost extent of the laid-out text.
    #[must_use]
    pub fn text_right_extent(&self) -> f32 {
        self.layout_cursor().text_right()
    }

    /// Vertical anchoring offset for content shorter than the viewport.
    #[must_use]
    pub fn vertical_offset(&self) -> f32 {
        self.layout_cursor().y_offset()
    }

    /// The caret's rectangle at its current position.
    #[must_use]
    pub fn caret_rectangle(&self) -> Rect {
        let position = self.char_position(self.caret());
        Rect::new(position.x, position.y, CARET_WIDTH, position.line_height)
    }

    // ------------------------------------------------------------------
    // Change notification
    // ------------------------------------------------------------------

    /// Register a change observer; returns a handle for removal.
    pub fn observe<F: FnMut(&ChangeEvent) + 'static>(&mut self, listener: F) -> Subscription {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        Subscription(id)
    }

    /// Remove a previously registered observer.
    pub fn unobserve(&mut self, subscription: Subscription) {
        self.listeners.retain(|(id, _)| *id != subscription.0);
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn layout_cursor(&self) -> LayoutCursor<'_> {
        LayoutCursor::new(
            &self.document,
            self.current_style,
            self.metrics.as_ref(),
            self.layout,
        )
    }

    fn perform_insert(&mut self, text: &str, index: usize, style: Style, caret_after: usize) {
        let caret_before = self.caret();

        if self.undo_enabled {
            self.undo.record_insert(
                &mut self.document,
                self.metrics.as_ref(),
                text,
                index,
                style,
                caret_before,
                caret_after,
            );
        } else {
            self.document.insert(text, index, style, self.metrics.as_ref());
        }

        let len = self.document.total_len();
        self.selection = Selection::caret(caret_after.min(len));
        self.notify(index..len);
    }

    fn perform_remove(&mut self, range: Range<usize>, caret_after: usize) {
        let len = self.document.total_len();
        let start = range.start.min(range.end).min(len);
        let end = range.start.max(range.end).min(len);
        if start == end {
            return;
        }

        let caret_before = self.caret();

        if self.undo_enabled {
            self.undo.record_remove(
                &mut self.document,
                self.metrics.as_ref(),
                start..end,
                caret_before,
                caret_after,
            );
        } else {
            self.document.remove(start..end, self.metrics.as_ref());
        }

        let len = self.document.total_len();
        self.selection = Selection::caret(caret_after.min(len));
        self.notify(start..len);
    }

    fn move_caret_changed(&mut self, index: usize, selecting: bool) -> bool {
        let before = self.selection;
        self.move_caret_to(index, selecting);
        self.selection != before
    }

    fn notify(&mut self, range: Range<usize>) {
        if self.listeners.is_empty() {
            return;
        }
        let event = ChangeEvent { range };
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }
}

/// Three-way character category for word-break scanning: whitespace,
/// symbol, or letter/digit.
fn char_category(c: char) -> u8 {
    if c.is_alphanumeric() {
        2
    } else if c.is_whitespace() {
        0
    } else {
        1
    }
}
